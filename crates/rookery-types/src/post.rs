use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::{PostId, SoneId};
use crate::timestamp::Timestamp;

/// A piece of content authored by a Sone.
///
/// A post may optionally be directed at a recipient Sone, in which case it
/// also appears in the store's directed-post index for that recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier.
    pub id: PostId,
    /// The authoring Sone.
    pub sone: SoneId,
    /// Optional recipient the post is directed at.
    pub recipient: Option<SoneId>,
    /// Creation time.
    pub time: Timestamp,
    /// Post text.
    pub text: String,
}

/// Validating builder for [`Post`].
///
/// Requires an id (explicit or random), an author, a creation time (explicit
/// or current), and text. `build` fails before producing a partially
/// initialized entity.
#[derive(Debug, Default)]
pub struct PostBuilder {
    id: Option<PostId>,
    sone: Option<SoneId>,
    recipient: Option<SoneId>,
    time: Option<Timestamp>,
    text: Option<String>,
}

impl PostBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit id (e.g. one received from a remote node).
    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = Some(id);
        self
    }

    /// Use a freshly generated random id.
    pub fn random_id(mut self) -> Self {
        self.id = Some(PostId::random());
        self
    }

    /// The authoring Sone. Required.
    pub fn from_sone(mut self, sone: SoneId) -> Self {
        self.sone = Some(sone);
        self
    }

    /// Direct the post at a recipient Sone.
    pub fn to_recipient(mut self, recipient: SoneId) -> Self {
        self.recipient = Some(recipient);
        self
    }

    /// Use an explicit creation time.
    pub fn at(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }

    /// Use the current wall-clock time.
    pub fn current_time(mut self) -> Self {
        self.time = Some(Timestamp::now());
        self
    }

    /// The post text. Required.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Validate and build the post.
    pub fn build(self) -> Result<Post, TypeError> {
        let id = self.id.ok_or(TypeError::MissingField("id"))?;
        if id.as_str().is_empty() {
            return Err(TypeError::EmptyId);
        }
        Ok(Post {
            id,
            sone: self.sone.ok_or(TypeError::MissingField("sone"))?,
            recipient: self.recipient,
            time: self.time.ok_or(TypeError::MissingField("time"))?,
            text: self.text.ok_or(TypeError::MissingField("text"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_with_all_fields() {
        let post = PostBuilder::new()
            .with_id(PostId::new("p1"))
            .from_sone(SoneId::new("s1"))
            .to_recipient(SoneId::new("s2"))
            .at(Timestamp::from_millis(1000))
            .text("hello")
            .build()
            .unwrap();
        assert_eq!(post.id.as_str(), "p1");
        assert_eq!(post.recipient, Some(SoneId::new("s2")));
    }

    #[test]
    fn random_id_produces_distinct_posts() {
        let build = || {
            PostBuilder::new()
                .random_id()
                .from_sone(SoneId::new("s1"))
                .current_time()
                .text("x")
                .build()
                .unwrap()
        };
        assert_ne!(build().id, build().id);
    }

    #[test]
    fn missing_author_fails() {
        let err = PostBuilder::new()
            .random_id()
            .current_time()
            .text("x")
            .build()
            .unwrap_err();
        assert_eq!(err, TypeError::MissingField("sone"));
    }

    #[test]
    fn missing_id_fails() {
        let err = PostBuilder::new()
            .from_sone(SoneId::new("s1"))
            .current_time()
            .text("x")
            .build()
            .unwrap_err();
        assert_eq!(err, TypeError::MissingField("id"));
    }

    #[test]
    fn missing_time_fails() {
        let err = PostBuilder::new()
            .random_id()
            .from_sone(SoneId::new("s1"))
            .text("x")
            .build()
            .unwrap_err();
        assert_eq!(err, TypeError::MissingField("time"));
    }

    #[test]
    fn empty_id_fails() {
        let err = PostBuilder::new()
            .with_id(PostId::new(""))
            .from_sone(SoneId::new("s1"))
            .current_time()
            .text("x")
            .build()
            .unwrap_err();
        assert_eq!(err, TypeError::EmptyId);
    }
}
