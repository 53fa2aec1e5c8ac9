use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::{PostId, ReplyId, SoneId};
use crate::timestamp::Timestamp;

/// A reply attached to exactly one post.
///
/// Replies are ordered by creation time within their post; equal timestamps
/// fall back to id order so iteration stays deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReply {
    /// Unique identifier.
    pub id: ReplyId,
    /// The post this reply belongs to.
    pub post: PostId,
    /// The authoring Sone.
    pub sone: SoneId,
    /// Creation time.
    pub time: Timestamp,
    /// Reply text.
    pub text: String,
}

/// Validating builder for [`PostReply`].
#[derive(Debug, Default)]
pub struct PostReplyBuilder {
    id: Option<ReplyId>,
    post: Option<PostId>,
    sone: Option<SoneId>,
    time: Option<Timestamp>,
    text: Option<String>,
}

impl PostReplyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit id (e.g. one received from a remote node).
    pub fn with_id(mut self, id: ReplyId) -> Self {
        self.id = Some(id);
        self
    }

    /// Use a freshly generated random id.
    pub fn random_id(mut self) -> Self {
        self.id = Some(ReplyId::random());
        self
    }

    /// The post being replied to. Required.
    pub fn to_post(mut self, post: PostId) -> Self {
        self.post = Some(post);
        self
    }

    /// The authoring Sone. Required.
    pub fn from_sone(mut self, sone: SoneId) -> Self {
        self.sone = Some(sone);
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

    /// The reply text. Required.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Validate and build the reply.
    pub fn build(self) -> Result<PostReply, TypeError> {
        let id = self.id.ok_or(TypeError::MissingField("id"))?;
        if id.as_str().is_empty() {
            return Err(TypeError::EmptyId);
        }
        Ok(PostReply {
            id,
            post: self.post.ok_or(TypeError::MissingField("post"))?,
            sone: self.sone.ok_or(TypeError::MissingField("sone"))?,
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
        let reply = PostReplyBuilder::new()
            .with_id(ReplyId::new("r1"))
            .to_post(PostId::new("p1"))
            .from_sone(SoneId::new("s1"))
            .at(Timestamp::from_millis(5))
            .text("indeed")
            .build()
            .unwrap();
        assert_eq!(reply.post.as_str(), "p1");
        assert_eq!(reply.time, Timestamp::from_millis(5));
    }

    #[test]
    fn missing_post_fails() {
        let err = PostReplyBuilder::new()
            .random_id()
            .from_sone(SoneId::new("s1"))
            .current_time()
            .text("x")
            .build()
            .unwrap_err();
        assert_eq!(err, TypeError::MissingField("post"));
    }

    #[test]
    fn missing_text_fails() {
        let err = PostReplyBuilder::new()
            .random_id()
            .to_post(PostId::new("p1"))
            .from_sone(SoneId::new("s1"))
            .current_time()
            .build()
            .unwrap_err();
        assert_eq!(err, TypeError::MissingField("text"));
    }
}
