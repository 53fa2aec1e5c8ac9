use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::id::{PostId, ReplyId, SoneId};

/// An author identity.
///
/// A Sone is either local (its keys live on this node) or remote (content
/// arrives through synchronization). Each Sone owns the collections of post
/// and reply ids it has authored. The content store keeps its author-scoped
/// indices consistent with these collections: they are a second source of
/// truth that bulk-replace and removal operations consult.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sone {
    id: SoneId,
    local: bool,
    posts: HashSet<PostId>,
    replies: HashSet<ReplyId>,
}

impl Sone {
    /// Create a Sone with empty post and reply collections.
    pub fn new(id: SoneId, local: bool) -> Self {
        Self {
            id,
            local,
            posts: HashSet::new(),
            replies: HashSet::new(),
        }
    }

    /// The Sone's identifier.
    pub fn id(&self) -> &SoneId {
        &self.id
    }

    /// Whether this Sone lives on the local node.
    pub fn is_local(&self) -> bool {
        self.local
    }

    /// Whether this Sone is a remote identity.
    pub fn is_remote(&self) -> bool {
        !self.local
    }

    /// Ids of all posts this Sone has authored.
    pub fn posts(&self) -> &HashSet<PostId> {
        &self.posts
    }

    /// Ids of all replies this Sone has authored.
    pub fn replies(&self) -> &HashSet<ReplyId> {
        &self.replies
    }

    /// Record a post as authored by this Sone.
    pub fn add_post(&mut self, post: PostId) {
        self.posts.insert(post);
    }

    /// Drop a post from this Sone's own collection.
    ///
    /// Returns `true` if the post was present.
    pub fn remove_post(&mut self, post: &PostId) -> bool {
        self.posts.remove(post)
    }

    /// Replace the entire post collection. Used by bulk-replace operations.
    pub fn set_posts(&mut self, posts: impl IntoIterator<Item = PostId>) {
        self.posts = posts.into_iter().collect();
    }

    /// Record a reply as authored by this Sone.
    pub fn add_reply(&mut self, reply: ReplyId) {
        self.replies.insert(reply);
    }

    /// Drop a reply from this Sone's own collection.
    ///
    /// Returns `true` if the reply was present.
    pub fn remove_reply(&mut self, reply: &ReplyId) -> bool {
        self.replies.remove(reply)
    }

    /// Replace the entire reply collection. Used by bulk-replace operations.
    pub fn set_replies(&mut self, replies: impl IntoIterator<Item = ReplyId>) {
        self.replies = replies.into_iter().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sone_owns_nothing() {
        let sone = Sone::new(SoneId::new("s1"), true);
        assert!(sone.posts().is_empty());
        assert!(sone.replies().is_empty());
        assert!(sone.is_local());
        assert!(!sone.is_remote());
    }

    #[test]
    fn add_and_remove_post() {
        let mut sone = Sone::new(SoneId::new("s1"), false);
        let post = PostId::new("p1");
        sone.add_post(post.clone());
        assert!(sone.posts().contains(&post));

        assert!(sone.remove_post(&post));
        assert!(!sone.remove_post(&post));
        assert!(sone.posts().is_empty());
    }

    #[test]
    fn set_posts_replaces_collection() {
        let mut sone = Sone::new(SoneId::new("s1"), true);
        sone.add_post(PostId::new("old"));
        sone.set_posts([PostId::new("a"), PostId::new("b")]);
        assert_eq!(sone.posts().len(), 2);
        assert!(!sone.posts().contains(&PostId::new("old")));
    }

    #[test]
    fn add_and_remove_reply() {
        let mut sone = Sone::new(SoneId::new("s1"), false);
        let reply = ReplyId::new("r1");
        sone.add_reply(reply.clone());
        assert!(sone.replies().contains(&reply));
        assert!(sone.remove_reply(&reply));
        assert!(sone.replies().is_empty());
    }
}
