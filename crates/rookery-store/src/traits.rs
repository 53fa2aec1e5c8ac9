//! The [`Database`] trait defining the content store interface.
//!
//! Callers — web controllers, the synchronization layer, import logic — see
//! the store only through this trait. Implementations must keep every
//! secondary index consistent with its primary table within each operation:
//! no caller may ever observe a post that its author index does not list, or
//! an index entry whose entity is gone.

use rookery_types::{
    Album, AlbumId, Identity, Image, ImageId, Post, PostId, PostReply, ReplyId, Sone, SoneId,
};

use crate::error::StoreResult;

/// The content store: primary tables, secondary indices, and known-id marks.
///
/// All reads return explicit present/absent results or (possibly empty)
/// owned collections — never references into internal state, so callers can
/// hold results without holding the store's lock. Absent lookups are not
/// errors.
pub trait Database: Send + Sync {
    // ---- Identities and Sones ----

    /// Look up a known identity by id.
    fn get_identity(&self, id: &SoneId) -> StoreResult<Option<Identity>>;

    /// Insert or replace a known identity.
    fn store_identity(&self, identity: Identity) -> StoreResult<()>;

    /// Look up a Sone by id.
    fn get_sone(&self, id: &SoneId) -> StoreResult<Option<Sone>>;

    /// Insert or replace a Sone.
    fn store_sone(&self, sone: Sone) -> StoreResult<()>;

    /// All Sones.
    fn sones(&self) -> StoreResult<Vec<Sone>>;

    /// All local Sones. Always derived fresh from the full Sone table.
    fn local_sones(&self) -> StoreResult<Vec<Sone>>;

    /// All remote Sones. Always derived fresh from the full Sone table.
    fn remote_sones(&self) -> StoreResult<Vec<Sone>>;

    // ---- Posts ----

    /// Look up a post by id.
    fn get_post(&self, id: &PostId) -> StoreResult<Option<Post>>;

    /// All posts authored by the given Sone.
    fn posts_by(&self, sone: &SoneId) -> StoreResult<Vec<Post>>;

    /// All posts directed at the given recipient.
    fn directed_posts(&self, recipient: &SoneId) -> StoreResult<Vec<Post>>;

    /// Insert or replace a post, updating the author and recipient indices.
    fn store_post(&self, post: Post) -> StoreResult<()>;

    /// Remove a post and every index entry referencing it, and drop it from
    /// the author's own post collection. Removing an absent post is a no-op.
    fn remove_post(&self, id: &PostId) -> StoreResult<()>;

    /// Atomically replace all posts attributed to `sone` with `posts`.
    ///
    /// Fails with an invalid-argument error — before any mutation — if any
    /// post's author is not `sone`.
    fn store_posts(&self, sone: &Sone, posts: Vec<Post>) -> StoreResult<()>;

    /// Remove every post the given Sone reports owning, with all related
    /// index entries. The Sone's own post collection is the source of truth.
    fn remove_posts(&self, sone: &Sone) -> StoreResult<()>;

    // ---- Post replies ----

    /// Look up a reply by id.
    fn get_reply(&self, id: &ReplyId) -> StoreResult<Option<PostReply>>;

    /// All replies to the given post, in ascending time order (ties broken
    /// by reply id).
    fn replies_for(&self, post: &PostId) -> StoreResult<Vec<PostReply>>;

    /// All replies authored by the given Sone, in ascending time order (ties
    /// broken by reply id).
    fn replies_by(&self, sone: &SoneId) -> StoreResult<Vec<PostReply>>;

    /// Insert or replace a reply, updating the per-post and per-author
    /// sorted indices.
    fn store_reply(&self, reply: PostReply) -> StoreResult<()>;

    /// Remove a reply and every index entry referencing it, and drop it from
    /// the author's own reply collection. Removing an absent reply is a no-op.
    fn remove_reply(&self, id: &ReplyId) -> StoreResult<()>;

    /// Atomically replace all replies attributed to `sone` with `replies`.
    ///
    /// Fails with an invalid-argument error — before any mutation — if any
    /// reply's author is not `sone`.
    fn store_replies(&self, sone: &Sone, replies: Vec<PostReply>) -> StoreResult<()>;

    /// Remove every reply the given Sone reports owning. The Sone's own
    /// reply collection is the source of truth.
    fn remove_replies(&self, sone: &Sone) -> StoreResult<()>;

    // ---- Albums ----

    /// Look up an album by id.
    fn get_album(&self, id: &AlbumId) -> StoreResult<Option<Album>>;

    /// The child albums of `parent`, in their manually maintained order.
    fn albums_in(&self, parent: &AlbumId) -> StoreResult<Vec<Album>>;

    /// Insert or replace an album. First insertion appends it to its
    /// parent's child list; re-storing keeps its position.
    fn store_album(&self, album: Album) -> StoreResult<()>;

    /// Remove an album and its entries in the ordered indices.
    fn remove_album(&self, id: &AlbumId) -> StoreResult<()>;

    /// Swap the album one position earlier among its siblings. No-op when
    /// already first, or when the album is a root.
    fn move_album_up(&self, id: &AlbumId) -> StoreResult<()>;

    /// Swap the album one position later among its siblings. No-op when
    /// already last, or when the album is a root.
    fn move_album_down(&self, id: &AlbumId) -> StoreResult<()>;

    // ---- Images ----

    /// Look up an image by id.
    fn get_image(&self, id: &ImageId) -> StoreResult<Option<Image>>;

    /// The images of `album`, in their manually maintained order.
    fn images_in(&self, album: &AlbumId) -> StoreResult<Vec<Image>>;

    /// Insert or replace an image. First insertion appends it to its album's
    /// image list; re-storing keeps its position.
    fn store_image(&self, image: Image) -> StoreResult<()>;

    /// Remove an image and its entry in its album's ordered list.
    fn remove_image(&self, id: &ImageId) -> StoreResult<()>;

    /// Swap the image one position earlier in its album. No-op when already
    /// first.
    fn move_image_up(&self, id: &ImageId) -> StoreResult<()>;

    /// Swap the image one position later in its album. No-op when already
    /// last.
    fn move_image_down(&self, id: &ImageId) -> StoreResult<()>;

    // ---- Known marks ----

    /// Whether the given post id is marked known. Independent of whether the
    /// post itself is present.
    fn is_post_known(&self, id: &PostId) -> StoreResult<bool>;

    /// Mark or unmark a post id as known. Idempotent.
    fn set_post_known(&self, id: &PostId, known: bool) -> StoreResult<()>;

    /// Whether the given reply id is marked known.
    fn is_reply_known(&self, id: &ReplyId) -> StoreResult<bool>;

    /// Mark a reply id as known. Idempotent. There is deliberately no unset:
    /// reply known-marks only ever accumulate until the set is reloaded.
    fn set_reply_known(&self, id: &ReplyId) -> StoreResult<()>;
}
