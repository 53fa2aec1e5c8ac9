use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use rookery_config::Configuration;
use rookery_types::{
    Album, AlbumId, Identity, Image, ImageId, Post, PostId, PostReply, ReplyId, Sone, SoneId,
    Timestamp,
};

use crate::error::{StoreError, StoreResult};
use crate::known::KnownIds;
use crate::service::ServiceState;
use crate::traits::Database;

/// Sort key for reply indices: creation time first, reply id second.
///
/// The id component makes the order total, so replies with equal timestamps
/// always iterate in the same order.
type ReplyKey = (Timestamp, ReplyId);

const KNOWN_POSTS_PREFIX: &str = "KnownPosts";
const KNOWN_REPLIES_PREFIX: &str = "KnownReplies";

/// In-memory implementation of [`Database`].
///
/// Every primary table, every secondary index, both known-id sets, and the
/// lifecycle state live in one `StoreState` behind a single `RwLock`. Write
/// operations update a primary table and all of its derived indices inside
/// the same critical section; read operations copy out of a consistent
/// snapshot. Coarse, but it makes torn index state impossible.
pub struct MemoryContentStore {
    config: Arc<dyn Configuration>,
    state: RwLock<StoreState>,
}

struct StoreState {
    service: ServiceState,

    identities: HashMap<SoneId, Identity>,
    sones: HashMap<SoneId, Sone>,

    posts: HashMap<PostId, Post>,
    sone_posts: HashMap<SoneId, HashSet<PostId>>,
    recipient_posts: HashMap<SoneId, HashSet<PostId>>,
    known_posts: KnownIds,

    replies: HashMap<ReplyId, PostReply>,
    post_replies: HashMap<PostId, BTreeSet<ReplyKey>>,
    sone_replies: HashMap<SoneId, BTreeSet<ReplyKey>>,
    known_replies: KnownIds,

    albums: HashMap<AlbumId, Album>,
    album_children: HashMap<AlbumId, Vec<AlbumId>>,

    images: HashMap<ImageId, Image>,
    album_images: HashMap<AlbumId, Vec<ImageId>>,
}

impl StoreState {
    fn new() -> Self {
        Self {
            service: ServiceState::Created,
            identities: HashMap::new(),
            sones: HashMap::new(),
            posts: HashMap::new(),
            sone_posts: HashMap::new(),
            recipient_posts: HashMap::new(),
            known_posts: KnownIds::new(KNOWN_POSTS_PREFIX),
            replies: HashMap::new(),
            post_replies: HashMap::new(),
            sone_replies: HashMap::new(),
            known_replies: KnownIds::new(KNOWN_REPLIES_PREFIX),
            albums: HashMap::new(),
            album_children: HashMap::new(),
            images: HashMap::new(),
            album_images: HashMap::new(),
        }
    }

    /// Insert a post into the primary table and every derived index.
    fn index_post(&mut self, post: Post) {
        self.sone_posts
            .entry(post.sone.clone())
            .or_default()
            .insert(post.id.clone());
        if let Some(recipient) = &post.recipient {
            // The recipient entry is created lazily on the first directed
            // post and then kept, even if it later becomes empty.
            self.recipient_posts
                .entry(recipient.clone())
                .or_default()
                .insert(post.id.clone());
        }
        self.posts.insert(post.id.clone(), post);
    }

    /// Remove a post from the primary table and every derived index.
    ///
    /// A no-op for absent ids: related removals may already have pruned the
    /// entry. Does not touch the author's own post collection; the calling
    /// operation decides whether the owner must be updated.
    fn unindex_post(&mut self, id: &PostId) -> Option<Post> {
        let post = self.posts.remove(id)?;
        if let Some(ids) = self.sone_posts.get_mut(&post.sone) {
            ids.remove(id);
            if ids.is_empty() {
                self.sone_posts.remove(&post.sone);
            }
        }
        if let Some(recipient) = &post.recipient {
            if let Some(ids) = self.recipient_posts.get_mut(recipient) {
                ids.remove(id);
            }
        }
        Some(post)
    }

    /// Insert a reply into the primary table and both sorted indices.
    fn index_reply(&mut self, reply: PostReply) {
        let key = (reply.time, reply.id.clone());
        self.post_replies
            .entry(reply.post.clone())
            .or_default()
            .insert(key.clone());
        self.sone_replies
            .entry(reply.sone.clone())
            .or_default()
            .insert(key);
        self.replies.insert(reply.id.clone(), reply);
    }

    /// Remove a reply from the primary table and both sorted indices.
    ///
    /// A no-op for absent ids, like [`unindex_post`](Self::unindex_post).
    fn unindex_reply(&mut self, id: &ReplyId) -> Option<PostReply> {
        let reply = self.replies.remove(id)?;
        let key = (reply.time, reply.id.clone());
        if let Some(keys) = self.post_replies.get_mut(&reply.post) {
            keys.remove(&key);
            if keys.is_empty() {
                self.post_replies.remove(&reply.post);
            }
        }
        if let Some(keys) = self.sone_replies.get_mut(&reply.sone) {
            keys.remove(&key);
            if keys.is_empty() {
                self.sone_replies.remove(&reply.sone);
            }
        }
        Some(reply)
    }
}

impl MemoryContentStore {
    /// Create a store that persists its known-id sets through `config`.
    pub fn new(config: Arc<dyn Configuration>) -> Self {
        Self {
            config,
            state: RwLock::new(StoreState::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Current lifecycle state.
    pub fn service_state(&self) -> StoreResult<ServiceState> {
        Ok(self.read()?.service)
    }

    /// Start the store: load both known-id sets and transition to running.
    pub fn start(&self) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.service != ServiceState::Created {
            return Err(StoreError::WrongState {
                expected: ServiceState::Created,
                actual: state.service,
            });
        }
        state.known_posts.load(self.config.as_ref())?;
        state.known_replies.load(self.config.as_ref())?;
        state.service = ServiceState::Running;
        info!(
            known_posts = state.known_posts.len(),
            known_replies = state.known_replies.len(),
            "content store started"
        );
        Ok(())
    }

    /// Stop the store: save both known-id sets and transition to stopped.
    ///
    /// A persistence failure transitions the store to the failed state and
    /// surfaces the error to the caller.
    pub fn stop(&self) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.service != ServiceState::Running {
            return Err(StoreError::WrongState {
                expected: ServiceState::Running,
                actual: state.service,
            });
        }
        let saved = state
            .known_posts
            .save(self.config.as_ref())
            .and_then(|()| state.known_replies.save(self.config.as_ref()));
        match saved {
            Ok(()) => {
                state.service = ServiceState::Stopped;
                info!("content store stopped");
                Ok(())
            }
            Err(error) => {
                state.service = ServiceState::Failed;
                warn!(%error, "shutdown persistence failed");
                Err(error.into())
            }
        }
    }

    /// Write both known-id sets to the configuration without a lifecycle
    /// transition. `stop` calls this implicitly.
    pub fn save(&self) -> StoreResult<()> {
        let state = self.read()?;
        state.known_posts.save(self.config.as_ref())?;
        state.known_replies.save(self.config.as_ref())?;
        Ok(())
    }
}

impl Database for MemoryContentStore {
    // ---- Identities and Sones ----

    fn get_identity(&self, id: &SoneId) -> StoreResult<Option<Identity>> {
        Ok(self.read()?.identities.get(id).cloned())
    }

    fn store_identity(&self, identity: Identity) -> StoreResult<()> {
        self.write()?
            .identities
            .insert(identity.id.clone(), identity);
        Ok(())
    }

    fn get_sone(&self, id: &SoneId) -> StoreResult<Option<Sone>> {
        Ok(self.read()?.sones.get(id).cloned())
    }

    fn store_sone(&self, sone: Sone) -> StoreResult<()> {
        self.write()?.sones.insert(sone.id().clone(), sone);
        Ok(())
    }

    fn sones(&self) -> StoreResult<Vec<Sone>> {
        Ok(self.read()?.sones.values().cloned().collect())
    }

    fn local_sones(&self) -> StoreResult<Vec<Sone>> {
        Ok(self
            .read()?
            .sones
            .values()
            .filter(|sone| sone.is_local())
            .cloned()
            .collect())
    }

    fn remote_sones(&self) -> StoreResult<Vec<Sone>> {
        Ok(self
            .read()?
            .sones
            .values()
            .filter(|sone| sone.is_remote())
            .cloned()
            .collect())
    }

    // ---- Posts ----

    fn get_post(&self, id: &PostId) -> StoreResult<Option<Post>> {
        Ok(self.read()?.posts.get(id).cloned())
    }

    fn posts_by(&self, sone: &SoneId) -> StoreResult<Vec<Post>> {
        let state = self.read()?;
        Ok(state
            .sone_posts
            .get(sone)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.posts.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn directed_posts(&self, recipient: &SoneId) -> StoreResult<Vec<Post>> {
        let state = self.read()?;
        Ok(state
            .recipient_posts
            .get(recipient)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.posts.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn store_post(&self, post: Post) -> StoreResult<()> {
        let mut state = self.write()?;
        // Replacing a post by id must not leave index entries of the old
        // version behind (its author or recipient may have changed).
        state.unindex_post(&post.id);
        state.index_post(post);
        Ok(())
    }

    fn remove_post(&self, id: &PostId) -> StoreResult<()> {
        let mut state = self.write()?;
        if let Some(post) = state.unindex_post(id) {
            if let Some(owner) = state.sones.get_mut(&post.sone) {
                owner.remove_post(id);
            }
        }
        Ok(())
    }

    fn store_posts(&self, sone: &Sone, posts: Vec<Post>) -> StoreResult<()> {
        // Validate before any mutation: a failed bulk replace leaves the
        // store untouched.
        for post in &posts {
            if post.sone != *sone.id() {
                return Err(StoreError::InvalidArgument(format!(
                    "post {} from different sone {}",
                    post.id, post.sone
                )));
            }
        }

        let mut state = self.write()?;
        let previous: Vec<PostId> = state
            .sone_posts
            .get(sone.id())
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default();
        for id in &previous {
            state.unindex_post(id);
        }

        let new_ids: Vec<PostId> = posts.iter().map(|post| post.id.clone()).collect();
        for post in posts {
            state.index_post(post);
        }
        if let Some(owner) = state.sones.get_mut(sone.id()) {
            owner.set_posts(new_ids);
        }
        Ok(())
    }

    fn remove_posts(&self, sone: &Sone) -> StoreResult<()> {
        let mut state = self.write()?;
        // The Sone's own collection is the source of truth here.
        for id in sone.posts() {
            state.unindex_post(id);
        }
        state.sone_posts.remove(sone.id());
        if let Some(owner) = state.sones.get_mut(sone.id()) {
            owner.set_posts([]);
        }
        Ok(())
    }

    // ---- Post replies ----

    fn get_reply(&self, id: &ReplyId) -> StoreResult<Option<PostReply>> {
        Ok(self.read()?.replies.get(id).cloned())
    }

    fn replies_for(&self, post: &PostId) -> StoreResult<Vec<PostReply>> {
        let state = self.read()?;
        Ok(state
            .post_replies
            .get(post)
            .map(|keys| {
                keys.iter()
                    .filter_map(|(_, id)| state.replies.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn replies_by(&self, sone: &SoneId) -> StoreResult<Vec<PostReply>> {
        let state = self.read()?;
        Ok(state
            .sone_replies
            .get(sone)
            .map(|keys| {
                keys.iter()
                    .filter_map(|(_, id)| state.replies.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn store_reply(&self, reply: PostReply) -> StoreResult<()> {
        let mut state = self.write()?;
        state.unindex_reply(&reply.id);
        state.index_reply(reply);
        Ok(())
    }

    fn remove_reply(&self, id: &ReplyId) -> StoreResult<()> {
        let mut state = self.write()?;
        if let Some(reply) = state.unindex_reply(id) {
            if let Some(owner) = state.sones.get_mut(&reply.sone) {
                owner.remove_reply(id);
            }
        }
        Ok(())
    }

    fn store_replies(&self, sone: &Sone, replies: Vec<PostReply>) -> StoreResult<()> {
        for reply in &replies {
            if reply.sone != *sone.id() {
                return Err(StoreError::InvalidArgument(format!(
                    "reply {} from different sone {}",
                    reply.id, reply.sone
                )));
            }
        }

        let mut state = self.write()?;
        let previous: Vec<ReplyId> = state
            .sone_replies
            .get(sone.id())
            .map(|keys| keys.iter().map(|(_, id)| id.clone()).collect())
            .unwrap_or_default();
        for id in &previous {
            state.unindex_reply(id);
        }

        let new_ids: Vec<ReplyId> = replies.iter().map(|reply| reply.id.clone()).collect();
        for reply in replies {
            state.index_reply(reply);
        }
        if let Some(owner) = state.sones.get_mut(sone.id()) {
            owner.set_replies(new_ids);
        }
        Ok(())
    }

    fn remove_replies(&self, sone: &Sone) -> StoreResult<()> {
        let mut state = self.write()?;
        for id in sone.replies() {
            state.unindex_reply(id);
        }
        state.sone_replies.remove(sone.id());
        if let Some(owner) = state.sones.get_mut(sone.id()) {
            owner.set_replies([]);
        }
        Ok(())
    }

    // ---- Albums ----

    fn get_album(&self, id: &AlbumId) -> StoreResult<Option<Album>> {
        Ok(self.read()?.albums.get(id).cloned())
    }

    fn albums_in(&self, parent: &AlbumId) -> StoreResult<Vec<Album>> {
        let state = self.read()?;
        Ok(state
            .album_children
            .get(parent)
            .map(|children| {
                children
                    .iter()
                    .filter_map(|id| state.albums.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn store_album(&self, album: Album) -> StoreResult<()> {
        let mut state = self.write()?;
        // A re-parented album leaves its old sibling list.
        let previous_parent = state.albums.get(&album.id).map(|entry| entry.parent.clone());
        if let Some(previous_parent) = previous_parent {
            if previous_parent != album.parent {
                if let Some(old_parent) = previous_parent {
                    if let Some(children) = state.album_children.get_mut(&old_parent) {
                        children.retain(|id| *id != album.id);
                    }
                }
            }
        }
        if let Some(parent) = &album.parent {
            let children = state.album_children.entry(parent.clone()).or_default();
            // Re-storing keeps the album's position.
            if !children.contains(&album.id) {
                children.push(album.id.clone());
            }
        }
        state.albums.insert(album.id.clone(), album);
        Ok(())
    }

    fn remove_album(&self, id: &AlbumId) -> StoreResult<()> {
        let mut state = self.write()?;
        if let Some(album) = state.albums.remove(id) {
            if let Some(parent) = &album.parent {
                if let Some(children) = state.album_children.get_mut(parent) {
                    children.retain(|child| child != id);
                }
            }
            state.album_children.remove(id);
            state.album_images.remove(id);
        }
        Ok(())
    }

    fn move_album_up(&self, id: &AlbumId) -> StoreResult<()> {
        let mut state = self.write()?;
        let Some(parent) = state.albums.get(id).and_then(|album| album.parent.clone()) else {
            return Ok(());
        };
        if let Some(children) = state.album_children.get_mut(&parent) {
            if let Some(position) = children.iter().position(|child| child == id) {
                if position > 0 {
                    children.swap(position, position - 1);
                }
            }
        }
        Ok(())
    }

    fn move_album_down(&self, id: &AlbumId) -> StoreResult<()> {
        let mut state = self.write()?;
        let Some(parent) = state.albums.get(id).and_then(|album| album.parent.clone()) else {
            return Ok(());
        };
        if let Some(children) = state.album_children.get_mut(&parent) {
            if let Some(position) = children.iter().position(|child| child == id) {
                if position + 1 < children.len() {
                    children.swap(position, position + 1);
                }
            }
        }
        Ok(())
    }

    // ---- Images ----

    fn get_image(&self, id: &ImageId) -> StoreResult<Option<Image>> {
        Ok(self.read()?.images.get(id).cloned())
    }

    fn images_in(&self, album: &AlbumId) -> StoreResult<Vec<Image>> {
        let state = self.read()?;
        Ok(state
            .album_images
            .get(album)
            .map(|images| {
                images
                    .iter()
                    .filter_map(|id| state.images.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn store_image(&self, image: Image) -> StoreResult<()> {
        let mut state = self.write()?;
        let previous_album = state.images.get(&image.id).map(|entry| entry.album.clone());
        if let Some(previous_album) = previous_album {
            if previous_album != image.album {
                if let Some(images) = state.album_images.get_mut(&previous_album) {
                    images.retain(|id| *id != image.id);
                }
            }
        }
        let images = state.album_images.entry(image.album.clone()).or_default();
        if !images.contains(&image.id) {
            images.push(image.id.clone());
        }
        state.images.insert(image.id.clone(), image);
        Ok(())
    }

    fn remove_image(&self, id: &ImageId) -> StoreResult<()> {
        let mut state = self.write()?;
        if let Some(image) = state.images.remove(id) {
            if let Some(images) = state.album_images.get_mut(&image.album) {
                images.retain(|entry| entry != id);
            }
        }
        Ok(())
    }

    fn move_image_up(&self, id: &ImageId) -> StoreResult<()> {
        let mut state = self.write()?;
        let Some(album) = state.images.get(id).map(|image| image.album.clone()) else {
            return Ok(());
        };
        if let Some(images) = state.album_images.get_mut(&album) {
            if let Some(position) = images.iter().position(|entry| entry == id) {
                if position > 0 {
                    images.swap(position, position - 1);
                }
            }
        }
        Ok(())
    }

    fn move_image_down(&self, id: &ImageId) -> StoreResult<()> {
        let mut state = self.write()?;
        let Some(album) = state.images.get(id).map(|image| image.album.clone()) else {
            return Ok(());
        };
        if let Some(images) = state.album_images.get_mut(&album) {
            if let Some(position) = images.iter().position(|entry| entry == id) {
                if position + 1 < images.len() {
                    images.swap(position, position + 1);
                }
            }
        }
        Ok(())
    }

    // ---- Known marks ----

    fn is_post_known(&self, id: &PostId) -> StoreResult<bool> {
        Ok(self.read()?.known_posts.contains(id.as_str()))
    }

    fn set_post_known(&self, id: &PostId, known: bool) -> StoreResult<()> {
        let mut state = self.write()?;
        if known {
            state.known_posts.insert(id.as_str());
        } else {
            state.known_posts.remove(id.as_str());
        }
        Ok(())
    }

    fn is_reply_known(&self, id: &ReplyId) -> StoreResult<bool> {
        Ok(self.read()?.known_replies.contains(id.as_str()))
    }

    fn set_reply_known(&self, id: &ReplyId) -> StoreResult<()> {
        self.write()?.known_replies.insert(id.as_str());
        Ok(())
    }
}

impl std::fmt::Debug for MemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.state.read() {
            Ok(state) => f
                .debug_struct("MemoryContentStore")
                .field("service", &state.service)
                .field("sones", &state.sones.len())
                .field("posts", &state.posts.len())
                .field("replies", &state.replies.len())
                .field("albums", &state.albums.len())
                .field("images", &state.images.len())
                .finish(),
            Err(_) => f
                .debug_struct("MemoryContentStore")
                .field("state", &"<poisoned>")
                .finish(),
        }
    }
}
