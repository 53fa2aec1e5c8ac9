//! In-memory content store for Rookery.
//!
//! This crate holds all social-graph content of a node — posts, post replies,
//! albums, images, Sones, and known identities — in primary id-keyed tables
//! with a set of derived secondary indices:
//!
//! - posts by author, posts by recipient
//! - replies by post and by author (time-ordered, ties broken by id)
//! - ordered album children and album images (manually reorderable)
//!
//! A single reader/writer lock guards every table and index as one unit, so a
//! reader can never observe a primary table updated without its dependent
//! indices. Mutations validate first and only then apply, leaving no partial
//! state behind on failure.
//!
//! Two id sets ("known posts", "known replies") survive restarts through the
//! [`Configuration`](rookery_config::Configuration) collaborator; everything
//! else is volatile by design.
//!
//! # Entry points
//!
//! - [`Database`] — the full store API
//! - [`MemoryContentStore`] — the `RwLock`-guarded implementation
//! - [`KnownIds`] — the persisted known-id tracker

pub mod error;
pub mod known;
pub mod memory;
pub mod service;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use known::KnownIds;
pub use memory::MemoryContentStore;
pub use service::ServiceState;
pub use traits::Database;
