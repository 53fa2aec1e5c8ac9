//! Foundation types for Rookery.
//!
//! This crate provides the identifiers, timestamps, and entity types shared by
//! every other Rookery crate. The entities model the social-graph content of a
//! federated content-sharing node:
//!
//! - [`Sone`] — an author identity that owns its posts and replies
//! - [`Post`] — content authored by a Sone, optionally directed at a recipient
//! - [`PostReply`] — a reply attached to exactly one post
//! - [`Album`] — a hierarchical container of child albums and images
//! - [`Image`] — a leaf content item owned by exactly one album
//! - [`Identity`] — a known remote identity record
//!
//! Entities carry an immutable identity (their id) and plain content fields.
//! They are constructed through validating builders ([`PostBuilder`],
//! [`PostReplyBuilder`], [`AlbumBuilder`], [`ImageBuilder`]) and handed to the
//! content store, which owns indexing but never entity content.

pub mod album;
pub mod error;
pub mod id;
pub mod identity;
pub mod image;
pub mod post;
pub mod reply;
pub mod sone;
pub mod timestamp;

pub use album::{Album, AlbumBuilder};
pub use error::TypeError;
pub use id::{AlbumId, ImageId, PostId, ReplyId, SoneId};
pub use identity::Identity;
pub use image::{Image, ImageBuilder};
pub use post::{Post, PostBuilder};
pub use reply::{PostReply, PostReplyBuilder};
pub use sone::Sone;
pub use timestamp::Timestamp;
