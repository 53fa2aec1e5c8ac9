//! Key-value configuration backends for Rookery.
//!
//! The content store persists its known-id sets through the narrow
//! [`Configuration`] contract: string values addressed by string keys, where
//! writing an absent value removes the key. Keys are flat strings; callers
//! impose structure through conventions like `KnownPosts/<n>/ID`.
//!
//! # Backends
//!
//! - [`MemoryConfiguration`] — `HashMap`-based, for tests and embedding
//! - [`JsonConfiguration`] — a flat JSON object on disk, written atomically
//!   through a temp file on every change

pub mod error;
pub mod json;
pub mod memory;
pub mod traits;

pub use error::{ConfigError, ConfigResult};
pub use json::JsonConfiguration;
pub use memory::MemoryConfiguration;
pub use traits::Configuration;
