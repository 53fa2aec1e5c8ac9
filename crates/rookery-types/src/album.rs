use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::AlbumId;

/// A hierarchical container of images and child albums.
///
/// Parent links form a forest: a root album has no parent, every other album
/// has exactly one. The ordering of an album among its siblings, and of the
/// images inside it, is maintained by the content store, not by the album
/// itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Unique identifier.
    pub id: AlbumId,
    /// Parent album, `None` for roots.
    pub parent: Option<AlbumId>,
    /// Album title.
    pub title: String,
    /// Album description.
    pub description: String,
}

/// Validating builder for [`Album`].
#[derive(Debug, Default)]
pub struct AlbumBuilder {
    id: Option<AlbumId>,
    parent: Option<AlbumId>,
    title: Option<String>,
    description: Option<String>,
}

impl AlbumBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit id (e.g. one received from a remote node).
    pub fn with_id(mut self, id: AlbumId) -> Self {
        self.id = Some(id);
        self
    }

    /// Use a freshly generated random id.
    pub fn random_id(mut self) -> Self {
        self.id = Some(AlbumId::random());
        self
    }

    /// Nest the album under a parent. Omit for a root album.
    pub fn under(mut self, parent: AlbumId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// The album title. Required.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The album description. Defaults to empty.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate and build the album.
    pub fn build(self) -> Result<Album, TypeError> {
        let id = self.id.ok_or(TypeError::MissingField("id"))?;
        if id.as_str().is_empty() {
            return Err(TypeError::EmptyId);
        }
        Ok(Album {
            id,
            parent: self.parent,
            title: self.title.ok_or(TypeError::MissingField("title"))?,
            description: self.description.unwrap_or_default(),
        })
    }
}
