use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::{AlbumId, ImageId};

/// A leaf content item owned by exactly one album.
///
/// The image's position among its siblings is maintained by the content
/// store's ordered per-album index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Unique identifier.
    pub id: ImageId,
    /// The owning album.
    pub album: AlbumId,
    /// Image title.
    pub title: String,
    /// Image description.
    pub description: String,
}

/// Validating builder for [`Image`].
#[derive(Debug, Default)]
pub struct ImageBuilder {
    id: Option<ImageId>,
    album: Option<AlbumId>,
    title: Option<String>,
    description: Option<String>,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit id (e.g. one received from a remote node).
    pub fn with_id(mut self, id: ImageId) -> Self {
        self.id = Some(id);
        self
    }

    /// Use a freshly generated random id.
    pub fn random_id(mut self) -> Self {
        self.id = Some(ImageId::random());
        self
    }

    /// The owning album. Required.
    pub fn in_album(mut self, album: AlbumId) -> Self {
        self.album = Some(album);
        self
    }

    /// The image title. Required.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The image description. Defaults to empty.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate and build the image.
    pub fn build(self) -> Result<Image, TypeError> {
        let id = self.id.ok_or(TypeError::MissingField("id"))?;
        if id.as_str().is_empty() {
            return Err(TypeError::EmptyId);
        }
        Ok(Image {
            id,
            album: self.album.ok_or(TypeError::MissingField("album"))?,
            title: self.title.ok_or(TypeError::MissingField("title"))?,
            description: self.description.unwrap_or_default(),
        })
    }
}
