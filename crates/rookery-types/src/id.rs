//! Opaque string identifiers for every entity kind.
//!
//! Ids are plain strings on the wire (federated peers assign them), but each
//! entity kind gets its own newtype so that a [`PostId`] can never be passed
//! where an [`AlbumId`] is expected. Locally created entities use random
//! UUID v4 ids.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Create a random identifier (UUID v4) for locally created entities.
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// The raw string form.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

id_type! {
    /// Identifier of a [`Sone`](crate::Sone) (author identity).
    SoneId
}

id_type! {
    /// Identifier of a [`Post`](crate::Post).
    PostId
}

id_type! {
    /// Identifier of a [`PostReply`](crate::PostReply).
    ReplyId
}

id_type! {
    /// Identifier of an [`Album`](crate::Album).
    AlbumId
}

id_type! {
    /// Identifier of an [`Image`](crate::Image).
    ImageId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_unique() {
        let id1 = PostId::random();
        let id2 = PostId::random();
        assert_ne!(id1, id2);
    }

    #[test]
    fn as_str_returns_wrapped_string() {
        let id = SoneId::new("sone-1");
        assert_eq!(id.as_str(), "sone-1");
    }

    #[test]
    fn display_is_raw_string() {
        let id = AlbumId::new("album-7");
        assert_eq!(id.to_string(), "album-7");
    }

    #[test]
    fn ordering_follows_string_order() {
        let a = ReplyId::new("aaa");
        let b = ReplyId::new("bbb");
        assert!(a < b);
    }

    #[test]
    fn serde_is_transparent() {
        let id = ImageId::new("img-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"img-1\"");
        let parsed: ImageId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
