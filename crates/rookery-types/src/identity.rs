use serde::{Deserialize, Serialize};

use crate::id::SoneId;

/// A known remote identity.
///
/// Identities arrive from the federation layer before (or without) a full
/// [`Sone`](crate::Sone) being materialized for them. The content store only
/// keeps an identity table for lookup; it never interprets the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Identifier, shared with the Sone this identity backs.
    pub id: SoneId,
    /// Human-readable nickname.
    pub nickname: String,
}

impl Identity {
    pub fn new(id: SoneId, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
        }
    }
}
