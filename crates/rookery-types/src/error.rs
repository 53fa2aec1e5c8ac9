use thiserror::Error;

/// Errors produced by type construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A builder was finalized without a required field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An identifier string was empty.
    #[error("identifier must not be empty")]
    EmptyId,
}
