use thiserror::Error;

/// Errors from configuration backends.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error from the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is malformed or cannot be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A lock guarding the configuration was poisoned.
    #[error("configuration lock poisoned")]
    LockPoisoned,
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
