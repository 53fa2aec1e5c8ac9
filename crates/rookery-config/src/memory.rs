use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{ConfigError, ConfigResult};
use crate::traits::Configuration;

/// In-memory configuration for tests and embedding.
///
/// All values live in a `HashMap` behind a `RwLock`. Data is lost when the
/// configuration is dropped.
#[derive(Debug, Default)]
pub struct MemoryConfiguration {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryConfiguration {
    /// Create a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set. Counts zero if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.values.read().map(|values| values.len()).unwrap_or(0)
    }

    /// Returns `true` if no keys are set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Configuration for MemoryConfiguration {
    fn get_string(&self, key: &str) -> ConfigResult<Option<String>> {
        let values = self.values.read().map_err(|_| ConfigError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set_string(&self, key: &str, value: Option<&str>) -> ConfigResult<()> {
        let mut values = self.values.write().map_err(|_| ConfigError::LockPoisoned)?;
        match value {
            Some(value) => {
                values.insert(key.to_string(), value.to_string());
            }
            None => {
                values.remove(key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_unset_key_returns_none() {
        let config = MemoryConfiguration::new();
        assert!(config.get_string("missing").unwrap().is_none());
    }

    #[test]
    fn set_and_get_roundtrip() {
        let config = MemoryConfiguration::new();
        config.set_string("a/0/ID", Some("x")).unwrap();
        assert_eq!(config.get_string("a/0/ID").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn set_none_removes_key() {
        let config = MemoryConfiguration::new();
        config.set_string("key", Some("value")).unwrap();
        config.set_string("key", None).unwrap();
        assert!(config.get_string("key").unwrap().is_none());
        assert!(config.is_empty());
    }

    #[test]
    fn overwrite_replaces_value() {
        let config = MemoryConfiguration::new();
        config.set_string("key", Some("old")).unwrap();
        config.set_string("key", Some("new")).unwrap();
        assert_eq!(config.get_string("key").unwrap().as_deref(), Some("new"));
        assert_eq!(config.len(), 1);
    }
}
