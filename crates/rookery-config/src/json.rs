use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::traits::Configuration;

/// File-backed configuration stored as a flat JSON object.
///
/// The full map is loaded at open and held in memory; every change is written
/// back through a temp file in the same directory and atomically renamed over
/// the target, so a crash can never leave a half-written file behind.
#[derive(Debug)]
pub struct JsonConfiguration {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl JsonConfiguration {
    /// Open a configuration file, creating an empty one on first use.
    pub fn open(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)
                .map_err(|e| ConfigError::Serialization(e.to_string()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> ConfigResult<()> {
        let encoded = serde_json::to_string_pretty(values)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let tmp = tempfile::NamedTempFile::new_in(dir)?;
        fs::write(tmp.path(), encoded)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), keys = values.len(), "configuration persisted");
        Ok(())
    }
}

impl Configuration for JsonConfiguration {
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
        self.persist(&values)
    }
}
