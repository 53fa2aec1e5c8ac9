//! Persisted "known" id sets.
//!
//! Downstream logic (notification suppression, sync dedup) marks post and
//! reply ids as already processed. The marks are deliberately decoupled from
//! entity lifetime: a known id stays known after its entity is removed, and
//! ids can be marked known before their entity ever arrives.

use std::collections::HashSet;

use tracing::debug;

use rookery_config::{ConfigResult, Configuration};

/// A set of entity ids persisted through the configuration collaborator.
///
/// On disk the set is a densely packed, zero-based sequence of keys
/// `<Prefix>/<n>/ID`. Loading stops at the first missing index; saving writes
/// the set back in that form and then removes the key one past the last real
/// entry, truncating any longer sequence left over from a previous run.
#[derive(Debug)]
pub struct KnownIds {
    prefix: &'static str,
    ids: HashSet<String>,
}

impl KnownIds {
    /// Create an empty set persisted under the given key prefix.
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            ids: HashSet::new(),
        }
    }

    /// Whether the given id is marked known.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Mark an id as known. Idempotent.
    pub fn insert(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Clear the known mark for an id. Idempotent.
    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
    }

    /// Number of known ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no ids are known.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Replace the in-memory set with the sequence stored in `config`.
    pub fn load(&mut self, config: &dyn Configuration) -> ConfigResult<()> {
        let mut loaded = HashSet::new();
        for index in 0.. {
            match config.get_string(&self.key(index))? {
                Some(id) => {
                    loaded.insert(id);
                }
                None => break,
            }
        }
        debug!(prefix = self.prefix, count = loaded.len(), "known ids loaded");
        self.ids = loaded;
        Ok(())
    }

    /// Write the in-memory set back to `config`.
    ///
    /// Ids are written in sorted order so the stored form is deterministic.
    /// The key immediately past the last entry is cleared so that a longer
    /// sequence from an earlier run cannot leak back in on the next load.
    pub fn save(&self, config: &dyn Configuration) -> ConfigResult<()> {
        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        for (index, id) in ids.iter().enumerate() {
            config.set_string(&self.key(index), Some(id))?;
        }
        config.set_string(&self.key(ids.len()), None)?;
        debug!(prefix = self.prefix, count = ids.len(), "known ids saved");
        Ok(())
    }

    fn key(&self, index: usize) -> String {
        format!("{}/{}/ID", self.prefix, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rookery_config::MemoryConfiguration;

    #[test]
    fn insert_and_contains() {
        let mut known = KnownIds::new("KnownPosts");
        assert!(!known.contains("x"));
        known.insert("x");
        known.insert("x");
        assert!(known.contains("x"));
        assert_eq!(known.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut known = KnownIds::new("KnownPosts");
        known.insert("x");
        known.remove("x");
        known.remove("x");
        assert!(known.is_empty());
    }

    #[test]
    fn save_writes_enumerated_keys_and_sentinel() {
        let config = MemoryConfiguration::new();
        let mut known = KnownIds::new("KnownPosts");
        known.insert("a");
        known.insert("b");

        known.save(&config).unwrap();

        assert_eq!(config.get_string("KnownPosts/0/ID").unwrap().as_deref(), Some("a"));
        assert_eq!(config.get_string("KnownPosts/1/ID").unwrap().as_deref(), Some("b"));
        assert!(config.get_string("KnownPosts/2/ID").unwrap().is_none());
    }

    #[test]
    fn load_stops_at_first_gap() {
        let config = MemoryConfiguration::new();
        config.set_string("KnownReplies/0/ID", Some("r0")).unwrap();
        config.set_string("KnownReplies/1/ID", Some("r1")).unwrap();
        // Index 2 is missing; index 3 must be unreachable.
        config.set_string("KnownReplies/3/ID", Some("stale")).unwrap();

        let mut known = KnownIds::new("KnownReplies");
        known.load(&config).unwrap();

        assert_eq!(known.len(), 2);
        assert!(known.contains("r0"));
        assert!(known.contains("r1"));
        assert!(!known.contains("stale"));
    }

    #[test]
    fn save_truncates_longer_previous_sequence() {
        let config = MemoryConfiguration::new();
        let mut long = KnownIds::new("KnownPosts");
        for id in ["a", "b", "c", "d", "e"] {
            long.insert(id);
        }
        long.save(&config).unwrap();

        let mut short = KnownIds::new("KnownPosts");
        short.insert("z");
        short.save(&config).unwrap();

        let mut reloaded = KnownIds::new("KnownPosts");
        reloaded.load(&config).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.contains("z"));
    }

    #[test]
    fn roundtrip_preserves_set() {
        let config = MemoryConfiguration::new();
        let mut known = KnownIds::new("KnownPosts");
        for id in ["x", "y", "z"] {
            known.insert(id);
        }
        known.save(&config).unwrap();

        let mut reloaded = KnownIds::new("KnownPosts");
        reloaded.load(&config).unwrap();
        for id in ["x", "y", "z"] {
            assert!(reloaded.contains(id));
        }
        assert_eq!(reloaded.len(), 3);
    }
}
