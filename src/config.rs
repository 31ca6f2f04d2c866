//! Job-scoped configuration shared across factories and backends.

use crate::Result;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Mutable string-keyed configuration for a job or process.
///
/// A `Config` is a cheap-to-clone handle over shared storage: every clone
/// reads and writes the same underlying map, mirroring how a single
/// configuration object is passed by reference through a factory registry.
/// Individual `get`/`set` operations are atomic; no ordering is coordinated
/// across keys.
///
/// Once a key holds a value it is treated as authoritative: use
/// [`set_if_absent`](Config::set_if_absent) when filling in discovered or
/// ambient values so explicit settings are never overwritten.
///
/// # Example
///
/// ```
/// use storemux::Config;
///
/// let config = Config::new()
///     .with_entry("fs.gcs.accessKeyId", "AKID");
///
/// assert_eq!(config.get("fs.gcs.accessKeyId").as_deref(), Some("AKID"));
///
/// // Ambient fallback never overrides an explicit value.
/// let filled = config.set_if_absent("fs.gcs.accessKeyId", "OTHER");
/// assert!(!filled);
/// assert_eq!(config.get("fs.gcs.accessKeyId").as_deref(), Some("AKID"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON object of string keys and values.
    ///
    /// # Errors
    ///
    /// Returns [`StoremuxError::Json`](crate::StoremuxError::Json) if the
    /// input is not a flat JSON object of strings.
    ///
    /// # Example
    ///
    /// ```
    /// use storemux::Config;
    ///
    /// let config = Config::from_json(r#"{"fs.gcs.accessKeyId": "AKID"}"#)?;
    /// assert_eq!(config.get("fs.gcs.accessKeyId").as_deref(), Some("AKID"));
    /// # Ok::<(), storemux::StoremuxError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Sets an entry, builder-style. Overwrites any existing value.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    /// Returns true if `key` holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().unwrap().contains_key(key)
    }

    /// Sets `key` to `value`, overwriting any existing value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().unwrap().insert(key.into(), value.into());
    }

    /// Sets `key` to `value` only if the key holds no value yet.
    ///
    /// Returns true if the value was written. This is the primitive behind
    /// ambient credential filling: an explicit value always wins over a
    /// discovered one.
    pub fn set_if_absent(&self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let mut entries = self.entries.write().unwrap();
        match entries.entry(key.into()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
        }
    }

    /// Returns a point-in-time copy of all entries.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().unwrap().clone()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns true if the configuration holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl FromIterator<(String, String)> for Config {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: Arc::new(RwLock::new(iter.into_iter().collect())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let config = Config::new();
        let alias = config.clone();

        alias.set("k", "v");
        assert_eq!(config.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_set_if_absent() {
        let config = Config::new();

        assert!(config.set_if_absent("k", "first"));
        assert!(!config.set_if_absent("k", "second"));
        assert_eq!(config.get("k").as_deref(), Some("first"));
    }

    #[test]
    fn test_set_overwrites() {
        let config = Config::new().with_entry("k", "old");
        config.set("k", "new");
        assert_eq!(config.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn test_from_json() {
        let config = Config::from_json(r#"{"a": "1", "b": "2"}"#).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_from_json_rejects_non_string_values() {
        assert!(Config::from_json(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let config = Config::new().with_entry("k", "v");
        let snap = config.snapshot();

        config.set("k", "changed");
        assert_eq!(snap.get("k").map(String::as_str), Some("v"));
    }
}
