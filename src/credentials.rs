//! Ambient credential sources.
//!
//! Factories fall back to a process-wide property store when the job
//! configuration lacks a credential key. That store is injected as a
//! [`CredentialSource`] rather than read as a global, so tests substitute an
//! in-memory source instead of mutating the real environment.

use std::collections::HashMap;

/// A read-only, process-wide source of credential values, queried by fixed
/// configuration key names.
///
/// A source is only ever a fallback filler: factories copy its values into
/// the job configuration with
/// [`Config::set_if_absent`](crate::Config::set_if_absent), so an explicit
/// configuration value always wins.
pub trait CredentialSource: Send + Sync {
    /// Returns the value for `key`, if this source provides one.
    fn get(&self, key: &str) -> Option<String>;
}

/// Credential source backed by the process environment.
///
/// Keys are looked up verbatim as environment variable names.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory credential source for tests and embedded setups.
///
/// # Example
///
/// ```
/// use storemux::{CredentialSource, StaticCredentials};
///
/// let source = StaticCredentials::new()
///     .with("fs.gcs.accessKeyId", "AKID")
///     .with("fs.gcs.secretAccessKey", "SECRET");
///
/// assert_eq!(source.get("fs.gcs.accessKeyId").as_deref(), Some("AKID"));
/// assert_eq!(source.get("unknown"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    values: HashMap<String, String>,
}

impl StaticCredentials {
    /// Creates an empty source (provides no credentials).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key/value pair, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_lookup() {
        let source = StaticCredentials::new().with("k", "v");
        assert_eq!(source.get("k").as_deref(), Some("v"));
        assert_eq!(source.get("missing"), None);
    }

    #[test]
    fn test_env_source_reads_process_environment() {
        // Var name private to this test to avoid cross-test interference.
        std::env::set_var("STOREMUX_TEST_ENV_CRED", "from-env");
        assert_eq!(
            EnvCredentials.get("STOREMUX_TEST_ENV_CRED").as_deref(),
            Some("from-env")
        );
        std::env::remove_var("STOREMUX_TEST_ENV_CRED");

        assert_eq!(EnvCredentials.get("STOREMUX_TEST_ENV_CRED_MISSING"), None);
    }
}
