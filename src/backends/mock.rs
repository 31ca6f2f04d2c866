//! Mock backend and connector for testing.
//!
//! [`MockBackend`] is a complete in-memory object store with error injection.
//! [`MockConnector`] stands in for a real provider's constructor, recording
//! every invocation so tests can assert how a factory delegated to it.

use crate::{Backend, Config, Connector, Result, StoremuxError, Uri};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// In-memory storage backend.
///
/// Stores objects in a map with support for error injection to simulate
/// failure conditions.
///
/// # Example
///
/// ```
/// use storemux::backends::mock::MockBackend;
/// use storemux::{Backend, StoremuxError};
///
/// #[tokio::main]
/// async fn main() -> storemux::Result<()> {
///     let mut backend = MockBackend::new();
///     backend.set_object("greeting", b"hello").await;
///
///     assert_eq!(backend.read("greeting").await?, b"hello");
///
///     // Test error conditions
///     backend.read_error = Some(StoremuxError::invalid_argument("injected"));
///     assert!(backend.read("greeting").await.is_err());
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockBackend {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,

    /// Error to return from `read()`
    pub read_error: Option<StoremuxError>,
    /// Error to return from `write()`
    pub write_error: Option<StoremuxError>,
    /// Error to return from `delete()`
    pub delete_error: Option<StoremuxError>,
}

impl MockBackend {
    /// Creates a new mock backend with empty storage.
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            read_error: None,
            write_error: None,
            delete_error: None,
        }
    }

    /// Pre-populates the backend with an object.
    ///
    /// Useful for setting up test fixtures.
    pub async fn set_object(&self, key: impl Into<String>, data: impl Into<Vec<u8>>) {
        let mut objects = self.objects.write().await;
        objects.insert(key.into(), data.into());
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let objects = self.objects.read().await;
        Ok(objects.contains_key(key))
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        if let Some(ref err) = self.read_error {
            return Err(StoremuxError::Other(anyhow::anyhow!("{}", err)));
        }

        let objects = self.objects.read().await;
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| StoremuxError::invalid_argument(format!("no such object: {key}")))
    }

    async fn write(&mut self, key: &str, data: &[u8]) -> Result<()> {
        if let Some(ref err) = self.write_error {
            return Err(StoremuxError::Other(anyhow::anyhow!("{}", err)));
        }

        let mut objects = self.objects.write().await;
        objects.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let objects = self.objects.read().await;
        let mut keys: Vec<String> = objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete(&mut self, key: &str) -> Result<()> {
        if let Some(ref err) = self.delete_error {
            return Err(StoremuxError::Other(anyhow::anyhow!("{}", err)));
        }

        let mut objects = self.objects.write().await;
        objects
            .remove(key)
            .ok_or_else(|| StoremuxError::invalid_argument(format!("no such object: {key}")))?;
        Ok(())
    }
}

/// Provider error produced by [`MockConnector`] when failure is injected.
///
/// Tests downcast the cause chain to this type to verify that a factory
/// preserves the original constructor error.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MockConnectError(pub String);

/// Recording stand-in for a provider's client constructor.
///
/// Clones share their recording state, so a test can keep one handle while
/// handing another to a factory.
///
/// # Example
///
/// ```
/// use storemux::backends::mock::MockConnector;
/// use storemux::{Config, Connector, Uri};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let connector = MockConnector::new();
///     let probe = connector.clone();
///
///     let uri = Uri::parse("gs://bucket/obj")?;
///     connector.connect(&uri, &Config::new()).await?;
///
///     assert_eq!(probe.calls(), 1);
///     assert_eq!(probe.last_uri().unwrap().bucket(), "bucket");
///     Ok(())
/// }
/// ```
#[derive(Clone, Default)]
pub struct MockConnector {
    /// Message for the [`MockConnectError`] to return from `connect()`
    pub connect_error: Option<String>,
    calls: Arc<AtomicUsize>,
    last_seen: Arc<Mutex<Option<(Uri, HashMap<String, String>)>>>,
}

impl MockConnector {
    /// Creates a connector that succeeds, yielding a fresh [`MockBackend`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a connector that fails every `connect` with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            connect_error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of times `connect` has been invoked, successes and failures.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The URI passed to the most recent `connect` invocation.
    pub fn last_uri(&self) -> Option<Uri> {
        self.last_seen.lock().unwrap().as_ref().map(|(u, _)| u.clone())
    }

    /// Snapshot of the configuration passed to the most recent `connect`
    /// invocation, taken at call time.
    pub fn last_config(&self) -> Option<HashMap<String, String>> {
        self.last_seen.lock().unwrap().as_ref().map(|(_, c)| c.clone())
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, uri: &Uri, config: &Config) -> anyhow::Result<Box<dyn Backend>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_seen.lock().unwrap() = Some((uri.clone(), config.snapshot()));

        if let Some(ref message) = self.connect_error {
            return Err(anyhow::Error::new(MockConnectError(message.clone())));
        }
        Ok(Box::new(MockBackend::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend_write_and_read() {
        let mut backend = MockBackend::new();

        backend.write("key", b"value").await.unwrap();
        assert_eq!(backend.read("key").await.unwrap(), b"value");
        assert!(backend.exists("key").await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_backend_list_by_prefix() {
        let backend = MockBackend::new();
        backend.set_object("logs/a", b"1").await;
        backend.set_object("logs/b", b"2").await;
        backend.set_object("data/c", b"3").await;

        let keys = backend.list("logs/").await.unwrap();
        assert_eq!(keys, vec!["logs/a".to_string(), "logs/b".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_backend_delete() {
        let mut backend = MockBackend::new();
        backend.set_object("key", b"value").await;

        backend.delete("key").await.unwrap();
        assert!(!backend.exists("key").await.unwrap());
        assert!(backend.delete("key").await.is_err());
    }

    #[tokio::test]
    async fn test_error_injection() {
        let mut backend = MockBackend::new();
        backend.set_object("key", b"value").await;
        backend.read_error = Some(StoremuxError::invalid_argument("injected"));

        assert!(backend.read("key").await.is_err());
    }

    #[tokio::test]
    async fn test_connector_records_invocations() {
        let connector = MockConnector::new();
        let probe = connector.clone();

        let uri = Uri::parse("gs://bucket/obj").unwrap();
        let config = Config::new().with_entry("k", "v");

        connector.connect(&uri, &config).await.unwrap();
        connector.connect(&uri, &config).await.unwrap();

        assert_eq!(probe.calls(), 2);
        assert_eq!(probe.last_uri().unwrap().to_string(), "gs://bucket/obj");
        assert_eq!(
            probe.last_config().unwrap().get("k").map(String::as_str),
            Some("v")
        );
    }

    #[tokio::test]
    async fn test_failing_connector_yields_downcastable_cause() {
        let connector = MockConnector::failing("boom");
        let uri = Uri::parse("gs://bucket").unwrap();

        let err = connector.connect(&uri, &Config::new()).await.unwrap_err();
        assert!(err.downcast_ref::<MockConnectError>().is_some());
        assert_eq!(connector.calls(), 1);
    }
}
