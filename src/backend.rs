//! Backend handle and constructor contracts.
//!
//! This module defines the two seams between the factory protocol and the
//! actual remote-storage client: [`Backend`], the capability set a
//! constructed handle exposes, and [`Connector`], the constructor the
//! factory delegates to once credentials are resolved.

use crate::{Config, Result, Uri};
use async_trait::async_trait;

/// A ready client handle scoped to one path's storage namespace.
///
/// Handles are produced by [`BackendFactory::create`](crate::BackendFactory::create)
/// and owned by the caller afterwards; the factory keeps no reference and
/// performs no pooling, reuse, or close on their behalf. All implementations
/// must be `Send + Sync` to support concurrent access across async tasks.
///
/// Object keys are relative to the handle's namespace (for an object store,
/// the bucket the handle was opened against).
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Returns the backend name (e.g. "gcs", "mock").
    fn name(&self) -> &str;

    /// Checks whether an object exists.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Reads an object's full contents.
    async fn read(&self, key: &str) -> Result<Vec<u8>>;

    /// Writes an object, replacing any existing contents.
    async fn write(&mut self, key: &str, data: &[u8]) -> Result<()>;

    /// Lists object keys under a prefix.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Deletes an object.
    async fn delete(&mut self, key: &str) -> Result<()>;
}

/// Constructor contract for a remote-storage client.
///
/// The factory hands a connector the normalized path and the augmented
/// configuration after credential resolution has succeeded. Construction may
/// perform network I/O (an initial handshake, credential validation by the
/// remote service) and may fail with a provider-specific error; the factory
/// wraps that error as
/// [`StoremuxError::ConstructionFailed`](crate::StoremuxError::ConstructionFailed)
/// with the cause preserved, and never retries.
///
/// Blocking and timeout behavior during construction is entirely owned by
/// the connector; callers wanting bounded latency impose it around the
/// `create` call.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Constructs a client handle for `uri` using `config`.
    async fn connect(&self, uri: &Uri, config: &Config) -> anyhow::Result<Box<dyn Backend>>;
}
