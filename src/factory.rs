//! Backend factory contract and path-based selection.

use crate::{Backend, Config, Result};
use async_trait::async_trait;
use std::any::Any;

/// Opaque, backend-specific extra parameter passed through [`BackendFactory::create`].
///
/// Part of the uniform factory signature; backends that need no extra input
/// accept and ignore it.
pub type Extra = dyn Any + Send + Sync;

/// A factory gating construction of one storage backend on path
/// applicability and credential availability.
///
/// Factories are stateless per call and safe to invoke concurrently from
/// multiple threads; the only shared mutable state they touch is the
/// externally owned [`Config`].
///
/// A registry enumerating factories relies on at most one factory claiming
/// any given scheme family. Prefix uniqueness across registered factories is
/// an external invariant; behavior under overlapping prefixes is unspecified
/// here.
#[async_trait]
pub trait BackendFactory: Send + Sync {
    /// Returns the backend name this factory constructs (e.g. "gcs").
    fn name(&self) -> &str;

    /// Returns true iff `path` is present and begins with this factory's
    /// scheme header.
    ///
    /// Pure: no side effects, no configuration mutation. The configuration
    /// argument exists for signature symmetry with `create` and is unused by
    /// the decision.
    fn supports_path(&self, path: Option<&str>, config: &Config) -> bool;

    /// Constructs a backend handle for `path`.
    ///
    /// Resolves the backend's required credentials into `config` (ambient
    /// values fill gaps, explicit values are never overwritten), then
    /// delegates to the backend constructor. May mutate the shared `config`
    /// in place even when construction ultimately fails; the mutation is
    /// idempotent and safe to repeat.
    ///
    /// # Errors
    ///
    /// - [`StoremuxError::InvalidArgument`](crate::StoremuxError::InvalidArgument):
    ///   `path` or `config` is absent. Checked eagerly, before any credential
    ///   resolution or I/O.
    /// - [`StoremuxError::CredentialsUnavailable`](crate::StoremuxError::CredentialsUnavailable):
    ///   a required credential key is missing from both the configuration and
    ///   the ambient source. Terminal; not retried.
    /// - [`StoremuxError::ConstructionFailed`](crate::StoremuxError::ConstructionFailed):
    ///   the delegated constructor failed; the provider error is preserved as
    ///   the cause. Not retried.
    async fn create(
        &self,
        path: Option<&str>,
        config: Option<&Config>,
        extra: Option<&Extra>,
    ) -> Result<Box<dyn Backend>>;
}

/// Returns the first factory in `factories` whose
/// [`supports_path`](BackendFactory::supports_path) answers true for `path`.
///
/// Callers hold the ordered factory list; first match wins. Returns `None`
/// when no registered factory claims the path.
///
/// # Example
///
/// ```no_run
/// use storemux::{factory, BackendFactory, Config};
/// use storemux::backends::gcs::GcsFactory;
/// use storemux::backends::mock::MockConnector;
///
/// # #[tokio::main]
/// # async fn main() -> storemux::Result<()> {
/// let factories: Vec<Box<dyn BackendFactory>> =
///     vec![Box::new(GcsFactory::new(MockConnector::new()))];
/// let config = Config::new();
///
/// if let Some(f) = factory::select(&factories, Some("gs://bucket/obj"), &config) {
///     let backend = f.create(Some("gs://bucket/obj"), Some(&config), None).await?;
///     println!("opened {}", backend.name());
/// }
/// # Ok(())
/// # }
/// ```
pub fn select<'a>(
    factories: &'a [Box<dyn BackendFactory>],
    path: Option<&str>,
    config: &Config,
) -> Option<&'a dyn BackendFactory> {
    factories
        .iter()
        .find(|f| f.supports_path(path, config))
        .map(|f| f.as_ref())
}
