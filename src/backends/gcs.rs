//! Google Cloud Storage backend factory.
//!
//! Ensures Google credentials are resolvable before delegating to the GCS
//! client constructor. The validity of the credentials themselves is checked
//! by the client, not here.

use crate::credentials::{CredentialSource, EnvCredentials};
use crate::{Backend, BackendFactory, Config, Connector, Extra, Result, StoremuxError, Uri};
use async_trait::async_trait;

/// Scheme header claimed by the GCS factory. Exact, case-sensitive prefix.
pub const GCS_HEADER: &str = "gs://";

/// Configuration key for the Google access key id.
pub const GCS_ACCESS_KEY: &str = "fs.gcs.accessKeyId";

/// Configuration key for the Google secret access key.
pub const GCS_SECRET_KEY: &str = "fs.gcs.secretAccessKey";

const GCS: &str = "gcs";

/// Factory for GCS backend handles.
///
/// Claims paths starting with [`GCS_HEADER`]. Before delegating to the
/// client constructor, fills [`GCS_ACCESS_KEY`] and [`GCS_SECRET_KEY`] into
/// the job configuration from the ambient credential source; values already
/// present in the configuration are never overwritten. The fill persists in
/// the shared configuration after the call, including when construction
/// fails.
///
/// The factory holds no per-call state and is safe to use concurrently.
/// Interleaved `create` calls may repeat the credential fill; repeated
/// application writes identical values and converges to the same
/// configuration.
///
/// # Example
///
/// ```no_run
/// use storemux::backends::gcs::GcsFactory;
/// use storemux::backends::mock::MockConnector;
/// use storemux::{BackendFactory, Config};
///
/// # #[tokio::main]
/// # async fn main() -> storemux::Result<()> {
/// let factory = GcsFactory::new(MockConnector::new());
/// let config = Config::new();
///
/// assert!(factory.supports_path(Some("gs://bucket/obj"), &config));
/// let backend = factory.create(Some("gs://bucket/obj"), Some(&config), None).await?;
/// # Ok(())
/// # }
/// ```
pub struct GcsFactory {
    connector: Box<dyn Connector>,
    credentials: Box<dyn CredentialSource>,
}

impl GcsFactory {
    /// Creates a factory delegating to `connector`, with the process
    /// environment as the ambient credential source.
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
            credentials: Box::new(EnvCredentials),
        }
    }

    /// Replaces the ambient credential source.
    ///
    /// Tests substitute a [`StaticCredentials`](crate::StaticCredentials)
    /// here instead of mutating the real environment.
    pub fn with_credential_source(mut self, source: impl CredentialSource + 'static) -> Self {
        self.credentials = Box::new(source);
        self
    }

    /// Fills missing credential keys from the ambient source, then reports
    /// whether both keys are present.
    ///
    /// Idempotent: the ambient source only fills gaps, so repeating the fill
    /// leaves the configuration unchanged.
    fn add_and_check_credentials(&self, config: &Config) -> bool {
        for key in [GCS_ACCESS_KEY, GCS_SECRET_KEY] {
            if let Some(value) = self.credentials.get(key) {
                config.set_if_absent(key, value);
            }
        }
        config.contains(GCS_ACCESS_KEY) && config.contains(GCS_SECRET_KEY)
    }
}

#[async_trait]
impl BackendFactory for GcsFactory {
    fn name(&self) -> &str {
        GCS
    }

    fn supports_path(&self, path: Option<&str>, _config: &Config) -> bool {
        path.is_some_and(|p| p.starts_with(GCS_HEADER))
    }

    async fn create(
        &self,
        path: Option<&str>,
        config: Option<&Config>,
        _extra: Option<&Extra>,
    ) -> Result<Box<dyn Backend>> {
        let path =
            path.ok_or_else(|| StoremuxError::invalid_argument("path must not be absent"))?;
        let config = config
            .ok_or_else(|| StoremuxError::invalid_argument("configuration must not be absent"))?;

        if !self.add_and_check_credentials(config) {
            let err = StoremuxError::credentials_unavailable(GCS);
            tracing::error!("{err}");
            return Err(err);
        }

        let uri = Uri::parse(path)?;
        match self.connector.connect(&uri, config).await {
            Ok(backend) => Ok(backend),
            Err(cause) => {
                tracing::error!(error = %cause, "failed to construct gcs backend");
                Err(StoremuxError::construction(GCS, cause))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::mock::MockConnector;
    use crate::StaticCredentials;

    fn both_keys() -> StaticCredentials {
        StaticCredentials::new()
            .with(GCS_ACCESS_KEY, "ambient-access")
            .with(GCS_SECRET_KEY, "ambient-secret")
    }

    #[test]
    fn test_supports_path() {
        let factory = GcsFactory::new(MockConnector::new());
        let config = Config::new();

        assert!(factory.supports_path(Some("gs://bucket/obj"), &config));
        assert!(factory.supports_path(Some("gs://bucket"), &config));

        assert!(!factory.supports_path(None, &config));
        assert!(!factory.supports_path(Some("s3://bucket/obj"), &config));
        assert!(!factory.supports_path(Some("GS://bucket/obj"), &config));
        // Header mid-string does not count.
        assert!(!factory.supports_path(Some("/mnt/gs://bucket"), &config));
    }

    #[test]
    fn test_credential_fill_is_idempotent() {
        let factory = GcsFactory::new(MockConnector::new()).with_credential_source(both_keys());
        let config = Config::new();

        assert!(factory.add_and_check_credentials(&config));
        let first = config.snapshot();

        assert!(factory.add_and_check_credentials(&config));
        assert_eq!(config.snapshot(), first);
    }

    #[test]
    fn test_explicit_config_wins_over_ambient() {
        let factory = GcsFactory::new(MockConnector::new()).with_credential_source(both_keys());
        let config = Config::new().with_entry(GCS_ACCESS_KEY, "explicit-access");

        assert!(factory.add_and_check_credentials(&config));
        assert_eq!(config.get(GCS_ACCESS_KEY).as_deref(), Some("explicit-access"));
        assert_eq!(config.get(GCS_SECRET_KEY).as_deref(), Some("ambient-secret"));
    }

    #[test]
    fn test_partial_fill_reports_missing() {
        let access_only = StaticCredentials::new().with(GCS_ACCESS_KEY, "ambient-access");
        let factory = GcsFactory::new(MockConnector::new()).with_credential_source(access_only);
        let config = Config::new();

        assert!(!factory.add_and_check_credentials(&config));
        // The key that was available is still filled in.
        assert_eq!(config.get(GCS_ACCESS_KEY).as_deref(), Some("ambient-access"));
        assert!(!config.contains(GCS_SECRET_KEY));
    }
}
