//! Error types for storemux operations.

use thiserror::Error;

/// Result type alias using [`StoremuxError`].
pub type Result<T> = std::result::Result<T, StoremuxError>;

/// Errors that can occur while selecting or constructing a storage backend.
///
/// All errors implement `std::error::Error` and can be chained with `source()`.
#[derive(Debug, Error)]
pub enum StoremuxError {
    /// A required argument was absent or malformed. Caller bug; surfaced
    /// immediately, never logged at error severity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Neither the job configuration nor the ambient credential source
    /// supplies both required credential keys. Terminal; there is no
    /// fallback backend and the factory does not retry.
    #[error("{backend} credentials not available, cannot create {backend} backend")]
    CredentialsUnavailable {
        /// Backend name (e.g. "gcs")
        backend: String,
    },

    /// The delegated backend constructor failed with a provider-specific
    /// error. The original cause is preserved and retrievable via `source()`.
    #[error("failed to construct {backend} backend: {source}")]
    ConstructionFailed {
        /// Backend name (e.g. "gcs")
        backend: String,
        /// Underlying provider error
        #[source]
        source: anyhow::Error,
    },

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error (catch-all).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoremuxError {
    /// Creates an [`InvalidArgument`](Self::InvalidArgument) error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates a [`CredentialsUnavailable`](Self::CredentialsUnavailable)
    /// error for the named backend.
    pub fn credentials_unavailable(backend: impl Into<String>) -> Self {
        Self::CredentialsUnavailable {
            backend: backend.into(),
        }
    }

    /// Wraps a provider error raised by a backend constructor.
    ///
    /// # Example
    ///
    /// ```
    /// use storemux::StoremuxError;
    ///
    /// let cause = anyhow::anyhow!("handshake rejected");
    /// let err = StoremuxError::construction("gcs", cause);
    ///
    /// assert_eq!(
    ///     err.to_string(),
    ///     "failed to construct gcs backend: handshake rejected"
    /// );
    /// ```
    pub fn construction(backend: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ConstructionFailed {
            backend: backend.into(),
            source,
        }
    }
}
