//! Normalized resource paths.

use crate::{Result, StoremuxError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A normalized storage resource path of the form `scheme://bucket/key`.
///
/// Factories match raw path strings by prefix only; a `Uri` is produced once,
/// after a factory has claimed the path, and handed to the backend
/// constructor. The key may be empty, naming the bucket root.
///
/// # Example
///
/// ```
/// use storemux::Uri;
///
/// let uri: Uri = "gs://bucket/dir/obj".parse()?;
/// assert_eq!(uri.scheme(), "gs");
/// assert_eq!(uri.bucket(), "bucket");
/// assert_eq!(uri.key(), "dir/obj");
/// assert_eq!(uri.to_string(), "gs://bucket/dir/obj");
/// # Ok::<(), storemux::StoremuxError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uri {
    scheme: String,
    bucket: String,
    key: String,
}

impl Uri {
    /// Parses a raw path string.
    ///
    /// # Errors
    ///
    /// Returns [`StoremuxError::InvalidArgument`] if the path has no
    /// `scheme://` header, an empty scheme, or an empty bucket.
    pub fn parse(path: &str) -> Result<Self> {
        let (scheme, rest) = path
            .split_once("://")
            .ok_or_else(|| StoremuxError::invalid_argument(format!("no scheme in path: {path}")))?;

        if scheme.is_empty() {
            return Err(StoremuxError::invalid_argument(format!(
                "empty scheme in path: {path}"
            )));
        }

        let (bucket, key) = match rest.split_once('/') {
            Some((bucket, key)) => (bucket, key),
            None => (rest, ""),
        };

        if bucket.is_empty() {
            return Err(StoremuxError::invalid_argument(format!(
                "no bucket in path: {path}"
            )));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// The URI scheme, without the `://` separator.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The bucket (authority) component.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object key relative to the bucket. Empty for the bucket root.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}://{}", self.scheme, self.bucket)
        } else {
            write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
        }
    }
}

impl FromStr for Uri {
    type Err = StoremuxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
