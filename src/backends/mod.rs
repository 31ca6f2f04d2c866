//! Backend factory implementations.

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "gcs")]
pub mod gcs;
