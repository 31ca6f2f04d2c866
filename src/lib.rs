//! Storemux - pluggable storage-backend factory.
//!
//! Storemux is the entry point through which a generic storage-abstraction
//! layer discovers and instantiates a concrete backend for a resource path.
//! A caller holds an ordered list of [`BackendFactory`] values; for a given
//! path it asks each factory [`supports_path`](BackendFactory::supports_path)
//! and the first factory answering true is asked to
//! [`create`](BackendFactory::create) a backend handle. The factory resolves
//! the backend's credentials into the shared job [`Config`], then delegates
//! to the backend's [`Connector`], failing fast with an attributable error if
//! either step cannot complete.
//!
//! # Features
//!
//! - **Path-based dispatch**: factories claim paths by exact scheme prefix
//! - **Credential resolution**: ambient values fill configuration gaps,
//!   explicit values are never overwritten
//! - **Fail-fast construction**: success or one attributable error, no
//!   partial state
//! - **Injected collaborators**: the ambient credential source and the
//!   provider constructor are both substitutable for tests
//! - **Async/Await**: built on tokio for non-blocking construction
//!
//! # Quick Start
//!
//! ```no_run
//! use storemux::backends::gcs::GcsFactory;
//! use storemux::backends::mock::MockConnector;
//! use storemux::{factory, BackendFactory, Config};
//!
//! #[tokio::main]
//! async fn main() -> storemux::Result<()> {
//!     // The registry's ordered factory list. In production the connector
//!     // is the real GCS client constructor.
//!     let factories: Vec<Box<dyn BackendFactory>> =
//!         vec![Box::new(GcsFactory::new(MockConnector::new()))];
//!
//!     let config = Config::new();
//!     let path = "gs://bucket/data/obj";
//!
//!     let chosen = factory::select(&factories, Some(path), &config)
//!         .expect("no factory claims this path");
//!
//!     // May fill credential keys into `config`; the fill persists.
//!     let backend = chosen.create(Some(path), Some(&config), None).await?;
//!     println!("opened {} backend", backend.name());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! | Backend | Feature Flag | Scheme header | Notes |
//! |---------|-------------|---------------|-------|
//! | GCS | `gcs` (default) | `gs://` | credential-gated; client injected via [`Connector`] |
//! | Mock | `mock` (default) | n/a | in-memory backend + recording connector for tests |
//!
//! The real provider client is an external collaborator behind the
//! [`Connector`] trait; this crate never links a cloud SDK.

pub mod backend;
pub mod backends;
pub mod config;
pub mod credentials;
pub mod error;
pub mod factory;
pub mod uri;

pub use backend::{Backend, Connector};
pub use config::Config;
pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use error::{Result, StoremuxError};
pub use factory::{BackendFactory, Extra};
pub use uri::Uri;
