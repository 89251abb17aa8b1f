//! Async adapter over a blocking Kubernetes API client
//!
//! [`AsyncClusterClient`] lets async code issue cluster API calls without blocking its
//! runtime. Each call runs a synchronous [`Operation`](kube_bridge_core::Operation) on the
//! blocking pool and races it against a deadline, see [`AsyncClusterClient::call`].
//!
//! The synchronous side is [`ApiClient`] with its per-group sub-clients in [`api`].
//! Common create/read/list/delete flows are wrapped as single async functions in
//! [`resources`].
//!
//! ```no_run
//! use kube_bridge_client::{resources, AsyncClusterClient};
//! use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
//!
//! # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AsyncClusterClient::try_default().await?;
//! let meta = ObjectMeta {
//!     name: Some("settings".into()),
//!     ..ObjectMeta::default()
//! };
//! let data = [("days".to_string(), "7".to_string())].into();
//! resources::create_config_map(&client, meta, data, None).await?;
//! let secret = resources::read_secret(&client, "token", Some("apps")).await?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod adapter;
pub use adapter::AsyncClusterClient;

pub mod api;
pub use api::ApiClient;

pub mod config;
pub use config::{CredentialSource, Credentials, DEFAULT_CALL_TIMEOUT};

pub mod error;
pub use error::{ConfigurationError, Error};

pub mod manifest;
pub use manifest::Manifest;

pub mod resources;

/// Convenient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
