//! kube-bridge lets async Rust drive a blocking Kubernetes API client without stalling
//! its runtime.
//!
//! # Overview
//!
//! Cluster calls are expressed as synchronous [`Operation`]s that complete a callback.
//! [`AsyncClusterClient::call`] runs one on tokio's blocking pool and returns a
//! [`PendingCall`] that resolves with the operation's result, or with a
//! [`CallTimeoutError`] once the deadline passes, whichever comes first.
//!
//! - [`core`] holds the client-less pieces: the [`race`](core::race) primitive, the
//!   operation contract, request builders and the model registry
//! - [`client`] holds the synchronous [`ApiClient`], credential discovery and the
//!   [`resources`] helpers
//!
//! # Example
//!
//! ```no_run
//! use kube_bridge::{operation, resources, AsyncClusterClient, Body};
//! use k8s_openapi::api::core::v1::Namespace;
//! use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // in-cluster service account, or the local kubeconfig
//!     let client = AsyncClusterClient::try_default().await?;
//!
//!     // one-call helpers
//!     let meta = ObjectMeta { name: Some("grn-se-com".into()), ..ObjectMeta::default() };
//!     resources::create_namespace(&client, meta).await?;
//!     resources::create_service_from_file(&client, "web.yaml", Some("grn-se-com")).await?;
//!
//!     // or any sub-client method
//!     let core_v1 = client.core_v1().clone();
//!     let body = Body::json(&Namespace::default())?;
//!     let created = client
//!         .call(operation("create_namespace", move |callback| core_v1.create_namespace(body, callback)))
//!         .await?;
//!     println!("created {:?}", created.metadata.name);
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

macro_rules! cfg_client {
    ($($item:item)*) => {
        $(
            #[cfg_attr(docsrs, doc(cfg(feature = "client")))]
            #[cfg(feature = "client")]
            $item
        )*
    }
}

cfg_client! {
    pub use kube_bridge_client as client;
    pub use kube_bridge_client::resources;

    #[doc(inline)]
    pub use client::{ApiClient, AsyncClusterClient, ConfigurationError, Credentials, Error, Manifest};
    /// Convenient alias for `Result<T, Error>`
    pub type Result<T, E = Error> = std::result::Result<T, E>;
}

/// Re-exports from [`kube_bridge_core`]
#[doc(inline)]
pub use kube_bridge_core as core;
pub use crate::core::{
    operation, Body, CallError, CallTimeoutError, Callback, ModelType, Operation, PendingCall, UnknownModel,
};
