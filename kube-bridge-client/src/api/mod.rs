//! The synchronous, callback-accepting cluster API client
//!
//! [`ApiClient`] wraps a [`kube::Client`] and drives its requests to completion on the
//! calling thread, handing each result to a [`Callback`](kube_bridge_core::Callback).
//! It is grouped the way generated Kubernetes clients are, one sub-client per API group:
//! [`CoreV1Api`], [`AppsV1Api`], [`StorageV1Api`], [`NetworkingV1Api`] and
//! [`RbacAuthorizationV1Api`].
//!
//! Every method blocks. Call them from a blocking thread, for instance through
//! [`AsyncClusterClient::call`](crate::AsyncClusterClient::call), never from async code.
use std::{fmt::Debug, sync::Arc};

use kube_bridge_core::ModelRegistry;
use tokio::runtime::Handle;

mod core_methods;

mod groups;
pub use groups::{AppsV1Api, CoreV1Api, NetworkingV1Api, RbacAuthorizationV1Api, StorageV1Api};

/// Raw API dispatch handle shared by all sub-clients
///
/// Cheap to clone; clones share the underlying connection pool and model registry.
#[derive(Clone)]
pub struct ApiClient {
    client: kube::Client,
    runtime: Handle,
    models: Arc<ModelRegistry>,
}

impl ApiClient {
    /// Wraps `client`, driving its requests on `runtime`
    ///
    /// Models are taken from [`ModelRegistry::builtin`].
    pub fn new(client: kube::Client, runtime: Handle) -> Self {
        Self::with_models(client, runtime, ModelRegistry::builtin())
    }

    /// Wraps `client` with a custom model registry
    pub fn with_models(client: kube::Client, runtime: Handle, models: ModelRegistry) -> Self {
        Self {
            client,
            runtime,
            models: Arc::new(models),
        }
    }

    /// The models reachable through this client
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// The runtime requests are driven on
    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// The underlying async client
    pub fn client(&self) -> &kube::Client {
        &self.client
    }

    /// The core group, version v1
    pub fn core_v1(&self) -> CoreV1Api {
        CoreV1Api::new(self.clone())
    }

    /// The apps group, version v1
    pub fn apps_v1(&self) -> AppsV1Api {
        AppsV1Api::new(self.clone())
    }

    /// The storage.k8s.io group, version v1
    pub fn storage_v1(&self) -> StorageV1Api {
        StorageV1Api::new(self.clone())
    }

    /// The networking.k8s.io group, version v1
    pub fn networking_v1(&self) -> NetworkingV1Api {
        NetworkingV1Api::new(self.clone())
    }

    /// The rbac.authorization.k8s.io group, version v1
    pub fn rbac_authorization_v1(&self) -> RbacAuthorizationV1Api {
        RbacAuthorizationV1Api::new(self.clone())
    }
}

impl Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("default_namespace", &self.client.default_namespace())
            .field("models", &self.models.len())
            .finish_non_exhaustive()
    }
}
