//! Error handling in [`kube_bridge_client`][crate]
use kube::config::{InClusterError, KubeconfigError};
use kube_bridge_core::{CallError, CallTimeoutError};
use thiserror::Error;

use crate::config::CALL_TIMEOUT_ENV;

/// Possible errors when constructing an [`AsyncClusterClient`](crate::AsyncClusterClient)
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Running in a cluster, but its service account credentials are unusable
    #[error("failed to load in-cluster config: {0}")]
    InCluster(#[source] InClusterError),

    /// Not running in a cluster and the local kubeconfig could not be loaded
    #[error("no in-cluster environment and no usable kubeconfig: {0}")]
    Kubeconfig(#[source] KubeconfigError),

    /// The discovered config was rejected by the client
    #[error("failed to build a client from the discovered config: {0}")]
    Client(#[source] kube::Error),

    /// Construction happened outside of a tokio runtime
    #[error("no tokio runtime to run blocking calls on: {0}")]
    MissingRuntime(#[source] tokio::runtime::TryCurrentError),

    /// The call timeout override is not a non-negative number of seconds
    #[error("invalid {CALL_TIMEOUT_ENV} value {value:?}, expected a number of seconds")]
    InvalidTimeout {
        /// The rejected value
        value: String,
    },
}

/// Possible errors from the resource helpers in [`resources`](crate::resources)
#[derive(Error, Debug)]
pub enum Error {
    /// The call did not complete before its deadline
    #[error(transparent)]
    Timeout(#[from] CallTimeoutError),

    /// The cluster call itself failed
    #[error(transparent)]
    Kube(#[from] kube::Error),

    /// A manifest file could not be read
    #[error(transparent)]
    Manifest(#[from] std::io::Error),

    /// The blocking operation panicked instead of completing
    #[error("cluster call {operation} panicked: {message}")]
    Panicked {
        /// Name of the operation that panicked
        operation: String,
        /// The panic message
        message: String,
    },

    /// A request object could not be serialized
    #[error("failed to serialize request object: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl From<CallError<kube::Error>> for Error {
    fn from(err: CallError<kube::Error>) -> Self {
        match err {
            CallError::Timeout(timeout) => Error::Timeout(timeout),
            CallError::Operation(err) => Error::Kube(err),
            CallError::Panicked { operation, message } => Error::Panicked { operation, message },
        }
    }
}
