//! The async adapter over [`ApiClient`]
use std::{
    any::Any,
    fmt::Debug,
    sync::{Arc, OnceLock},
    time::Duration,
};

use kube_bridge_core::{
    race, CallError, CallTimeoutError, Callback, ModelRegistry, ModelType, Operation, PendingCall,
    UnknownModel,
};
use tokio::runtime::Handle;
use tracing::{debug, error, trace};

use crate::{
    api::{ApiClient, AppsV1Api, CoreV1Api, NetworkingV1Api, RbacAuthorizationV1Api, StorageV1Api},
    config::{call_timeout_from_env, Credentials, DEFAULT_CALL_TIMEOUT},
    error::ConfigurationError,
};

struct Shared {
    api: ApiClient,
    core_v1: CoreV1Api,
    apps_v1: OnceLock<AppsV1Api>,
    storage_v1: OnceLock<StorageV1Api>,
    networking_v1: OnceLock<NetworkingV1Api>,
    rbac_authorization_v1: OnceLock<RbacAuthorizationV1Api>,
}

/// Issues cluster API calls from async code without blocking the runtime
///
/// Each [`call`](Self::call) runs a synchronous [`Operation`] on the runtime's blocking
/// pool and races it against a deadline. The returned [`PendingCall`] resolves to the
/// operation's result or to a [`CallTimeoutError`], whichever comes first.
///
/// Clones share the underlying client and cached sub-clients.
#[derive(Clone)]
pub struct AsyncClusterClient {
    shared: Arc<Shared>,
    timeout: Duration,
}

impl AsyncClusterClient {
    /// Connects using credentials discovered from the environment
    ///
    /// See [`Credentials::discover`] for the lookup order. The call timeout is read from
    /// [`CALL_TIMEOUT_ENV`](crate::config::CALL_TIMEOUT_ENV).
    pub async fn try_default() -> Result<Self, ConfigurationError> {
        let timeout = call_timeout_from_env()?;
        let credentials = Credentials::discover().await?;
        Ok(Self::try_from_credentials(credentials)?.with_timeout(timeout))
    }

    /// Connects using already discovered credentials
    ///
    /// Must be called from within a tokio runtime; blocking calls are run on it.
    pub fn try_from_credentials(credentials: Credentials) -> Result<Self, ConfigurationError> {
        let runtime = Handle::try_current().map_err(ConfigurationError::MissingRuntime)?;
        let client = {
            let _guard = runtime.enter();
            kube::Client::try_from(credentials.into_config()).map_err(ConfigurationError::Client)?
        };
        Ok(Self::new(ApiClient::new(client, runtime)))
    }

    /// Wraps an existing [`ApiClient`] using [`DEFAULT_CALL_TIMEOUT`]
    pub fn new(api: ApiClient) -> Self {
        let core_v1 = api.core_v1();
        Self {
            shared: Arc::new(Shared {
                api,
                core_v1,
                apps_v1: OnceLock::new(),
                storage_v1: OnceLock::new(),
                networking_v1: OnceLock::new(),
                rbac_authorization_v1: OnceLock::new(),
            }),
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Sets the deadline applied to every call made through this instance
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The deadline applied to every call
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The wrapped synchronous client
    pub fn api(&self) -> &ApiClient {
        &self.shared.api
    }

    /// The core v1 sub-client
    pub fn core_v1(&self) -> &CoreV1Api {
        &self.shared.core_v1
    }

    /// The apps v1 sub-client
    pub fn apps_v1(&self) -> &AppsV1Api {
        self.shared.apps_v1.get_or_init(|| self.shared.api.apps_v1())
    }

    /// The storage.k8s.io v1 sub-client
    pub fn storage_v1(&self) -> &StorageV1Api {
        self.shared.storage_v1.get_or_init(|| self.shared.api.storage_v1())
    }

    /// The networking.k8s.io v1 sub-client
    pub fn networking_v1(&self) -> &NetworkingV1Api {
        self.shared
            .networking_v1
            .get_or_init(|| self.shared.api.networking_v1())
    }

    /// The rbac.authorization.k8s.io v1 sub-client
    pub fn rbac_authorization_v1(&self) -> &RbacAuthorizationV1Api {
        self.shared
            .rbac_authorization_v1
            .get_or_init(|| self.shared.api.rbac_authorization_v1())
    }

    /// The models known to the wrapped client
    pub fn models(&self) -> &ModelRegistry {
        self.shared.api.models()
    }

    /// Looks up a model by kind (`Namespace`), model name (`V1Namespace`)
    /// or qualified name (`apps/v1/Deployment`)
    pub fn model(&self, name: &str) -> Result<&ModelType, UnknownModel> {
        self.models().lookup(name)
    }

    /// Looks up the model of the Rust type `K`
    pub fn model_of<K: 'static>(&self) -> Result<&ModelType, UnknownModel> {
        self.models().lookup_type::<K>()
    }

    /// Runs `op` on the blocking pool, racing it against the configured timeout
    ///
    /// Returns immediately. The handle resolves to:
    ///
    /// - the value `op` completes its callback with,
    /// - [`CallError::Operation`] with the error `op` fails with, or returns from
    ///   [`Operation::invoke`],
    /// - [`CallError::Panicked`] as soon as `op` panics,
    /// - [`CallError::Timeout`] if none of these happened within the timeout.
    ///
    /// A timeout is logged once at error level. The operation is not interrupted;
    /// whatever it produces afterwards is dropped.
    ///
    /// ```no_run
    /// use kube_bridge_client::AsyncClusterClient;
    /// use kube_bridge_core::{operation, Body};
    /// use k8s_openapi::api::core::v1::Namespace;
    ///
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AsyncClusterClient::try_default().await?;
    /// let core_v1 = client.core_v1().clone();
    /// let body = Body::json(&Namespace::default())?;
    /// let ns = client
    ///     .call(operation("create_namespace", move |callback| {
    ///         core_v1.create_namespace(body, callback)
    ///     }))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn call<Op: Operation>(&self, op: Op) -> PendingCall<Op::Output, Op::Error> {
        let operation = op.name().to_owned();
        let runtime = self.shared.api.runtime();
        let name = operation.clone();
        race(
            runtime,
            self.timeout,
            move |resolver| {
                let callback = Callback::new(resolver.clone());
                let watcher = resolver.clone();
                let task = runtime.spawn_blocking(move || {
                    trace!(operation = op.name(), "invoking operation");
                    if let Err(err) = op.invoke(callback) {
                        if !resolver.resolve(Err(CallError::Operation(err))) {
                            debug!("discarding failure of a call that already timed out");
                        }
                    }
                });
                runtime.spawn(async move {
                    let Err(err) = task.await else { return };
                    if !err.is_panic() {
                        return;
                    }
                    let message = panic_message(err.into_panic());
                    let panicked = CallError::Panicked {
                        operation: name,
                        message,
                    };
                    if !watcher.resolve(Err(panicked)) {
                        debug!("discarding panic of a call that already timed out");
                    }
                });
            },
            move |elapsed| {
                error!(%operation, ?elapsed, "cluster call timed out");
                Err(CallError::Timeout(CallTimeoutError { operation, elapsed }))
            },
        )
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast::<String>()
        .map(|message| *message)
        .or_else(|payload| payload.downcast::<&'static str>().map(|message| (*message).to_owned()))
        .unwrap_or_else(|_| "non-string panic payload".to_owned())
}

impl Debug for AsyncClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncClusterClient")
            .field("api", &self.shared.api)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
