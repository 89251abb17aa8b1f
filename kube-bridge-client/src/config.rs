//! Credential discovery and call timeout configuration
//!
//! Credentials come from the [cluster environment] when running in a pod,
//! and from `$KUBECONFIG` or `~/.kube/config` otherwise.
//!
//! [cluster environment]: https://kubernetes.io/docs/tasks/run-application/access-api-from-pod/
use std::{future::Future, time::Duration};

use kube::{
    config::{InClusterError, KubeConfigOptions, KubeconfigError},
    Config,
};
use tracing::debug;

use crate::error::ConfigurationError;

/// Environment variable set by the kubelet in every pod
pub const SERVICE_HOSTENV: &str = "KUBERNETES_SERVICE_HOST";

/// Deadline for a single bridged call unless overridden
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding [`DEFAULT_CALL_TIMEOUT`], in seconds
pub const CALL_TIMEOUT_ENV: &str = "KUBE_BRIDGE_CALL_TIMEOUT";

/// Reads the call timeout from [`CALL_TIMEOUT_ENV`], defaulting to [`DEFAULT_CALL_TIMEOUT`]
pub fn call_timeout_from_env() -> Result<Duration, ConfigurationError> {
    parse_call_timeout(std::env::var(CALL_TIMEOUT_ENV).ok().as_deref())
}

fn parse_call_timeout(value: Option<&str>) -> Result<Duration, ConfigurationError> {
    let Some(value) = value else {
        return Ok(DEFAULT_CALL_TIMEOUT);
    };
    let invalid = || ConfigurationError::InvalidTimeout { value: value.into() };
    let secs: f64 = value.trim().parse().map_err(|_| invalid())?;
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

/// Where a set of [`Credentials`] was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// The service account mounted into the current pod
    InCluster,
    /// The local kubeconfig
    Kubeconfig,
}

/// A cluster [`Config`] along with the source it was discovered from
#[derive(Debug, Clone)]
pub struct Credentials {
    source: CredentialSource,
    config: Config,
}

impl Credentials {
    /// Discovers credentials from the environment
    ///
    /// Uses the in-cluster service account when [`SERVICE_HOSTENV`] is set and the local
    /// kubeconfig otherwise. A broken in-cluster environment is reported as such rather
    /// than masked by the kubeconfig.
    pub async fn discover() -> Result<Self, ConfigurationError> {
        Self::discover_with(in_cluster_config(), || async {
            Config::from_kubeconfig(&KubeConfigOptions::default()).await
        })
        .await
    }

    /// Resolves credentials from an in-cluster probe result and a local fallback
    ///
    /// `in_cluster` is `None` when not running in a cluster; only then is `local` awaited.
    pub async fn discover_with<F, Fut>(
        in_cluster: Option<Result<Config, InClusterError>>,
        local: F,
    ) -> Result<Self, ConfigurationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Config, KubeconfigError>>,
    {
        match in_cluster {
            Some(Ok(config)) => Ok(Self {
                source: CredentialSource::InCluster,
                config,
            }),
            Some(Err(err)) => Err(ConfigurationError::InCluster(err)),
            None => {
                debug!("not running in a cluster, falling back to local kubeconfig");
                let config = local().await.map_err(ConfigurationError::Kubeconfig)?;
                Ok(Self {
                    source: CredentialSource::Kubeconfig,
                    config,
                })
            }
        }
    }

    /// Where these credentials were found
    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// The discovered config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consumes the credentials into the discovered config
    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Loads the in-cluster config, or `None` when not running in a cluster
pub fn in_cluster_config() -> Option<Result<Config, InClusterError>> {
    std::env::var_os(SERVICE_HOSTENV)?;
    Some(Config::incluster())
}

#[cfg(test)]
mod tests {
    use super::{parse_call_timeout, CredentialSource, Credentials, DEFAULT_CALL_TIMEOUT, SERVICE_HOSTENV};
    use crate::error::ConfigurationError;
    use kube::config::{KubeConfigOptions, Kubeconfig, KubeconfigError};
    use kube::Config;
    use std::{
        io::Write,
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    };

    const KUBECONFIG: &str = r#"
apiVersion: v1
clusters:
- cluster:
    server: https://0.0.0.0:6443
  name: k3d-test
contexts:
- context:
    cluster: k3d-test
    namespace: grn-se-com
    user: admin@k3d-test
  name: k3d-test
current-context: k3d-test
kind: Config
preferences: {}
users:
- name: admin@k3d-test
  user:
    token: hunter2
"#;

    async fn local_config() -> Result<Config, KubeconfigError> {
        let kubeconfig = Kubeconfig::from_yaml(KUBECONFIG)?;
        Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await
    }

    #[test]
    fn call_timeout_defaults_and_overrides() {
        assert_eq!(parse_call_timeout(None).unwrap(), DEFAULT_CALL_TIMEOUT);
        assert_eq!(parse_call_timeout(Some("5")).unwrap(), Duration::from_secs(5));
        assert_eq!(parse_call_timeout(Some(" 0.25 ")).unwrap(), Duration::from_millis(250));
        for bad in ["soon", "-1", "NaN", "inf"] {
            assert!(
                matches!(parse_call_timeout(Some(bad)), Err(ConfigurationError::InvalidTimeout { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn falls_back_to_kubeconfig_outside_cluster() {
        let creds = Credentials::discover_with(None, local_config).await.unwrap();
        assert_eq!(creds.source(), CredentialSource::Kubeconfig);
        assert_eq!(creds.config().cluster_url.host(), Some("0.0.0.0"));
        assert_eq!(creds.config().cluster_url.port_u16(), Some(6443));
        assert_eq!(creds.config().default_namespace, "grn-se-com");
    }

    #[tokio::test]
    async fn in_cluster_config_wins_without_touching_kubeconfig() {
        let incluster = local_config().await.unwrap();
        let touched = AtomicBool::new(false);
        let creds = Credentials::discover_with(Some(Ok(incluster)), || {
            touched.store(true, Ordering::SeqCst);
            local_config()
        })
        .await
        .unwrap();
        assert_eq!(creds.source(), CredentialSource::InCluster);
        assert!(!touched.load(Ordering::SeqCst), "kubeconfig loaded despite in-cluster config");
    }

    #[tokio::test]
    async fn broken_kubeconfig_is_a_configuration_error() {
        let err = Credentials::discover_with(None, || async {
            Err::<Config, _>(Kubeconfig::from_yaml("kind: [").unwrap_err())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::Kubeconfig(_)));
    }

    // the only test in this crate that touches process environment
    #[tokio::test]
    async fn discover_reads_kubeconfig_env_outside_cluster() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(KUBECONFIG.as_bytes()).unwrap();
        std::env::remove_var(SERVICE_HOSTENV);
        std::env::set_var("KUBECONFIG", file.path());

        let creds = Credentials::discover().await.unwrap();
        assert_eq!(creds.source(), CredentialSource::Kubeconfig);
        assert_eq!(creds.config().default_namespace, "grn-se-com");
        assert_eq!(creds.config().cluster_url.port_u16(), Some(6443));
    }
}
