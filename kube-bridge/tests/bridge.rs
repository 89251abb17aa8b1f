//! End-to-end checks of the facade against a mocked API server
use std::{io::Write, time::Duration};

use http::{header::CONTENT_TYPE, Method, Request, Response, StatusCode};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::{
    client::Body,
    config::{KubeConfigOptions, Kubeconfig},
    Config,
};
use kube_bridge::{
    client::{config::DEFAULT_CALL_TIMEOUT, CredentialSource},
    resources, ApiClient, AsyncClusterClient, ConfigurationError, Credentials, Error,
};
use serde_json::json;
use tokio::sync::oneshot;

// A throwaway self-signed CA so that no system trust store is needed
const KUBECONFIG: &str = "apiVersion: v1
kind: Config
clusters:
- name: bridge-test
  cluster:
    server: https://127.0.0.1:6443
    certificate-authority-data: LS0tLS1CRUdJTiBDRVJUSUZJQ0FURS0tLS0tCk1JSUJrekNDQVRtZ0F3SUJBZ0lVUEZEUS9Ba0V1VkdMNEl1NDFMQ3E4cDFYYWVNd0NnWUlLb1pJemowRUF3SXcKSGpFY01Cb0dBMVVFQXd3VGEzVmlaUzFpY21sa1oyVXRkR1Z6ZEMxallUQWdGdzB5TmpFd01UWXhNREl6TWpoYQpHQTh5TVRJMk1Ea3lNakV3TWpNeU9Gb3dIakVjTUJvR0ExVUVBd3dUYTNWaVpTMWljbWxrWjJVdGRHVnpkQzFqCllUQlpNQk1HQnlxR1NNNDlBZ0VHQ0NxR1NNNDlBd0VIQTBJQUJHem1PSTQ3YzJsU0JCT0I4L0lrc2h4WmJud2QKTUtrU3U0VWYyaGh3R1BkWUFMd0lXbVdPVEszb2lvUmJwY0FkcU8wSTdXaVZ4OEl4NmJERlJkZmV6K0NqVXpCUgpNQjBHQTFVZERnUVdCQlJ1M1U2SE96Tm93allvdTNjY05yUUYrbkN2Y0RBZkJnTlZIU01FR0RBV2dCUnUzVTZICk96Tm93allvdTNjY05yUUYrbkN2Y0RBUEJnTlZIUk1CQWY4RUJUQURBUUgvTUFvR0NDcUdTTTQ5QkFNQ0EwZ0EKTUVVQ0lRQ0t3eGtIbXBvL01mSnV1MmV0WlRDMDZhb3l5SU1rL3pvS3M0aGQ5alVXQlFJZ0E5YVl2Qy9wbFQybQpxdHQyWjMyYkprUWVuUncvekkxQXZJWGxXOUkwUnhVPQotLS0tLUVORCBDRVJUSUZJQ0FURS0tLS0tCg==
contexts:
- name: bridge-test
  context:
    cluster: bridge-test
    user: bridge-test
    namespace: apps
current-context: bridge-test
users:
- name: bridge-test
  user:
    token: hunter2
";

async fn kubeconfig_credentials() -> Credentials {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(KUBECONFIG.as_bytes()).unwrap();
    let path = file.path().to_owned();
    Credentials::discover_with(None, || async move {
        let kubeconfig = Kubeconfig::read_from(&path)?;
        Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn client_builds_from_kubeconfig_fallback() {
    let credentials = kubeconfig_credentials().await;
    assert_eq!(credentials.source(), CredentialSource::Kubeconfig);

    let client = AsyncClusterClient::try_from_credentials(credentials).unwrap();
    assert_eq!(client.timeout(), DEFAULT_CALL_TIMEOUT);
    assert_eq!(client.api().client().default_namespace(), "apps");
    assert!(client.model("V1Namespace").is_ok());
}

#[tokio::test]
async fn client_needs_a_runtime() {
    let credentials = kubeconfig_credentials().await;
    let outcome = std::thread::spawn(move || AsyncClusterClient::try_from_credentials(credentials))
        .join()
        .unwrap();
    assert!(matches!(outcome, Err(ConfigurationError::MissingRuntime(_))));
}

type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;

fn testcontext() -> (AsyncClusterClient, ApiServerHandle) {
    let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
    let client = kube::Client::new(mock_service, "default");
    let api = ApiClient::new(client, tokio::runtime::Handle::current());
    (AsyncClusterClient::new(api), handle)
}

const DEPLOYMENT_MANIFEST: &str = "apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  replicas: 2
  selector:
    matchLabels: {app: web}
  template:
    metadata:
      labels: {app: web}
    spec:
      containers:
      - name: web
        image: nginx
";

#[tokio::test]
async fn deployment_manifest_is_posted_once() {
    let (client, mut apiserver) = testcontext();
    let mut manifest = tempfile::NamedTempFile::new().unwrap();
    manifest.write_all(DEPLOYMENT_MANIFEST.as_bytes()).unwrap();

    let mocksrv = tokio::spawn(async move {
        let (request, send) = apiserver.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.uri().path(), "/apis/apps/v1/namespaces/default/deployments");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/yaml");
        let created = json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "web", "namespace": "default" }
        });
        send.send_response(
            Response::builder()
                .status(StatusCode::CREATED)
                .body(Body::from(serde_json::to_vec(&created).unwrap()))
                .unwrap(),
        );
        apiserver
    });

    let deploy = resources::create_deployment_from_file(&client, manifest.path(), None)
        .await
        .unwrap();
    assert_eq!(deploy.metadata.name.as_deref(), Some("web"));

    let mut apiserver = tokio::time::timeout(Duration::from_secs(1), mocksrv)
        .await
        .expect("timeout on mock apiserver")
        .expect("scenario succeeded");
    // nothing else was sent
    drop(client);
    let next = tokio::time::timeout(Duration::from_secs(1), apiserver.next_request())
        .await
        .expect("mock service released");
    assert!(next.is_none());
}

#[tokio::test]
async fn unanswered_request_times_out_and_late_answer_is_dropped() {
    let (client, mut apiserver) = testcontext();
    let client = client.with_timeout(Duration::from_millis(100));
    let (release, released) = oneshot::channel::<()>();

    let mocksrv = tokio::spawn(async move {
        let (request, send) = apiserver.next_request().await.expect("service not called");
        assert_eq!(request.uri().path(), "/api/v1/namespaces");
        released.await.unwrap();
        let created = json!({
            "apiVersion": "v1",
            "kind": "Namespace",
            "metadata": { "name": "slow" }
        });
        send.send_response(
            Response::builder()
                .body(Body::from(serde_json::to_vec(&created).unwrap()))
                .unwrap(),
        );
    });

    let meta = ObjectMeta {
        name: Some("slow".into()),
        ..ObjectMeta::default()
    };
    let err = resources::create_namespace(&client, meta).await.unwrap_err();
    match err {
        Error::Timeout(timeout) => {
            assert_eq!(timeout.operation, "create_namespace");
            assert!(timeout.elapsed >= Duration::from_millis(100));
        }
        other => panic!("unexpected error {other:?}"),
    }

    release.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(1), mocksrv)
        .await
        .expect("timeout on mock apiserver")
        .expect("scenario succeeded");
}
