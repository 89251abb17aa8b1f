//! One-call helpers for the resources an application typically manages
//!
//! Each helper builds its request object (or reads its manifest), issues exactly one
//! bridged call through [`AsyncClusterClient::call`] and resolves to the API server's
//! response. Namespaced helpers use [`DEFAULT_NAMESPACE`] when given `None`.
//!
//! Manifest helpers (`*_from_file`) read the file once and send its contents unparsed.
use std::{collections::BTreeMap, path::Path};

use either::Either;
use k8s_openapi::{
    api::{
        apps::v1::Deployment,
        core::v1::{
            ConfigMap, Namespace, PersistentVolumeClaim, PersistentVolumeClaimSpec, Pod, Secret, Service,
            ServiceAccount,
        },
        networking::v1::Ingress,
        rbac::v1::{ClusterRole, ClusterRoleBinding},
        storage::v1::StorageClass,
    },
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use kube::{
    api::{DeleteParams, ListParams},
    core::{object::ObjectList, response::Status},
};
use kube_bridge_core::{builders, operation, Body, Callback, DEFAULT_NAMESPACE};
use serde::Serialize;

use crate::{AsyncClusterClient, Error, Manifest, Result};

pub use kube_bridge_core::builders::env_var_from_config_map as create_env_var;

async fn bridge<S, T, F>(
    client: &AsyncClusterClient,
    select: fn(&AsyncClusterClient) -> &S,
    name: &'static str,
    invoke: F,
) -> Result<T>
where
    S: Clone + Send + 'static,
    T: Send + 'static,
    F: FnOnce(&S, Callback<T, kube::Error>) -> Result<(), kube::Error> + Send + 'static,
{
    let api = select(client).clone();
    let result = client
        .call(operation(name, move |callback| invoke(&api, callback)))
        .await;
    Ok(result?)
}

fn json<K: Serialize>(object: &K) -> Result<Body> {
    Body::json(object).map_err(Error::Serialize)
}

fn namespace_or_default(namespace: Option<&str>) -> String {
    namespace.unwrap_or(DEFAULT_NAMESPACE).to_owned()
}

/// Creates a `PersistentVolumeClaim`
pub async fn create_pvc(
    client: &AsyncClusterClient,
    metadata: ObjectMeta,
    spec: PersistentVolumeClaimSpec,
    namespace: Option<&str>,
) -> Result<PersistentVolumeClaim> {
    let namespace = namespace_or_default(namespace);
    let body = json(&builders::persistent_volume_claim(metadata, spec))?;
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "create_namespaced_persistent_volume_claim",
        move |api, callback| api.create_namespaced_persistent_volume_claim(&namespace, body, callback),
    )
    .await
}

/// Creates a `StorageClass` backed by `provisioner`
pub async fn create_storage_class(
    client: &AsyncClusterClient,
    metadata: ObjectMeta,
    provisioner: &str,
) -> Result<StorageClass> {
    let body = json(&builders::storage_class(metadata, provisioner))?;
    bridge(
        client,
        AsyncClusterClient::storage_v1,
        "create_storage_class",
        move |api, callback| api.create_storage_class(body, callback),
    )
    .await
}

/// Creates a `ConfigMap` holding `data`
pub async fn create_config_map(
    client: &AsyncClusterClient,
    metadata: ObjectMeta,
    data: BTreeMap<String, String>,
    namespace: Option<&str>,
) -> Result<ConfigMap> {
    let namespace = namespace_or_default(namespace);
    let body = json(&builders::config_map(metadata, data))?;
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "create_namespaced_config_map",
        move |api, callback| api.create_namespaced_config_map(&namespace, body, callback),
    )
    .await
}

/// Creates a `Secret` from plain-text values
pub async fn create_secret(
    client: &AsyncClusterClient,
    metadata: ObjectMeta,
    string_data: BTreeMap<String, String>,
    namespace: Option<&str>,
) -> Result<Secret> {
    let namespace = namespace_or_default(namespace);
    let body = json(&builders::secret(metadata, string_data))?;
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "create_namespaced_secret",
        move |api, callback| api.create_namespaced_secret(&namespace, body, callback),
    )
    .await
}

/// Creates a `Namespace`
pub async fn create_namespace(client: &AsyncClusterClient, metadata: ObjectMeta) -> Result<Namespace> {
    let body = json(&builders::namespace(metadata))?;
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "create_namespace",
        move |api, callback| api.create_namespace(body, callback),
    )
    .await
}

/// Creates a `Deployment` from a manifest file
pub async fn create_deployment_from_file(
    client: &AsyncClusterClient,
    path: impl AsRef<Path>,
    namespace: Option<&str>,
) -> Result<Deployment> {
    let namespace = namespace_or_default(namespace);
    let body = Body::from(Manifest::read(path).await?);
    bridge(
        client,
        AsyncClusterClient::apps_v1,
        "create_namespaced_deployment",
        move |api, callback| api.create_namespaced_deployment(&namespace, body, callback),
    )
    .await
}

/// Creates a `Service` from a manifest file
pub async fn create_service_from_file(
    client: &AsyncClusterClient,
    path: impl AsRef<Path>,
    namespace: Option<&str>,
) -> Result<Service> {
    let namespace = namespace_or_default(namespace);
    let body = Body::from(Manifest::read(path).await?);
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "create_namespaced_service",
        move |api, callback| api.create_namespaced_service(&namespace, body, callback),
    )
    .await
}

/// Creates a `ServiceAccount` from a manifest file
pub async fn create_service_account_from_file(
    client: &AsyncClusterClient,
    path: impl AsRef<Path>,
    namespace: Option<&str>,
) -> Result<ServiceAccount> {
    let namespace = namespace_or_default(namespace);
    let body = Body::from(Manifest::read(path).await?);
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "create_namespaced_service_account",
        move |api, callback| api.create_namespaced_service_account(&namespace, body, callback),
    )
    .await
}

/// Creates a `ClusterRole` from a manifest file
pub async fn create_cluster_role_from_file(
    client: &AsyncClusterClient,
    path: impl AsRef<Path>,
) -> Result<ClusterRole> {
    let body = Body::from(Manifest::read(path).await?);
    bridge(
        client,
        AsyncClusterClient::rbac_authorization_v1,
        "create_cluster_role",
        move |api, callback| api.create_cluster_role(body, callback),
    )
    .await
}

/// Creates a `ClusterRoleBinding` from a manifest file
pub async fn create_cluster_role_binding_from_file(
    client: &AsyncClusterClient,
    path: impl AsRef<Path>,
) -> Result<ClusterRoleBinding> {
    let body = Body::from(Manifest::read(path).await?);
    bridge(
        client,
        AsyncClusterClient::rbac_authorization_v1,
        "create_cluster_role_binding",
        move |api, callback| api.create_cluster_role_binding(body, callback),
    )
    .await
}

/// Creates an `Ingress` from a manifest file
pub async fn create_ingress_from_file(
    client: &AsyncClusterClient,
    path: impl AsRef<Path>,
    namespace: Option<&str>,
) -> Result<Ingress> {
    let namespace = namespace_or_default(namespace);
    let body = Body::from(Manifest::read(path).await?);
    bridge(
        client,
        AsyncClusterClient::networking_v1,
        "create_namespaced_ingress",
        move |api, callback| api.create_namespaced_ingress(&namespace, body, callback),
    )
    .await
}

/// Reads the `Secret` `name`
pub async fn read_secret(client: &AsyncClusterClient, name: &str, namespace: Option<&str>) -> Result<Secret> {
    let namespace = namespace_or_default(namespace);
    let name = name.to_owned();
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "read_namespaced_secret",
        move |api, callback| api.read_namespaced_secret(&namespace, &name, callback),
    )
    .await
}

/// Lists `Pod`s, optionally filtered by a label selector such as `app=web`
pub async fn list_pods(
    client: &AsyncClusterClient,
    namespace: Option<&str>,
    label_selector: Option<&str>,
) -> Result<ObjectList<Pod>> {
    let namespace = namespace_or_default(namespace);
    let lp = match label_selector {
        Some(selector) => ListParams::default().labels(selector),
        None => ListParams::default(),
    };
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "list_namespaced_pod",
        move |api, callback| api.list_namespaced_pod(&namespace, &lp, callback),
    )
    .await
}

/// Lists `ConfigMap`s
pub async fn list_config_maps(
    client: &AsyncClusterClient,
    namespace: Option<&str>,
) -> Result<ObjectList<ConfigMap>> {
    let namespace = namespace_or_default(namespace);
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "list_namespaced_config_map",
        move |api, callback| api.list_namespaced_config_map(&namespace, &ListParams::default(), callback),
    )
    .await
}

/// Deletes the `ConfigMap` `name`
pub async fn delete_config_map(
    client: &AsyncClusterClient,
    name: &str,
    namespace: Option<&str>,
) -> Result<Either<ConfigMap, Status>> {
    let namespace = namespace_or_default(namespace);
    let name = name.to_owned();
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "delete_namespaced_config_map",
        move |api, callback| {
            api.delete_namespaced_config_map(&namespace, &name, &DeleteParams::default(), callback)
        },
    )
    .await
}

/// Deletes the `PersistentVolumeClaim` `name`
pub async fn delete_pvc(
    client: &AsyncClusterClient,
    name: &str,
    namespace: Option<&str>,
) -> Result<Either<PersistentVolumeClaim, Status>> {
    let namespace = namespace_or_default(namespace);
    let name = name.to_owned();
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "delete_namespaced_persistent_volume_claim",
        move |api, callback| {
            let dp = DeleteParams::default();
            api.delete_namespaced_persistent_volume_claim(&namespace, &name, &dp, callback)
        },
    )
    .await
}

/// Deletes the `Service` `name`
pub async fn delete_service(
    client: &AsyncClusterClient,
    name: &str,
    namespace: Option<&str>,
) -> Result<Either<Service, Status>> {
    let namespace = namespace_or_default(namespace);
    let name = name.to_owned();
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "delete_namespaced_service",
        move |api, callback| {
            api.delete_namespaced_service(&namespace, &name, &DeleteParams::default(), callback)
        },
    )
    .await
}

/// Deletes the `Secret` `name`
pub async fn delete_secret(
    client: &AsyncClusterClient,
    name: &str,
    namespace: Option<&str>,
) -> Result<Either<Secret, Status>> {
    let namespace = namespace_or_default(namespace);
    let name = name.to_owned();
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "delete_namespaced_secret",
        move |api, callback| {
            api.delete_namespaced_secret(&namespace, &name, &DeleteParams::default(), callback)
        },
    )
    .await
}

/// Deletes the `Deployment` `name`
pub async fn delete_deployment(
    client: &AsyncClusterClient,
    name: &str,
    namespace: Option<&str>,
) -> Result<Either<Deployment, Status>> {
    let namespace = namespace_or_default(namespace);
    let name = name.to_owned();
    bridge(
        client,
        AsyncClusterClient::apps_v1,
        "delete_namespaced_deployment",
        move |api, callback| {
            api.delete_namespaced_deployment(&namespace, &name, &DeleteParams::default(), callback)
        },
    )
    .await
}

/// Deletes the `Ingress` `name`
pub async fn delete_ingress(
    client: &AsyncClusterClient,
    name: &str,
    namespace: Option<&str>,
) -> Result<Either<Ingress, Status>> {
    let namespace = namespace_or_default(namespace);
    let name = name.to_owned();
    bridge(
        client,
        AsyncClusterClient::networking_v1,
        "delete_namespaced_ingress",
        move |api, callback| {
            api.delete_namespaced_ingress(&namespace, &name, &DeleteParams::default(), callback)
        },
    )
    .await
}

/// Deletes the `Namespace` `name` and everything in it
pub async fn delete_namespace(client: &AsyncClusterClient, name: &str) -> Result<Either<Namespace, Status>> {
    let name = name.to_owned();
    bridge(
        client,
        AsyncClusterClient::core_v1,
        "delete_namespace",
        move |api, callback| api.delete_namespace(&name, &DeleteParams::default(), callback),
    )
    .await
}
