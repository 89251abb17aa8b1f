use either::Either;
use k8s_openapi::api::{
    apps::v1::Deployment,
    core::v1::{ConfigMap, Namespace, PersistentVolumeClaim, Pod, Secret, Service, ServiceAccount},
    networking::v1::Ingress,
    rbac::v1::{ClusterRole, ClusterRoleBinding},
    storage::v1::StorageClass,
};
use kube::{
    api::{DeleteParams, ListParams},
    core::{object::ObjectList, response::Status},
    Api, Error,
};
use kube_bridge_core::{Body, Callback};

use super::ApiClient;

/// Operations on the core v1 API group
#[derive(Clone, Debug)]
pub struct CoreV1Api {
    api: ApiClient,
}

impl CoreV1Api {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Creates a `Namespace`
    pub fn create_namespace(&self, body: Body, callback: Callback<Namespace, Error>) -> Result<(), Error> {
        self.api.create("create_namespace", None, body, callback)
    }

    /// Creates a `PersistentVolumeClaim` in `namespace`
    pub fn create_namespaced_persistent_volume_claim(
        &self,
        namespace: &str,
        body: Body,
        callback: Callback<PersistentVolumeClaim, Error>,
    ) -> Result<(), Error> {
        self.api.create(
            "create_namespaced_persistent_volume_claim",
            Some(namespace),
            body,
            callback,
        )
    }

    /// Creates a `ConfigMap` in `namespace`
    pub fn create_namespaced_config_map(
        &self,
        namespace: &str,
        body: Body,
        callback: Callback<ConfigMap, Error>,
    ) -> Result<(), Error> {
        self.api
            .create("create_namespaced_config_map", Some(namespace), body, callback)
    }

    /// Creates a `Secret` in `namespace`
    pub fn create_namespaced_secret(
        &self,
        namespace: &str,
        body: Body,
        callback: Callback<Secret, Error>,
    ) -> Result<(), Error> {
        self.api
            .create("create_namespaced_secret", Some(namespace), body, callback)
    }

    /// Creates a `Service` in `namespace`
    pub fn create_namespaced_service(
        &self,
        namespace: &str,
        body: Body,
        callback: Callback<Service, Error>,
    ) -> Result<(), Error> {
        self.api
            .create("create_namespaced_service", Some(namespace), body, callback)
    }

    /// Creates a `ServiceAccount` in `namespace`
    pub fn create_namespaced_service_account(
        &self,
        namespace: &str,
        body: Body,
        callback: Callback<ServiceAccount, Error>,
    ) -> Result<(), Error> {
        self.api
            .create("create_namespaced_service_account", Some(namespace), body, callback)
    }

    /// Reads the `Secret` `name` in `namespace`
    pub fn read_namespaced_secret(
        &self,
        namespace: &str,
        name: &str,
        callback: Callback<Secret, Error>,
    ) -> Result<(), Error> {
        let secrets: Api<Secret> = Api::namespaced(self.api.client().clone(), namespace);
        self.api.get("read_namespaced_secret", secrets, name, callback);
        Ok(())
    }

    /// Lists the `Pod`s in `namespace`
    pub fn list_namespaced_pod(
        &self,
        namespace: &str,
        lp: &ListParams,
        callback: Callback<ObjectList<Pod>, Error>,
    ) -> Result<(), Error> {
        let pods: Api<Pod> = Api::namespaced(self.api.client().clone(), namespace);
        self.api.list("list_namespaced_pod", pods, lp, callback);
        Ok(())
    }

    /// Lists the `ConfigMap`s in `namespace`
    pub fn list_namespaced_config_map(
        &self,
        namespace: &str,
        lp: &ListParams,
        callback: Callback<ObjectList<ConfigMap>, Error>,
    ) -> Result<(), Error> {
        let config_maps: Api<ConfigMap> = Api::namespaced(self.api.client().clone(), namespace);
        self.api.list("list_namespaced_config_map", config_maps, lp, callback);
        Ok(())
    }

    /// Deletes the `ConfigMap` `name` in `namespace`
    pub fn delete_namespaced_config_map(
        &self,
        namespace: &str,
        name: &str,
        dp: &DeleteParams,
        callback: Callback<Either<ConfigMap, Status>, Error>,
    ) -> Result<(), Error> {
        let config_maps: Api<ConfigMap> = Api::namespaced(self.api.client().clone(), namespace);
        self.api
            .delete("delete_namespaced_config_map", config_maps, name, dp, callback);
        Ok(())
    }

    /// Deletes the `PersistentVolumeClaim` `name` in `namespace`
    pub fn delete_namespaced_persistent_volume_claim(
        &self,
        namespace: &str,
        name: &str,
        dp: &DeleteParams,
        callback: Callback<Either<PersistentVolumeClaim, Status>, Error>,
    ) -> Result<(), Error> {
        let claims: Api<PersistentVolumeClaim> = Api::namespaced(self.api.client().clone(), namespace);
        self.api.delete(
            "delete_namespaced_persistent_volume_claim",
            claims,
            name,
            dp,
            callback,
        );
        Ok(())
    }

    /// Deletes the `Service` `name` in `namespace`
    pub fn delete_namespaced_service(
        &self,
        namespace: &str,
        name: &str,
        dp: &DeleteParams,
        callback: Callback<Either<Service, Status>, Error>,
    ) -> Result<(), Error> {
        let services: Api<Service> = Api::namespaced(self.api.client().clone(), namespace);
        self.api
            .delete("delete_namespaced_service", services, name, dp, callback);
        Ok(())
    }

    /// Deletes the `Secret` `name` in `namespace`
    pub fn delete_namespaced_secret(
        &self,
        namespace: &str,
        name: &str,
        dp: &DeleteParams,
        callback: Callback<Either<Secret, Status>, Error>,
    ) -> Result<(), Error> {
        let secrets: Api<Secret> = Api::namespaced(self.api.client().clone(), namespace);
        self.api
            .delete("delete_namespaced_secret", secrets, name, dp, callback);
        Ok(())
    }

    /// Deletes the `Namespace` `name` along with everything in it
    pub fn delete_namespace(
        &self,
        name: &str,
        dp: &DeleteParams,
        callback: Callback<Either<Namespace, Status>, Error>,
    ) -> Result<(), Error> {
        let namespaces: Api<Namespace> = Api::all(self.api.client().clone());
        self.api.delete("delete_namespace", namespaces, name, dp, callback);
        Ok(())
    }
}

/// Operations on the apps v1 API group
#[derive(Clone, Debug)]
pub struct AppsV1Api {
    api: ApiClient,
}

impl AppsV1Api {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Creates a `Deployment` in `namespace`
    pub fn create_namespaced_deployment(
        &self,
        namespace: &str,
        body: Body,
        callback: Callback<Deployment, Error>,
    ) -> Result<(), Error> {
        self.api
            .create("create_namespaced_deployment", Some(namespace), body, callback)
    }

    /// Deletes the `Deployment` `name` in `namespace`
    pub fn delete_namespaced_deployment(
        &self,
        namespace: &str,
        name: &str,
        dp: &DeleteParams,
        callback: Callback<Either<Deployment, Status>, Error>,
    ) -> Result<(), Error> {
        let deployments: Api<Deployment> = Api::namespaced(self.api.client().clone(), namespace);
        self.api
            .delete("delete_namespaced_deployment", deployments, name, dp, callback);
        Ok(())
    }
}

/// Operations on the storage.k8s.io v1 API group
#[derive(Clone, Debug)]
pub struct StorageV1Api {
    api: ApiClient,
}

impl StorageV1Api {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Creates a `StorageClass`
    pub fn create_storage_class(
        &self,
        body: Body,
        callback: Callback<StorageClass, Error>,
    ) -> Result<(), Error> {
        self.api.create("create_storage_class", None, body, callback)
    }
}

/// Operations on the networking.k8s.io v1 API group
#[derive(Clone, Debug)]
pub struct NetworkingV1Api {
    api: ApiClient,
}

impl NetworkingV1Api {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Creates an `Ingress` in `namespace`
    pub fn create_namespaced_ingress(
        &self,
        namespace: &str,
        body: Body,
        callback: Callback<Ingress, Error>,
    ) -> Result<(), Error> {
        self.api
            .create("create_namespaced_ingress", Some(namespace), body, callback)
    }

    /// Deletes the `Ingress` `name` in `namespace`
    pub fn delete_namespaced_ingress(
        &self,
        namespace: &str,
        name: &str,
        dp: &DeleteParams,
        callback: Callback<Either<Ingress, Status>, Error>,
    ) -> Result<(), Error> {
        let ingresses: Api<Ingress> = Api::namespaced(self.api.client().clone(), namespace);
        self.api
            .delete("delete_namespaced_ingress", ingresses, name, dp, callback);
        Ok(())
    }
}

/// Operations on the rbac.authorization.k8s.io v1 API group
#[derive(Clone, Debug)]
pub struct RbacAuthorizationV1Api {
    api: ApiClient,
}

impl RbacAuthorizationV1Api {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Creates a `ClusterRole`
    pub fn create_cluster_role(
        &self,
        body: Body,
        callback: Callback<ClusterRole, Error>,
    ) -> Result<(), Error> {
        self.api.create("create_cluster_role", None, body, callback)
    }

    /// Creates a `ClusterRoleBinding`
    pub fn create_cluster_role_binding(
        &self,
        body: Body,
        callback: Callback<ClusterRoleBinding, Error>,
    ) -> Result<(), Error> {
        self.api
            .create("create_cluster_role_binding", None, body, callback)
    }
}
