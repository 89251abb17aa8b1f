//! Registry of the Kubernetes object models reachable through the client
//!
//! Lets callers look up model descriptors by name, the way generated clients expose
//! their model namespace, without naming the k8s-openapi module path.
use std::{any::TypeId, collections::HashMap};

use k8s_openapi::NamespaceResourceScope;
use thiserror::Error;

/// No model is registered under the requested name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no such model: {name}")]
pub struct UnknownModel {
    /// The name that was looked up
    pub name: String,
}

/// Type information for one Kubernetes object model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelType {
    /// Rust path of the k8s-openapi type
    pub type_name: &'static str,
    /// API group, empty for the core group
    pub group: &'static str,
    /// API version within the group
    pub version: &'static str,
    /// `apiVersion` as found on the wire
    pub api_version: &'static str,
    /// `kind` as found on the wire
    pub kind: &'static str,
    /// Plural resource name used in URL paths
    pub plural: &'static str,
    /// Whether objects live inside a namespace
    pub namespaced: bool,
    type_id: TypeId,
}

impl ModelType {
    /// Describes the model `K`
    pub fn of<K: k8s_openapi::Resource + 'static>() -> Self {
        Self {
            type_name: std::any::type_name::<K>(),
            group: K::GROUP,
            version: K::VERSION,
            api_version: K::API_VERSION,
            kind: K::KIND,
            plural: K::URL_PATH_SEGMENT,
            namespaced: TypeId::of::<K::Scope>() == TypeId::of::<NamespaceResourceScope>(),
            type_id: TypeId::of::<K>(),
        }
    }

    /// Whether this describes the Rust type `K`
    pub fn is<K: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<K>()
    }

    /// Version-prefixed model name, e.g. `V1Namespace` or `V1beta1FlowSchema`
    pub fn model_name(&self) -> String {
        let mut chars = self.version.chars();
        match chars.next() {
            Some(first) => format!("{}{}{}", first.to_ascii_uppercase(), chars.as_str(), self.kind),
            None => self.kind.to_string(),
        }
    }

    /// `{apiVersion}/{kind}`, unique across groups
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.api_version, self.kind)
    }
}

/// Name-indexed set of [`ModelType`]s
///
/// Each model is reachable by its kind, its [model name](ModelType::model_name) and its
/// [qualified name](ModelType::qualified_name). When two models share a short name, the
/// first registered keeps it and the other stays reachable through its qualified name.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: Vec<ModelType>,
    index: HashMap<String, usize>,
}

macro_rules! register_all {
    ($registry:expr, $($model:ty),* $(,)?) => {
        $( $registry.register::<$model>(); )*
    };
}

impl ModelRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of common built-in Kubernetes models
    pub fn builtin() -> Self {
        use k8s_openapi::api::{
            apps, autoscaling, batch, coordination, core, networking, policy, rbac, storage,
        };

        let mut registry = Self::new();
        register_all!(
            registry,
            core::v1::ConfigMap,
            core::v1::Endpoints,
            core::v1::Event,
            core::v1::LimitRange,
            core::v1::Namespace,
            core::v1::Node,
            core::v1::PersistentVolume,
            core::v1::PersistentVolumeClaim,
            core::v1::Pod,
            core::v1::ReplicationController,
            core::v1::ResourceQuota,
            core::v1::Secret,
            core::v1::Service,
            core::v1::ServiceAccount,
            apps::v1::DaemonSet,
            apps::v1::Deployment,
            apps::v1::ReplicaSet,
            apps::v1::StatefulSet,
            autoscaling::v2::HorizontalPodAutoscaler,
            batch::v1::CronJob,
            batch::v1::Job,
            coordination::v1::Lease,
            networking::v1::Ingress,
            networking::v1::IngressClass,
            networking::v1::NetworkPolicy,
            policy::v1::PodDisruptionBudget,
            rbac::v1::ClusterRole,
            rbac::v1::ClusterRoleBinding,
            rbac::v1::Role,
            rbac::v1::RoleBinding,
            storage::v1::StorageClass,
        );
        registry
    }

    /// Adds the model `K`; registering the same type twice is a no-op
    pub fn register<K: k8s_openapi::Resource + 'static>(&mut self) -> &mut Self {
        if self.models.iter().any(ModelType::is::<K>) {
            return self;
        }
        let model = ModelType::of::<K>();
        let position = self.models.len();
        for key in [model.kind.to_string(), model.model_name(), model.qualified_name()] {
            self.index.entry(key).or_insert(position);
        }
        self.models.push(model);
        self
    }

    /// Looks up a model by kind, model name or qualified name
    pub fn lookup(&self, name: &str) -> Result<&ModelType, UnknownModel> {
        self.index
            .get(name)
            .map(|&position| &self.models[position])
            .ok_or_else(|| UnknownModel { name: name.into() })
    }

    /// Looks up the model of the Rust type `K`
    pub fn lookup_type<K: 'static>(&self) -> Result<&ModelType, UnknownModel> {
        self.models
            .iter()
            .find(|model| model.is::<K>())
            .ok_or_else(|| UnknownModel {
                name: std::any::type_name::<K>().into(),
            })
    }

    /// Iterates over registered models in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ModelType> {
        self.models.iter()
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model is registered
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
