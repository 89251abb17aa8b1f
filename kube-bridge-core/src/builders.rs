//! Constructors for the request objects sent by the resource helpers
//!
//! Each builder copies its inputs into the typed object unchanged. `apiVersion` and
//! `kind` come from the k8s-openapi type and are emitted when the object is serialized.
use std::collections::BTreeMap;

use k8s_openapi::{
    api::{
        core::v1::{
            ConfigMap, ConfigMapKeySelector, EnvVar, EnvVarSource, Namespace, PersistentVolumeClaim,
            PersistentVolumeClaimSpec, Secret,
        },
        storage::v1::StorageClass,
    },
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};

/// A `PersistentVolumeClaim` with the given metadata and spec
pub fn persistent_volume_claim(
    metadata: ObjectMeta,
    spec: PersistentVolumeClaimSpec,
) -> PersistentVolumeClaim {
    PersistentVolumeClaim {
        metadata,
        spec: Some(spec),
        ..PersistentVolumeClaim::default()
    }
}

/// A `StorageClass` backed by `provisioner`
pub fn storage_class(metadata: ObjectMeta, provisioner: impl Into<String>) -> StorageClass {
    StorageClass {
        metadata,
        provisioner: provisioner.into(),
        ..StorageClass::default()
    }
}

/// A `ConfigMap` holding `data`
pub fn config_map(metadata: ObjectMeta, data: BTreeMap<String, String>) -> ConfigMap {
    ConfigMap {
        metadata,
        data: Some(data),
        ..ConfigMap::default()
    }
}

/// A `Secret` from plain-text values; the API server encodes them
pub fn secret(metadata: ObjectMeta, string_data: BTreeMap<String, String>) -> Secret {
    Secret {
        metadata,
        string_data: Some(string_data),
        ..Secret::default()
    }
}

/// A `Namespace`
pub fn namespace(metadata: ObjectMeta) -> Namespace {
    Namespace {
        metadata,
        ..Namespace::default()
    }
}

/// An environment variable named `name` whose value is `key` of the config map `config_map`
pub fn env_var_from_config_map(
    name: impl Into<String>,
    config_map: impl Into<String>,
    key: impl Into<String>,
) -> EnvVar {
    EnvVar {
        name: name.into(),
        value_from: Some(EnvVarSource {
            config_map_key_ref: Some(ConfigMapKeySelector {
                name: config_map.into(),
                key: key.into(),
                ..ConfigMapKeySelector::default()
            }),
            ..EnvVarSource::default()
        }),
        ..EnvVar::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::{
        api::core::v1::VolumeResourceRequirements, apimachinery::pkg::api::resource::Quantity,
    };
    use serde_json::json;

    fn meta(name: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.into()),
            ..ObjectMeta::default()
        }
    }

    #[test]
    fn pvc_carries_exactly_the_given_fields() {
        let spec = PersistentVolumeClaimSpec {
            access_modes: Some(vec!["ReadWriteOnce".into()]),
            resources: Some(VolumeResourceRequirements {
                requests: Some([("storage".to_string(), Quantity("1Gi".into()))].into()),
                ..VolumeResourceRequirements::default()
            }),
            ..PersistentVolumeClaimSpec::default()
        };
        let pvc = persistent_volume_claim(meta("happy"), spec.clone());
        assert_eq!(pvc.metadata, meta("happy"));
        assert_eq!(pvc.spec, Some(spec));
        assert_eq!(
            serde_json::to_value(&pvc).unwrap(),
            json!({
                "apiVersion": "v1",
                "kind": "PersistentVolumeClaim",
                "metadata": { "name": "happy" },
                "spec": {
                    "accessModes": ["ReadWriteOnce"],
                    "resources": { "requests": { "storage": "1Gi" } }
                }
            })
        );
    }

    #[test]
    fn storage_class_names_its_provisioner() {
        let sc = storage_class(meta("happy"), "aws-efs");
        let value = serde_json::to_value(&sc).unwrap();
        assert_eq!(value["apiVersion"], "storage.k8s.io/v1");
        assert_eq!(value["kind"], "StorageClass");
        assert_eq!(value["metadata"]["name"], "happy");
        assert_eq!(value["provisioner"], "aws-efs");
    }

    #[test]
    fn config_map_and_secret_keep_their_data() {
        let data: BTreeMap<String, String> = [("days".to_string(), "7".to_string())].into();
        let cm = config_map(meta("happy"), data.clone());
        assert_eq!(cm.data, Some(data.clone()));
        let secret = secret(meta("happy"), data.clone());
        assert_eq!(secret.string_data, Some(data));
        assert_eq!(secret.data, None);
    }

    #[test]
    fn env_var_references_config_map_key() {
        let var = env_var_from_config_map("fun!", "cmName", "cmKey");
        assert_eq!(
            serde_json::to_value(&var).unwrap(),
            json!({
                "name": "fun!",
                "valueFrom": {
                    "configMapKeyRef": { "name": "cmName", "key": "cmKey" }
                }
            })
        );
    }
}
