//! Request bodies for create calls
use serde::Serialize;

/// Content type of serialized typed objects
pub const JSON_MIME: &str = "application/json";
/// Content type of raw manifests; JSON manifests are valid YAML too
pub const YAML_MIME: &str = "application/yaml";

/// The payload of a create request
///
/// Typed objects are serialized to JSON up front. Raw manifest text is passed through
/// byte for byte and left for the API server to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// A serialized object
    Json(Vec<u8>),
    /// Raw manifest text, sent verbatim
    Yaml(String),
}

impl Body {
    /// Serializes a typed object
    pub fn json<K: Serialize>(object: &K) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(object).map(Body::Json)
    }

    /// Wraps raw manifest text
    pub fn yaml(raw: impl Into<String>) -> Self {
        Body::Yaml(raw.into())
    }

    /// The `Content-Type` the body must be sent with
    pub fn content_type(&self) -> &'static str {
        match self {
            Body::Json(_) => JSON_MIME,
            Body::Yaml(_) => YAML_MIME,
        }
    }

    /// The bytes on the wire
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Json(bytes) => bytes,
            Body::Yaml(raw) => raw.as_bytes(),
        }
    }

    /// Consumes the body into the bytes on the wire
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Body::Json(bytes) => bytes,
            Body::Yaml(raw) => raw.into_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Body, JSON_MIME, YAML_MIME};
    use k8s_openapi::api::core::v1::Namespace;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[test]
    fn typed_objects_serialize_with_type_information() {
        let ns = Namespace {
            metadata: ObjectMeta {
                name: Some("grn-se-com".into()),
                ..ObjectMeta::default()
            },
            ..Namespace::default()
        };
        let body = Body::json(&ns).unwrap();
        assert_eq!(body.content_type(), JSON_MIME);
        let value: serde_json::Value = serde_json::from_slice(body.as_bytes()).unwrap();
        assert_eq!(value["apiVersion"], "v1");
        assert_eq!(value["kind"], "Namespace");
        assert_eq!(value["metadata"]["name"], "grn-se-com");
    }

    #[test]
    fn manifests_pass_through_verbatim() {
        let raw = "kind: Service\n# keep me\nmetadata: {name: web}\n";
        let body = Body::yaml(raw);
        assert_eq!(body.content_type(), YAML_MIME);
        assert_eq!(body.into_bytes(), raw.as_bytes());
    }
}
