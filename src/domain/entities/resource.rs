//! MarimoNotebook custom resource model
//!
//! Only the fields this tool writes. Serialized to YAML and piped to
//! `kubectl apply -f -`.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::NotebookMode;

pub const API_VERSION: &str = "marimo.io/v1alpha1";
pub const KIND: &str = "MarimoNotebook";
/// Fully qualified resource type for `kubectl get/delete`.
pub const RESOURCE_TYPE: &str = "marimos.marimo.io";
/// Port marimo listens on unless the notebook says otherwise.
pub const DEFAULT_PORT: u16 = 2718;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarimoNotebook {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: MarimoNotebookSpec,
}

impl MarimoNotebook {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, spec: MarimoNotebookSpec) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta {
                name: name.into(),
                namespace: namespace.into(),
            },
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarimoNotebookSpec {
    pub mode: NotebookMode,
    /// Absent for directory deployments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub storage: StorageSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Present and empty disables token auth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    /// Remote mount descriptors, resolved by the controller
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mounts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSpec {
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSpec {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<EnvVarSource>,
}

impl EnvVar {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            value_from: None,
        }
    }

    pub fn from_secret(
        name: impl Into<String>,
        secret: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_from: Some(EnvVarSource {
                secret_key_ref: SecretKeySelector {
                    name: secret.into(),
                    key: key.into(),
                },
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    pub secret_key_ref: SecretKeySelector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKeySelector {
    pub name: String,
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> MarimoNotebookSpec {
        MarimoNotebookSpec {
            mode: NotebookMode::Edit,
            content: Some("import marimo".to_string()),
            storage: StorageSpec {
                size: "1Gi".to_string(),
            },
            image: None,
            port: None,
            auth: None,
            env: Vec::new(),
            mounts: Vec::new(),
        }
    }

    #[test]
    fn yaml_has_camel_case_header() {
        let yaml = MarimoNotebook::new("nb", "default", spec()).to_yaml().unwrap();
        assert!(yaml.starts_with("apiVersion: marimo.io/v1alpha1\nkind: MarimoNotebook\n"));
        assert!(yaml.contains("mode: edit"));
        assert!(!yaml.contains("mounts"));
        assert!(!yaml.contains("auth"));
    }

    #[test]
    fn missing_content_is_omitted() {
        let mut spec = spec();
        spec.content = None;
        let yaml = MarimoNotebook::new("nb", "default", spec).to_yaml().unwrap();
        assert!(!yaml.contains("content"));
        assert!(yaml.contains("mode: edit\n  storage:"));
    }

    #[test]
    fn empty_auth_serializes_as_empty_map() {
        let mut spec = spec();
        spec.auth = Some(AuthSpec {});
        let yaml = MarimoNotebook::new("nb", "default", spec).to_yaml().unwrap();
        assert!(yaml.contains("auth: {}"));
    }

    #[test]
    fn secret_env_uses_value_from() {
        let mut spec = spec();
        spec.env = vec![EnvVar::from_secret("API_KEY", "my-secret", "api-key")];
        let resource = MarimoNotebook::new("nb", "default", spec);
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(
            value["spec"]["env"][0]["valueFrom"]["secretKeyRef"]["name"],
            "my-secret"
        );
        assert!(value["spec"]["env"][0].get("value").is_none());
    }

    #[test]
    fn yaml_parses_back() {
        let resource = MarimoNotebook::new("nb", "team", spec());
        let yaml = resource.to_yaml().unwrap();
        let parsed: MarimoNotebook = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed, resource);
    }
}
