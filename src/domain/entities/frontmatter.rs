//! Notebook metadata
//!
//! Deserialized from Markdown YAML frontmatter or from the
//! `[tool.marimo.k8s]` table of a Python PEP 723 script block.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Deployment settings declared inside a notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    /// Resource name source (slugified)
    #[serde(deserialize_with = "deserialize_scalar")]
    pub title: Option<String>,
    /// Container image
    #[serde(deserialize_with = "deserialize_scalar")]
    pub image: Option<String>,
    /// marimo server port
    #[serde(deserialize_with = "deserialize_port")]
    pub port: Option<u16>,
    /// PVC size (e.g. "5Gi")
    #[serde(deserialize_with = "deserialize_scalar")]
    pub storage: Option<String>,
    /// "none" disables token authentication
    pub auth: Option<String>,
    /// Container environment
    pub env: BTreeMap<String, EnvValue>,
    /// Mount descriptors
    pub mounts: Vec<String>,
}

impl Frontmatter {
    pub fn auth_disabled(&self) -> bool {
        self.auth.as_deref() == Some("none")
    }
}

/// Environment variable value: inline or read from a Secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EnvValue {
    Inline(String),
    Secret { secret: String, key: Option<String> },
}

/// Any YAML/TOML scalar, kept as its text form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

/// Accept `title: 2024` as well as `title: "2024"`.
fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnvValueDe {
    Inline(Scalar),
    Secret {
        secret: String,
        #[serde(default)]
        key: Option<String>,
    },
}

impl<'de> Deserialize<'de> for EnvValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match EnvValueDe::deserialize(deserializer)? {
            EnvValueDe::Inline(scalar) => EnvValue::Inline(scalar.into()),
            EnvValueDe::Secret { secret, key } => EnvValue::Secret { secret, key },
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortDe {
    Number(u16),
    Text(String),
}

/// Accept `port: 8080` as well as `port: "8080"`.
fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PortDe>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PortDe::Number(n)) => Ok(Some(n)),
        Some(PortDe::Text(s)) => s
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid port '{}'", s))),
    }
}
