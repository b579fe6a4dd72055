//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::services::{ResourceBuilder, DEFAULT_STORAGE};
use crate::domain::value_objects::{MountPaths, MountResolver, DEFAULT_NOTEBOOK_DIR};
use crate::error::MarimoResult;

use super::loader::{self, ConfigWarning};

pub use crate::domain::entities::resource::DEFAULT_PORT;

/// Deployment defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_storage")]
    pub storage: String,

    /// Image used when the notebook does not name one
    #[serde(default)]
    pub image: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            port: default_port(),
            storage: default_storage(),
            image: None,
        }
    }
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_storage() -> String {
    DEFAULT_STORAGE.to_string()
}

/// Paths inside the notebook pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_notebook_dir")]
    pub notebook_dir: String,

    /// Defaults to `<notebook_dir>/mounts`
    #[serde(default)]
    pub mounts_dir: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            notebook_dir: default_notebook_dir(),
            mounts_dir: None,
        }
    }
}

fn default_notebook_dir() -> String {
    DEFAULT_NOTEBOOK_DIR.to_string()
}

/// kubectl invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubectlConfig {
    #[serde(default = "default_binary")]
    pub binary: String,

    #[serde(default = "default_container")]
    pub container: String,

    #[serde(default = "default_ready_timeout")]
    pub ready_timeout_secs: u64,
}

impl Default for KubectlConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            container: default_container(),
            ready_timeout_secs: default_ready_timeout(),
        }
    }
}

fn default_binary() -> String {
    "kubectl".to_string()
}

fn default_container() -> String {
    "marimo".to_string()
}

fn default_ready_timeout() -> u64 {
    120
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub kubectl: KubectlConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> MarimoResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> MarimoResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from user config or defaults, then apply env overrides
    pub fn load_or_default() -> Self {
        loader::load_or_default()
    }

    /// Apply environment variable overrides (KUBECTL_MARIMO_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Pod-side base paths for mount resolution
    pub fn mount_paths(&self) -> MountPaths {
        match &self.paths.mounts_dir {
            Some(mounts) => MountPaths::new(self.paths.notebook_dir.clone(), mounts.clone()),
            None => MountPaths::under(self.paths.notebook_dir.clone()),
        }
    }

    pub fn resolver(&self) -> MountResolver {
        MountResolver::new(self.mount_paths())
    }

    pub fn resource_builder(&self) -> ResourceBuilder {
        ResourceBuilder::new(self.resolver())
            .with_default_storage(self.defaults.storage.clone())
            .with_default_image(self.defaults.image.clone())
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.kubectl.ready_timeout_secs)
    }
}
