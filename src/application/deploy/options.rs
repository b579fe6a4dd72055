//! Deploy Options
//!
//! Input and output types for deploy operations.

use std::path::PathBuf;

use crate::domain::services::LocalMount;
use crate::domain::value_objects::NotebookMode;

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub mode: NotebookMode,
    pub namespace: String,
    /// Primary mount descriptor, ahead of those declared in metadata
    pub source: Option<String>,
    /// Render the resource without touching the cluster
    pub dry_run: bool,
    /// Skip the local-modification check
    pub force: bool,
    /// Copy local mounts into the pod after apply
    pub copy_local_mounts: bool,
}

impl DeployOptions {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            mode: NotebookMode::default(),
            namespace: namespace.into(),
            source: None,
            dry_run: false,
            force: false,
            copy_local_mounts: true,
        }
    }

    pub fn with_mode(mut self, mode: NotebookMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_copy_local_mounts(mut self, copy: bool) -> Self {
        self.copy_local_mounts = copy;
        self
    }
}

/// A deployment that reached the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub name: String,
    pub namespace: String,
    pub mode: NotebookMode,
    /// Port marimo listens on in the pod
    pub port: u16,
    pub auth_disabled: bool,
    /// Local notebook path (canonical for directories)
    pub path: PathBuf,
    pub is_directory: bool,
    pub tracking_path: PathBuf,
    pub local_mounts: Vec<LocalMount>,
}

/// Result of a deploy operation
#[derive(Debug, Clone, PartialEq)]
pub enum DeployOutcome {
    /// Rendered only
    DryRun {
        manifest: String,
        local_mounts: Vec<LocalMount>,
    },
    /// The user declined to overwrite a locally modified notebook
    Cancelled,
    Deployed(Deployment),
}
