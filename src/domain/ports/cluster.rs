//! Cluster port - the control plane as a narrow RPC surface
//!
//! The domain never talks to Kubernetes directly. Implementations:
//! - `KubectlClient` - shells out to `kubectl`
//! - fakes in tests

use std::path::Path;
use std::time::Duration;

/// Result type for cluster operations
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Cluster operation errors
#[derive(Debug)]
pub enum ClusterError {
    /// The client binary could not be started
    Unavailable(String),
    /// A command ran and failed
    CommandFailed { command: String, stderr: String },
    /// Output could not be decoded
    InvalidOutput(String),
}

impl std::fmt::Display for ClusterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterError::Unavailable(msg) => write!(f, "cluster client unavailable: {}", msg),
            ClusterError::CommandFailed { command, stderr } => {
                write!(f, "'{}' failed: {}", command, stderr.trim())
            }
            ClusterError::InvalidOutput(msg) => write!(f, "invalid cluster output: {}", msg),
        }
    }
}

impl std::error::Error for ClusterError {}

/// A notebook pod: same name as its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PodRef<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
}

impl<'a> PodRef<'a> {
    pub fn new(name: &'a str, namespace: &'a str) -> Self {
        Self { name, namespace }
    }
}

impl std::fmt::Display for PodRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Abstract cluster client
pub trait ClusterClient {
    /// Apply a YAML manifest
    fn apply(&self, manifest: &str) -> ClusterResult<()>;

    /// Phase reported in the resource status (`None` when not set)
    fn phase(&self, resource_type: &str, pod: PodRef<'_>) -> ClusterResult<Option<String>>;

    /// Delete a resource
    fn delete(&self, resource_type: &str, pod: PodRef<'_>) -> ClusterResult<()>;

    /// Run a command in the notebook container and return stdout
    fn exec(&self, pod: PodRef<'_>, command: &[&str]) -> ClusterResult<String>;

    /// Wait until the pod reports Ready. `Ok(false)` on timeout.
    fn wait_ready(&self, pod: PodRef<'_>, timeout: Duration) -> ClusterResult<bool>;

    /// Copy a local file or directory into the notebook container
    fn copy_to_pod(&self, local: &Path, pod: PodRef<'_>, dest: &str) -> ClusterResult<()>;

    /// Logs of the notebook container
    fn logs(&self, pod: PodRef<'_>) -> ClusterResult<String>;

    /// Forward a local port to the notebook service. Blocks until the
    /// forward ends (e.g. interrupted).
    fn port_forward(&self, pod: PodRef<'_>, local_port: u16, remote_port: u16) -> ClusterResult<()>;
}

impl<C: ClusterClient + ?Sized> ClusterClient for &C {
    fn apply(&self, manifest: &str) -> ClusterResult<()> {
        (**self).apply(manifest)
    }

    fn phase(&self, resource_type: &str, pod: PodRef<'_>) -> ClusterResult<Option<String>> {
        (**self).phase(resource_type, pod)
    }

    fn delete(&self, resource_type: &str, pod: PodRef<'_>) -> ClusterResult<()> {
        (**self).delete(resource_type, pod)
    }

    fn exec(&self, pod: PodRef<'_>, command: &[&str]) -> ClusterResult<String> {
        (**self).exec(pod, command)
    }

    fn wait_ready(&self, pod: PodRef<'_>, timeout: Duration) -> ClusterResult<bool> {
        (**self).wait_ready(pod, timeout)
    }

    fn copy_to_pod(&self, local: &Path, pod: PodRef<'_>, dest: &str) -> ClusterResult<()> {
        (**self).copy_to_pod(local, pod, dest)
    }

    fn logs(&self, pod: PodRef<'_>) -> ClusterResult<String> {
        (**self).logs(pod)
    }

    fn port_forward(&self, pod: PodRef<'_>, local_port: u16, remote_port: u16) -> ClusterResult<()> {
        (**self).port_forward(pod, local_port, remote_port)
    }
}
