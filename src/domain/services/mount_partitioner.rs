//! Mount partitioning
//!
//! Splits a batch of mount descriptors into the ones the cluster controller
//! resolves (embedded in the resource) and the ones this tool copies into
//! the pod itself.

use tracing::debug;

use crate::domain::value_objects::MountResolver;

/// A mount resolved on the operator's machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalMount {
    /// Path on the operator's machine (relative or absolute)
    pub source: String,
    /// Absolute path inside the pod
    pub mount_point: String,
    pub scheme: String,
}

impl LocalMount {
    pub fn new(
        source: impl Into<String>,
        mount_point: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            mount_point: mount_point.into(),
            scheme: scheme.into(),
        }
    }
}

/// Result of partitioning one mount batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPlan {
    /// Raw descriptors, in input order
    pub remote: Vec<String>,
    /// Local mounts, in input order
    pub local: Vec<LocalMount>,
}

impl MountPlan {
    pub fn is_empty(&self) -> bool {
        self.remote.is_empty() && self.local.is_empty()
    }
}

impl MountResolver {
    /// Partition descriptors into remote and local mounts.
    ///
    /// Never fails: descriptors that do not parse are passed through as
    /// remote, unchanged. Default mount points are numbered by position
    /// among local mounts only.
    pub fn partition<S: AsRef<str>>(&self, mounts: &[S]) -> MountPlan {
        let mut plan = MountPlan::default();

        for raw in mounts.iter().map(AsRef::as_ref) {
            let parsed = match self.parse(raw) {
                Ok(parsed) => parsed,
                Err(err) => {
                    debug!(mount = raw, error = %err, "passing unrecognized mount to controller");
                    plan.remote.push(raw.to_string());
                    continue;
                }
            };

            if !parsed.is_local() {
                plan.remote.push(raw.to_string());
                continue;
            }

            let index = plan.local.len();
            let mount_point = parsed
                .mount_point
                .unwrap_or_else(|| self.paths().default_local_mount(index));
            plan.local
                .push(LocalMount::new(parsed.source, mount_point, parsed.scheme));
        }

        plan
    }
}

/// Concatenate the primary source (first) with metadata mounts.
pub fn mount_batch(source: Option<&str>, declared: &[String]) -> Vec<String> {
    source
        .map(str::to_string)
        .into_iter()
        .chain(declared.iter().cloned())
        .collect()
}
