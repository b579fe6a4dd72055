//! Sync Use Case
//!
//! Pulls the notebook the pod is editing back into the local file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::ports::{
    ClusterClient, ClusterResult, DivergenceAction, DivergenceContext, DivergenceResolver, PodRef,
    TrackingRepository,
};
use crate::domain::value_objects::{ContentHash, ContentType, MountPaths};
use crate::error::{MarimoError, MarimoResult};
use crate::infrastructure::fs::atomic_write;

/// Options for the sync use case
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Overrides the recorded namespace
    pub namespace: Option<String>,
    /// Skip the local-modification check
    pub force: bool,
}

/// Result of a sync operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced { name: String, namespace: String },
    Cancelled,
}

/// Read the notebook file the pod serves.
pub(crate) fn pull_notebook<C: ClusterClient>(
    cluster: &C,
    pod: PodRef<'_>,
    paths: &MountPaths,
    content_type: ContentType,
) -> ClusterResult<String> {
    let remote = format!(
        "{}/{}",
        paths.notebook_dir().trim_end_matches('/'),
        content_type.pod_file_name()
    );
    cluster.exec(pod, &["cat", &remote])
}

/// Content type of the local file, used to pick the pod-side file name.
pub(crate) fn local_content_type(path: &Path, current: Option<&str>) -> ContentType {
    ContentType::for_path(path, current.unwrap_or_default())
}

/// Sync use case
pub struct SyncUseCase<C, T, R>
where
    C: ClusterClient,
    T: TrackingRepository,
    R: DivergenceResolver,
{
    cluster: C,
    tracking: T,
    resolver: R,
    paths: MountPaths,
}

impl<C, T, R> SyncUseCase<C, T, R>
where
    C: ClusterClient,
    T: TrackingRepository,
    R: DivergenceResolver,
{
    pub fn new(cluster: C, tracking: T, resolver: R, paths: MountPaths) -> Self {
        Self {
            cluster,
            tracking,
            resolver,
            paths,
        }
    }

    pub fn execute(&self, path: &Path, options: &SyncOptions) -> MarimoResult<SyncOutcome> {
        let mut record = self
            .tracking
            .load(path)?
            .ok_or_else(|| MarimoError::NotDeployed {
                path: path.to_path_buf(),
            })?;

        if path.is_dir() {
            return Err(MarimoError::DirectorySync {
                path: path.to_path_buf(),
            });
        }

        let namespace = options
            .namespace
            .clone()
            .unwrap_or_else(|| record.namespace().to_string());

        let current = if path.is_file() {
            Some(fs::read_to_string(path)?)
        } else {
            None
        };

        if !options.force {
            if let Some(current) = &current {
                let proceed = !record.is_modified(current)
                    || self.resolver.proceed(&DivergenceContext {
                        path,
                        action: DivergenceAction::Sync,
                    });
                if !proceed {
                    return Ok(SyncOutcome::Cancelled);
                }
            }
        }

        let name = record.name().to_string();
        let pod = PodRef::new(&name, &namespace);
        let content = pull_notebook(
            &self.cluster,
            pod,
            &self.paths,
            local_content_type(path, current.as_deref()),
        )?;

        atomic_write(path, content.as_bytes())?;
        record.set_file_hash(ContentHash::from_content(&content));
        self.tracking.save(path, &record)?;
        info!(%pod, path = %path.display(), "synced notebook from pod");

        Ok(SyncOutcome::Synced { name, namespace })
    }
}
