//! Delete Use Case
//!
//! Pulls the latest notebook content, then removes the resource and its
//! tracking record.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::entities::resource::RESOURCE_TYPE;
use crate::domain::entities::TrackingRecord;
use crate::domain::ports::{
    ClusterClient, DivergenceAction, DivergenceContext, DivergenceResolver, PodRef,
    ProgressEvent, ProgressSink, TrackingRepository,
};
use crate::domain::value_objects::{name, MountPaths};
use crate::error::{MarimoError, MarimoResult};
use crate::formats;
use crate::infrastructure::fs::atomic_write;

use super::sync::{local_content_type, pull_notebook};

/// Options for the delete use case
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// Overrides the recorded namespace
    pub namespace: Option<String>,
    /// Skip the local-modification check
    pub force: bool,
    /// Delete without pulling pod content first
    pub no_sync: bool,
    /// Print how to keep the PVC alive
    pub keep_pvc: bool,
}

/// Result of a delete operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted {
        name: String,
        namespace: String,
        synced: bool,
    },
    Cancelled,
}

/// Delete use case
pub struct DeleteUseCase<C, T, R>
where
    C: ClusterClient,
    T: TrackingRepository,
    R: DivergenceResolver,
{
    cluster: C,
    tracking: T,
    resolver: R,
    paths: MountPaths,
    default_namespace: String,
}

impl<C, T, R> DeleteUseCase<C, T, R>
where
    C: ClusterClient,
    T: TrackingRepository,
    R: DivergenceResolver,
{
    pub fn new(
        cluster: C,
        tracking: T,
        resolver: R,
        paths: MountPaths,
        default_namespace: impl Into<String>,
    ) -> Self {
        Self {
            cluster,
            tracking,
            resolver,
            paths,
            default_namespace: default_namespace.into(),
        }
    }

    pub fn execute(
        &self,
        path: &Path,
        options: &DeleteOptions,
        sink: &dyn ProgressSink,
    ) -> MarimoResult<DeleteOutcome> {
        if !path.exists() {
            return Err(MarimoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let record = self.tracking.load(path)?;
        let name = match &record {
            Some(record) => record.name().to_string(),
            None => self.resource_name(path)?,
        };
        let namespace = options
            .namespace
            .clone()
            .or_else(|| record.as_ref().map(|r| r.namespace().to_string()))
            .unwrap_or_else(|| self.default_namespace.clone());
        let pod = PodRef::new(&name, &namespace);

        let mut synced = false;
        if let Some(record) = record.as_ref().filter(|_| !options.no_sync && path.is_file()) {
            sink.on_event(ProgressEvent::SyncingBeforeDelete);
            match self.sync_before_delete(path, pod, record, options, sink)? {
                Some(done) => synced = done,
                None => return Ok(DeleteOutcome::Cancelled),
            }
        }

        if options.keep_pvc {
            sink.on_event(ProgressEvent::KeepPvc {
                name: name.clone(),
                namespace: namespace.clone(),
            });
        }

        self.cluster.delete(RESOURCE_TYPE, pod)?;
        self.tracking.delete(path)?;
        info!(%pod, "deleted notebook");

        Ok(DeleteOutcome::Deleted {
            name,
            namespace,
            synced,
        })
    }

    /// `None` when cancelled, else whether pod content was written locally.
    fn sync_before_delete(
        &self,
        path: &Path,
        pod: PodRef<'_>,
        record: &TrackingRecord,
        options: &DeleteOptions,
        sink: &dyn ProgressSink,
    ) -> MarimoResult<Option<bool>> {
        let current = fs::read_to_string(path)?;

        if !options.force
            && record.is_modified(&current)
            && !self.resolver.proceed(&DivergenceContext {
                path,
                action: DivergenceAction::Delete,
            })
        {
            return Ok(None);
        }

        let content_type = local_content_type(path, Some(&current));
        match pull_notebook(&self.cluster, pod, &self.paths, content_type) {
            Ok(content) => {
                atomic_write(path, content.as_bytes())?;
                Ok(Some(true))
            }
            Err(e) => {
                sink.on_event(ProgressEvent::PullFailed {
                    error: e.to_string(),
                });
                Ok(Some(false))
            }
        }
    }

    fn resource_name(&self, path: &Path) -> MarimoResult<String> {
        if path.is_dir() {
            let canonical = path.canonicalize()?;
            let dir_name = canonical
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Ok(name::for_directory(&dir_name));
        }
        Ok(formats::parse_file(path)?.name().to_string())
    }
}
