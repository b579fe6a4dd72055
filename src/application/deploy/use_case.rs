//! Deploy Use Case
//!
//! Orchestrates the deploy flow.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::application::local_mounts::copy_local_mounts;
use crate::domain::entities::resource::DEFAULT_PORT;
use crate::domain::entities::{NotebookDocument, TrackedMount, TrackingRecord};
use crate::domain::ports::{
    ClusterClient, DivergenceAction, DivergenceContext, DivergenceResolver, PodRef,
    ProgressEvent, ProgressSink, TrackingRepository,
};
use crate::domain::services::ResourceBuilder;
use crate::domain::value_objects::ContentHash;
use crate::error::{MarimoError, MarimoResult};
use crate::formats;

use super::options::{DeployOptions, DeployOutcome, Deployment};

/// Deploy use case - turns a local notebook into a running MarimoNotebook
pub struct DeployUseCase<C, T, R>
where
    C: ClusterClient,
    T: TrackingRepository,
    R: DivergenceResolver,
{
    cluster: C,
    tracking: T,
    resolver: R,
    builder: ResourceBuilder,
    default_port: u16,
    ready_timeout: Duration,
}

impl<C, T, R> DeployUseCase<C, T, R>
where
    C: ClusterClient,
    T: TrackingRepository,
    R: DivergenceResolver,
{
    pub fn new(cluster: C, tracking: T, resolver: R, builder: ResourceBuilder) -> Self {
        Self {
            cluster,
            tracking,
            resolver,
            builder,
            default_port: DEFAULT_PORT,
            ready_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    /// Deploy the notebook file or directory at `path`.
    pub fn execute(
        &self,
        path: &Path,
        options: &DeployOptions,
        sink: &dyn ProgressSink,
    ) -> MarimoResult<DeployOutcome> {
        let Some(notebook) = self.load_notebook(path, options)? else {
            info!(path = %path.display(), "deploy cancelled");
            return Ok(DeployOutcome::Cancelled);
        };

        let built = self.builder.build(
            &notebook,
            &options.namespace,
            options.mode,
            options.source.as_deref(),
        );
        let manifest = built.resource.to_yaml()?;

        if options.dry_run {
            return Ok(DeployOutcome::DryRun {
                manifest,
                local_mounts: built.local_mounts,
            });
        }

        self.cluster.apply(&manifest)?;
        let name = built.resource.name();
        let namespace = built.resource.namespace();
        info!(%name, %namespace, mode = %options.mode, "applied notebook");

        if options.copy_local_mounts && !built.local_mounts.is_empty() {
            let pod = PodRef::new(name, namespace);
            sink.on_event(ProgressEvent::WaitingForPod {
                name: name.to_string(),
            });
            if self.pod_ready(pod) {
                copy_local_mounts(&self.cluster, pod, &built.local_mounts, sink);
            } else {
                sink.on_event(ProgressEvent::PodNotReady {
                    name: name.to_string(),
                });
            }
        }

        let record = TrackingRecord::new(
            name,
            namespace,
            notebook.path().display().to_string(),
            notebook.content().map(ContentHash::from_content),
        )
        .with_local_mounts(
            built
                .local_mounts
                .iter()
                .map(|m| TrackedMount {
                    local: m.source.clone(),
                    remote: m.mount_point.clone(),
                })
                .collect(),
        );
        self.tracking.save(notebook.path(), &record)?;
        let tracking_path = self.tracking.location(notebook.path());
        sink.on_event(ProgressEvent::Tracking {
            path: tracking_path.clone(),
        });

        Ok(DeployOutcome::Deployed(Deployment {
            name: name.to_string(),
            namespace: namespace.to_string(),
            mode: options.mode,
            port: notebook.port().unwrap_or(self.default_port),
            auth_disabled: notebook.auth_disabled(),
            path: notebook.path().to_path_buf(),
            is_directory: notebook.is_directory(),
            tracking_path,
            local_mounts: built.local_mounts,
        }))
    }

    /// `None` when the user declines to overwrite a modified notebook.
    fn load_notebook(
        &self,
        path: &Path,
        options: &DeployOptions,
    ) -> MarimoResult<Option<NotebookDocument>> {
        if path.is_dir() {
            let canonical = path.canonicalize()?;
            let dir_name = canonical
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Ok(Some(NotebookDocument::directory(canonical, &dir_name)));
        }

        if !path.is_file() {
            return Err(MarimoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        if !options.force && !self.confirm_overwrite(path)? {
            return Ok(None);
        }

        formats::parse_file(path).map(Some)
    }

    fn confirm_overwrite(&self, path: &Path) -> MarimoResult<bool> {
        let Some(record) = self.tracking.load(path)? else {
            return Ok(true);
        };
        let current = fs::read_to_string(path)?;
        if !record.is_modified(&current) {
            return Ok(true);
        }

        Ok(self.resolver.proceed(&DivergenceContext {
            path,
            action: DivergenceAction::Deploy,
        }))
    }

    fn pod_ready(&self, pod: PodRef<'_>) -> bool {
        match self.cluster.wait_ready(pod, self.ready_timeout) {
            Ok(ready) => ready,
            Err(e) => {
                debug!(%pod, "wait for pod failed: {}", e);
                false
            }
        }
    }
}
