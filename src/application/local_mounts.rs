//! Local mount copy
//!
//! Local mounts never reach the cluster controller. Once the pod is ready,
//! their sources are copied in with `kubectl cp`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::TRACKING_SUFFIX;
use crate::domain::ports::{ClusterClient, PodRef, ProgressEvent, ProgressSink};
use crate::domain::services::LocalMount;

/// What happened to one local mount
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    MissingSource,
    Failed(String),
}

/// Copy source for `kubectl cp`: a directory's contents, or the file itself.
fn copy_source(source: &Path) -> PathBuf {
    if source.is_dir() {
        source.join(".")
    } else {
        source.to_path_buf()
    }
}

/// Copy one local mount into the notebook container.
pub fn copy_local_mount<C: ClusterClient>(
    cluster: &C,
    pod: PodRef<'_>,
    mount: &LocalMount,
) -> CopyOutcome {
    let source = Path::new(&mount.source);
    if !source.exists() {
        return CopyOutcome::MissingSource;
    }

    if let Err(e) = cluster.exec(pod, &["mkdir", "-p", &mount.mount_point]) {
        debug!(mount_point = %mount.mount_point, "mkdir in pod failed: {}", e);
    }

    if let Err(e) = cluster.copy_to_pod(&copy_source(source), pod, &mount.mount_point) {
        return CopyOutcome::Failed(e.to_string());
    }

    // Tracking files from the source tree mean nothing inside the pod.
    let pattern = format!("*{}", TRACKING_SUFFIX);
    if let Err(e) = cluster.exec(
        pod,
        &["find", &mount.mount_point, "-name", &pattern, "-delete"],
    ) {
        debug!(mount_point = %mount.mount_point, "tracking file cleanup failed: {}", e);
    }

    CopyOutcome::Copied
}

/// Copy every mount in order, reporting each outcome.
pub fn copy_local_mounts<C: ClusterClient>(
    cluster: &C,
    pod: PodRef<'_>,
    mounts: &[LocalMount],
    sink: &dyn ProgressSink,
) -> usize {
    let mut copied = 0;
    for mount in mounts {
        let event = match copy_local_mount(cluster, pod, mount) {
            CopyOutcome::Copied => {
                copied += 1;
                ProgressEvent::MountCopied {
                    source: mount.source.clone(),
                    mount_point: mount.mount_point.clone(),
                }
            }
            CopyOutcome::MissingSource => ProgressEvent::MountMissing {
                source: mount.source.clone(),
            },
            CopyOutcome::Failed(error) => ProgressEvent::MountFailed {
                source: mount.source.clone(),
                error,
            },
        };
        sink.on_event(event);
    }
    copied
}
