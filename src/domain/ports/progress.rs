//! Progress Event Port
//!
//! Use cases report what they are doing through a sink; the presentation
//! layer decides how it looks.

use std::path::PathBuf;

/// Event emitted while talking to the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Waiting for the notebook pod to become ready
    WaitingForPod { name: String },

    /// The pod did not become ready in time
    PodNotReady { name: String },

    /// A local mount was copied into the pod
    MountCopied { source: String, mount_point: String },

    /// A local mount source does not exist
    MountMissing { source: String },

    /// Copying a local mount failed
    MountFailed { source: String, error: String },

    /// Tracking record written
    Tracking { path: PathBuf },

    /// Pulling pod content before deleting the resource
    SyncingBeforeDelete,

    /// Pulling pod content failed; the operation continues
    PullFailed { error: String },

    /// PVC must be detached by hand to survive deletion
    KeepPvc { name: String, namespace: String },
}

/// Trait for receiving progress events
pub trait ProgressSink {
    fn on_event(&self, event: ProgressEvent);
}

/// No-op sink for silent operation
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn on_event(&self, _event: ProgressEvent) {}
}
