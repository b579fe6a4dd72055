//! Test doubles for use case tests

use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

use crate::domain::ports::{
    ClusterClient, ClusterError, ClusterResult, PodRef, ProgressEvent, ProgressSink,
};

/// In-memory cluster that records every call.
pub(crate) struct FakeCluster {
    pub calls: RefCell<Vec<String>>,
    pub applied: RefCell<Vec<String>>,
    pub ready: bool,
    pub pod_content: Option<String>,
    pub logs: String,
    pub phase: ClusterResult<Option<String>>,
    pub fail_copy: bool,
}

impl Default for FakeCluster {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            applied: RefCell::new(Vec::new()),
            ready: true,
            pod_content: None,
            logs: String::new(),
            phase: Ok(Some("Running".to_string())),
            fail_copy: false,
        }
    }
}

impl FakeCluster {
    pub fn with_pod_content(content: &str) -> Self {
        Self {
            pod_content: Some(content.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl ClusterClient for FakeCluster {
    fn apply(&self, manifest: &str) -> ClusterResult<()> {
        self.record("apply".to_string());
        self.applied.borrow_mut().push(manifest.to_string());
        Ok(())
    }

    fn phase(&self, _resource_type: &str, pod: PodRef<'_>) -> ClusterResult<Option<String>> {
        self.record(format!("phase {}", pod));
        match &self.phase {
            Ok(phase) => Ok(phase.clone()),
            Err(_) => Err(ClusterError::Unavailable("fake".to_string())),
        }
    }

    fn delete(&self, resource_type: &str, pod: PodRef<'_>) -> ClusterResult<()> {
        self.record(format!("delete {} {}", resource_type, pod));
        Ok(())
    }

    fn exec(&self, pod: PodRef<'_>, command: &[&str]) -> ClusterResult<String> {
        self.record(format!("exec {} {}", pod, command.join(" ")));
        if command.first() == Some(&"cat") {
            return self.pod_content.clone().ok_or(ClusterError::CommandFailed {
                command: command.join(" "),
                stderr: "No such file or directory".to_string(),
            });
        }
        Ok(String::new())
    }

    fn wait_ready(&self, pod: PodRef<'_>, _timeout: Duration) -> ClusterResult<bool> {
        self.record(format!("wait {}", pod));
        Ok(self.ready)
    }

    fn copy_to_pod(&self, local: &Path, pod: PodRef<'_>, dest: &str) -> ClusterResult<()> {
        self.record(format!("cp {} {}:{}", local.display(), pod, dest));
        if self.fail_copy {
            return Err(ClusterError::CommandFailed {
                command: "cp".to_string(),
                stderr: "denied".to_string(),
            });
        }
        Ok(())
    }

    fn logs(&self, pod: PodRef<'_>) -> ClusterResult<String> {
        self.record(format!("logs {}", pod));
        Ok(self.logs.clone())
    }

    fn port_forward(&self, pod: PodRef<'_>, local_port: u16, remote_port: u16) -> ClusterResult<()> {
        self.record(format!("port-forward {} {}:{}", pod, local_port, remote_port));
        Ok(())
    }
}

/// Sink that keeps every event.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub events: RefCell<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.borrow().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events.borrow_mut().push(event);
    }
}
