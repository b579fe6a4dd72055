//! Output Rendering
//!
//! Turns use-case results and progress events into terminal text.
//! Rendering functions return strings so they can be snapshot-tested;
//! the binary decides where they are printed.

use std::fmt::Write as _;

use crate::application::{Deployment, StatusEntry};
use crate::domain::ports::{ProgressEvent, ProgressSink};
use crate::domain::services::LocalMount;
use crate::domain::value_objects::NotebookMode;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Manifest plus the local mounts the plugin copies itself.
pub fn render_dry_run(manifest: &str, local_mounts: &[LocalMount]) -> String {
    let mut out = manifest.trim_end().to_string();
    out.push('\n');

    if !local_mounts.is_empty() {
        out.push_str("\n# Local mounts (handled by plugin via kubectl cp):\n");
        for mount in local_mounts {
            let _ = writeln!(out, "#   {} → {}", mount.source, mount.mount_point);
        }
    }
    out
}

/// Manual port-forward instructions for a deployed notebook.
///
/// Callers print a blank line first.
pub fn render_access_info(deployment: &Deployment) -> String {
    let Deployment {
        name,
        namespace,
        port,
        ..
    } = deployment;

    let mut out = String::new();
    out.push_str("To access your notebook:\n");
    let _ = writeln!(
        out,
        "  kubectl port-forward -n {} svc/{} {}:{} &",
        namespace, name, port, port
    );
    let _ = writeln!(out, "  open http://localhost:{}", port);
    out.push('\n');

    if deployment.auth_disabled {
        out.push_str("Note: Authentication is disabled (--no-token)\n");
    } else {
        out.push_str("Note: Token is auto-generated. Check pod logs:\n");
        let _ = writeln!(out, "  kubectl logs -n {} {} | grep token", namespace, name);
    }

    if deployment.mode == NotebookMode::Run {
        out.push_str("\nRunning in read-only app mode.\n");
    }
    out
}

/// Status table, or a hint when nothing is tracked.
pub fn render_status_text(entries: &[StatusEntry], directory: &str) -> String {
    if entries.is_empty() {
        return format!("No active deployments found in {}\n", directory);
    }

    let headers = ["NAME", "NAMESPACE", "PHASE", "MOUNTS", "FILE"];
    let rows: Vec<[String; 5]> = entries
        .iter()
        .map(|e| {
            [
                e.name.clone(),
                e.namespace.clone(),
                e.phase.clone(),
                e.local_mounts.to_string(),
                e.file.clone(),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &headers.map(String::from), &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let last = cells.len() - 1;
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i == last {
            out.push_str(cell);
        } else {
            let _ = write!(out, "{:<width$}  ", cell, width = width);
        }
    }
    out.push('\n');
}

pub fn render_status_json(entries: &[StatusEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

/// Plain-text line for a progress event, and whether it is a warning.
pub fn describe_event(event: &ProgressEvent) -> (String, bool) {
    match event {
        ProgressEvent::WaitingForPod { name } => {
            (format!("Waiting for {} to be ready...", name), false)
        }
        ProgressEvent::PodNotReady { .. } => (
            "Warning: Pod not ready, skipping local sync".to_string(),
            true,
        ),
        ProgressEvent::MountCopied {
            source,
            mount_point,
        } => (format!("Synced {} → {}", source, mount_point), false),
        ProgressEvent::MountMissing { source } => (
            format!("Warning: Local path '{}' does not exist", source),
            true,
        ),
        ProgressEvent::MountFailed { source, error } => {
            (format!("Warning: Failed to sync {}: {}", source, error), true)
        }
        ProgressEvent::Tracking { path } => {
            (format!("Tracking deployment in {}", path.display()), false)
        }
        ProgressEvent::SyncingBeforeDelete => (
            "Syncing changes from pod before delete...".to_string(),
            false,
        ),
        ProgressEvent::PullFailed { error } => (
            format!(
                "Warning: Could not sync from pod: {}\nContinuing with delete...",
                error
            ),
            true,
        ),
        ProgressEvent::KeepPvc { name, namespace } => (
            format!(
                "Note: --keep-pvc requires manual PVC deletion prevention\n      kubectl patch pvc -n {} {}-pvc -p '{{\"metadata\":{{\"ownerReferences\":[]}}}}'",
                namespace, name
            ),
            false,
        ),
    }
}

/// Prints progress to the terminal; warnings go to stderr.
#[derive(Debug, Default)]
pub struct ConsoleProgressSink;

impl ProgressSink for ConsoleProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        let (line, warning) = describe_event(&event);
        if warning {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
