//! kubectl-backed cluster client
//!
//! Implements the ClusterClient port by shelling out to `kubectl`.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::ports::{ClusterClient, ClusterError, ClusterResult, PodRef};

/// Cluster client using the kubectl binary
#[derive(Debug, Clone)]
pub struct KubectlClient {
    /// kubectl executable (name on PATH or absolute path)
    binary: String,
    /// Container running marimo inside the notebook pod
    container: String,
}

impl KubectlClient {
    pub fn new(binary: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            container: container.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command_line(&self, args: &[&str]) -> String {
        std::iter::once(self.binary.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn unavailable(&self, err: std::io::Error) -> ClusterError {
        ClusterError::Unavailable(format!("{}: {}", self.binary, err))
    }

    /// Run kubectl, optionally feeding `input` on stdin, and capture output.
    fn output(&self, args: &[&str], input: Option<&str>) -> ClusterResult<Output> {
        debug!(command = %self.command_line(args), "running kubectl");

        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.unavailable(e))?;

        if let Some(inp) = input {
            if let Some(mut stdin) = child.stdin.take() {
                // A failed write shows up in the exit status.
                if let Err(e) = stdin.write_all(inp.as_bytes()) {
                    debug!("writing kubectl stdin failed: {}", e);
                }
            }
        }

        child.wait_with_output().map_err(|e| self.unavailable(e))
    }

    /// Run kubectl and return stdout, failing on a non-zero exit.
    fn run(&self, args: &[&str], input: Option<&str>) -> ClusterResult<String> {
        let output = self.output(args, input)?;

        if !output.status.success() {
            return Err(ClusterError::CommandFailed {
                command: self.command_line(args),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|e| ClusterError::InvalidOutput(format!("non UTF-8 output: {}", e)))
    }
}

impl Default for KubectlClient {
    fn default() -> Self {
        Self::new("kubectl", "marimo")
    }
}

impl ClusterClient for KubectlClient {
    fn apply(&self, manifest: &str) -> ClusterResult<()> {
        self.run(&["apply", "-f", "-"], Some(manifest)).map(|_| ())
    }

    fn phase(&self, resource_type: &str, pod: PodRef<'_>) -> ClusterResult<Option<String>> {
        let stdout = self.run(
            &[
                "get",
                resource_type,
                pod.name,
                "-n",
                pod.namespace,
                "-o",
                "jsonpath={.status.phase}",
            ],
            None,
        )?;
        let phase = stdout.trim();
        Ok((!phase.is_empty()).then(|| phase.to_string()))
    }

    fn delete(&self, resource_type: &str, pod: PodRef<'_>) -> ClusterResult<()> {
        self.run(&["delete", resource_type, pod.name, "-n", pod.namespace], None)
            .map(|_| ())
    }

    fn exec(&self, pod: PodRef<'_>, command: &[&str]) -> ClusterResult<String> {
        let mut args = vec![
            "exec",
            "-n",
            pod.namespace,
            pod.name,
            "-c",
            self.container.as_str(),
            "--",
        ];
        args.extend_from_slice(command);
        self.run(&args, None)
    }

    fn wait_ready(&self, pod: PodRef<'_>, timeout: Duration) -> ClusterResult<bool> {
        let target = format!("pod/{}", pod.name);
        let timeout = format!("--timeout={}s", timeout.as_secs());
        let output = self.output(
            &[
                "wait",
                "-n",
                pod.namespace,
                &target,
                "--for=condition=Ready",
                &timeout,
            ],
            None,
        )?;
        Ok(output.status.success())
    }

    fn copy_to_pod(&self, local: &Path, pod: PodRef<'_>, dest: &str) -> ClusterResult<()> {
        let src = local.to_string_lossy();
        let target = format!("{}/{}:{}", pod.namespace, pod.name, dest);
        self.run(
            &["cp", &*src, &target, "-c", self.container.as_str()],
            None,
        )
        .map(|_| ())
    }

    fn logs(&self, pod: PodRef<'_>) -> ClusterResult<String> {
        self.run(
            &[
                "logs",
                "-n",
                pod.namespace,
                pod.name,
                "-c",
                self.container.as_str(),
            ],
            None,
        )
    }

    fn port_forward(&self, pod: PodRef<'_>, local_port: u16, remote_port: u16) -> ClusterResult<()> {
        let service = format!("svc/{}", pod.name);
        let ports = format!("{}:{}", local_port, remote_port);
        let args = [
            "port-forward",
            "-n",
            pod.namespace,
            service.as_str(),
            ports.as_str(),
        ];
        debug!(command = %self.command_line(&args), "starting port-forward");

        // Inherit stdio so kubectl's own progress lines reach the user.
        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .map_err(|e| self.unavailable(e))?;

        if !status.success() {
            warn!(%status, "port-forward ended");
        }
        Ok(())
    }
}
