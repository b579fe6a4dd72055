//! Connect Use Case
//!
//! Gets a browser onto a deployed notebook: waits for the pod, reads the
//! access token from its logs, picks a local port and forwards it.

use std::net::TcpListener;
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::ports::{ClusterClient, PodRef};
use crate::error::MarimoResult;

use super::deploy::Deployment;

/// marimo logs `URL: http://0.0.0.0:2718?access_token=ABC123`
static ACCESS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"access_token=([^\s&"]+)"#).expect("valid regex"));

/// Pull the access token out of marimo's startup logs.
pub fn extract_token(logs: &str) -> Option<String> {
    ACCESS_TOKEN
        .captures(logs)
        .map(|c| c[1].to_string())
}

/// `preferred` when it can be bound locally, else an ephemeral port.
pub fn find_available_port(preferred: u16) -> u16 {
    if TcpListener::bind(("127.0.0.1", preferred)).is_ok() {
        return preferred;
    }
    TcpListener::bind(("127.0.0.1", 0))
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .unwrap_or(preferred)
}

/// Where the browser should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub local_port: u16,
    pub url: String,
}

/// Connect use case
pub struct ConnectUseCase<C: ClusterClient> {
    cluster: C,
    ready_timeout: Duration,
    token_attempts: u32,
    retry_delay: Duration,
}

impl<C: ClusterClient> ConnectUseCase<C> {
    pub fn new(cluster: C) -> Self {
        Self {
            cluster,
            ready_timeout: Duration::from_secs(120),
            token_attempts: 5,
            retry_delay: Duration::from_secs(1),
        }
    }

    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Wait for the pod and work out the URL to open.
    ///
    /// Returns the connection and whether the pod reported ready.
    pub fn prepare(&self, deployment: &Deployment) -> (Connection, bool) {
        let pod = PodRef::new(&deployment.name, &deployment.namespace);

        let ready = match self.cluster.wait_ready(pod, self.ready_timeout) {
            Ok(ready) => ready,
            Err(e) => {
                warn!(%pod, "wait for pod failed: {}", e);
                false
            }
        };

        let token = if deployment.auth_disabled {
            None
        } else {
            self.access_token(pod)
        };

        let local_port = find_available_port(deployment.port);
        let mut url = format!("http://localhost:{}", local_port);
        if let Some(token) = token {
            url.push_str("?access_token=");
            url.push_str(&token);
        }

        (Connection { local_port, url }, ready)
    }

    /// Token from the pod logs; marimo may still be starting, so retry.
    pub fn access_token(&self, pod: PodRef<'_>) -> Option<String> {
        for attempt in 1..=self.token_attempts {
            match self.cluster.logs(pod) {
                Ok(logs) => {
                    if let Some(token) = extract_token(&logs) {
                        return Some(token);
                    }
                }
                Err(e) => debug!(%pod, attempt, "reading logs failed: {}", e),
            }
            if attempt < self.token_attempts {
                thread::sleep(self.retry_delay);
            }
        }
        None
    }

    /// Forward `connection.local_port` to the notebook service. Blocks.
    pub fn forward(&self, deployment: &Deployment, connection: &Connection) -> MarimoResult<()> {
        let pod = PodRef::new(&deployment.name, &deployment.namespace);
        self.cluster
            .port_forward(pod, connection.local_port, deployment.port)?;
        Ok(())
    }
}
