//! Status Use Case
//!
//! Lists the deployments tracked in a directory with their cluster phase.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::domain::entities::resource::RESOURCE_TYPE;
use crate::domain::ports::{ClusterClient, PodRef, TrackingRepository};
use crate::error::MarimoResult;

/// Phase shown when the cluster cannot tell
pub const UNKNOWN_PHASE: &str = "unknown";

/// One tracked deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub name: String,
    pub namespace: String,
    pub file: String,
    pub tracking_file: PathBuf,
    pub created_at: DateTime<Utc>,
    pub phase: String,
    pub local_mounts: usize,
}

/// Status use case
pub struct StatusUseCase<C, T>
where
    C: ClusterClient,
    T: TrackingRepository,
{
    cluster: C,
    tracking: T,
}

impl<C, T> StatusUseCase<C, T>
where
    C: ClusterClient,
    T: TrackingRepository,
{
    pub fn new(cluster: C, tracking: T) -> Self {
        Self { cluster, tracking }
    }

    pub fn execute(&self, dir: &Path) -> MarimoResult<Vec<StatusEntry>> {
        let records = self.tracking.scan(dir)?;

        Ok(records
            .into_iter()
            .map(|(tracking_file, record)| {
                let pod = PodRef::new(record.name(), record.namespace());
                let phase = match self.cluster.phase(RESOURCE_TYPE, pod) {
                    Ok(Some(phase)) => phase,
                    Ok(None) => UNKNOWN_PHASE.to_string(),
                    Err(e) => {
                        debug!(%pod, "phase lookup failed: {}", e);
                        UNKNOWN_PHASE.to_string()
                    }
                };

                StatusEntry {
                    name: record.name().to_string(),
                    namespace: record.namespace().to_string(),
                    file: record.original_file().to_string(),
                    tracking_file,
                    created_at: record.created_at(),
                    phase,
                    local_mounts: record.local_mounts().len(),
                }
            })
            .collect())
    }
}
