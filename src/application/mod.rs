//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Parse, build, apply, copy local mounts, track
//! - `ConnectUseCase` - Token lookup, local port, port-forward
//! - `SyncUseCase` - Pull pod content back into the local file
//! - `DeleteUseCase` - Sync, then delete the resource and tracking file
//! - `StatusUseCase` - List tracked deployments with their phase

pub mod connect;
pub mod delete;
pub mod deploy;
pub mod local_mounts;
pub mod status;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use connect::{extract_token, find_available_port, Connection, ConnectUseCase};
pub use delete::{DeleteOptions, DeleteOutcome, DeleteUseCase};
pub use deploy::{DeployOptions, DeployOutcome, DeployUseCase, Deployment};
pub use local_mounts::{copy_local_mount, copy_local_mounts, CopyOutcome};
pub use status::{StatusEntry, StatusUseCase, UNKNOWN_PHASE};
pub use sync::{SyncOptions, SyncOutcome, SyncUseCase};
