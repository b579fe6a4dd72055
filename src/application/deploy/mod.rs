//! Deploy Use Case
//!
//! Parses a notebook, builds its `MarimoNotebook` resource, applies it,
//! copies local mounts and records the deployment.

mod options;
mod use_case;


pub use options::{DeployOptions, DeployOutcome, Deployment};
pub use use_case::DeployUseCase;
