//! kubectl-marimo - deploy marimo notebooks to Kubernetes
//!
//! Turns a local marimo notebook (Python or Markdown, with optional
//! deployment metadata) into a `MarimoNotebook` custom resource, copies
//! operator-side mounts into the pod and keeps the local file in step with
//! what was edited in the cluster.
//!
//! The mount URI resolver is the pure core:
//!
//! ```
//! use kubectl_marimo::MountResolver;
//!
//! let resolver = MountResolver::default();
//! let plan = resolver.partition(&["rsync://./data", "sshfs://user@host:/srv"]);
//!
//! assert_eq!(plan.remote, vec!["sshfs://user@host:/srv"]);
//! assert_eq!(plan.local[0].mount_point, "/home/marimo/notebooks/mounts/local-0");
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod formats;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use config::Config;
pub use domain::services::{LocalMount, MountPlan};
pub use domain::value_objects::{MountPaths, MountResolver, MountUriError, ParsedMount};
pub use error::{MarimoError, MarimoResult};
