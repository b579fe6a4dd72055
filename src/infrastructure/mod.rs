//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `kubectl` - ClusterClient backed by the kubectl binary
//! - `repositories/` - Tracking file persistence
//! - `conflict/` - Terminal prompts for divergence
//! - `fs` - Atomic local writes

pub mod conflict;
pub mod fs;
pub mod kubectl;
pub mod repositories;

pub use conflict::InteractiveResolver;
pub use kubectl::KubectlClient;
pub use repositories::TomlTrackingRepository;
