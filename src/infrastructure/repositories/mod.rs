//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod tracking;

pub use tracking::TomlTrackingRepository;
