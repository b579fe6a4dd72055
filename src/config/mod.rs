//! Configuration module for kubectl-marimo
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KUBECTL_MARIMO_*)
//! 3. User config (~/.config/kubectl-marimo/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{user_config_path, ConfigWarning};
pub use types::{Config, DefaultsConfig, KubectlConfig, PathsConfig, DEFAULT_PORT};
