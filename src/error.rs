//! Error types for kubectl-marimo
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{ClusterError, TrackingError};
use crate::domain::value_objects::MountUriError;

/// Result type alias for kubectl-marimo operations
pub type MarimoResult<T> = Result<T, MarimoError>;

/// Main error type for kubectl-marimo operations
#[derive(Error, Debug)]
pub enum MarimoError {
    /// Mount descriptor could not be parsed
    #[error(transparent)]
    MountUri(#[from] MountUriError),

    /// Notebook metadata block could not be parsed
    #[error("invalid frontmatter in {file}: {message}")]
    InvalidFrontmatter { file: PathBuf, message: String },

    /// Notebook file or directory does not exist
    #[error("file '{path}' not found")]
    FileNotFound { path: PathBuf },

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// No tracking record next to the notebook
    #[error("no active deployment found for '{path}'")]
    NotDeployed { path: PathBuf },

    /// Tracking store failure
    #[error(transparent)]
    Tracking(#[from] TrackingError),

    /// Cluster control plane failure
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// Directory deployments have no single file to pull back
    #[error("'{path}' is a directory deployment; nothing to sync")]
    DirectorySync { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_deployed() {
        let err = MarimoError::NotDeployed {
            path: PathBuf::from("notebook.py"),
        };
        assert_eq!(
            err.to_string(),
            "no active deployment found for 'notebook.py'"
        );
    }

    #[test]
    fn mount_uri_error_is_transparent() {
        let err: MarimoError = MountUriError::Malformed {
            uri: "invalid".to_string(),
            reason: "missing '://' separator",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "malformed mount URI 'invalid': missing '://' separator"
        );
    }

    #[test]
    fn display_invalid_frontmatter() {
        let err = MarimoError::InvalidFrontmatter {
            file: PathBuf::from("notes.md"),
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "invalid frontmatter in notes.md: bad indent");
    }
}
