//! TrackingRepository port - abstraction for tracking file persistence
//!
//! Lets use cases load and save deployment records without knowing the
//! on-disk format.

use std::path::{Path, PathBuf};

use crate::domain::entities::TrackingRecord;

/// Result type for tracking operations
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Tracking operation errors
#[derive(Debug)]
pub enum TrackingError {
    /// Invalid tracking file format
    InvalidFormat { path: PathBuf, message: String },
    /// Tracking file written by an incompatible version
    VersionMismatch { found: u32, expected: u32 },
    /// I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for TrackingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingError::InvalidFormat { path, message } => {
                write!(f, "invalid tracking file {}: {}", path.display(), message)
            }
            TrackingError::VersionMismatch { found, expected } => write!(
                f,
                "tracking file version {} is not supported (expected {})",
                found, expected
            ),
            TrackingError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for TrackingError {}

impl From<std::io::Error> for TrackingError {
    fn from(err: std::io::Error) -> Self {
        TrackingError::Io(err)
    }
}

/// Abstract repository for tracking records, keyed by notebook path
pub trait TrackingRepository {
    /// Load the record for a notebook (`None` if never deployed)
    fn load(&self, notebook: &Path) -> TrackingResult<Option<TrackingRecord>>;

    /// Save the record for a notebook
    fn save(&self, notebook: &Path, record: &TrackingRecord) -> TrackingResult<()>;

    /// Remove the record for a notebook (no-op if absent)
    fn delete(&self, notebook: &Path) -> TrackingResult<()>;

    /// All records found directly inside `dir`, with their tracking file paths
    fn scan(&self, dir: &Path) -> TrackingResult<Vec<(PathBuf, TrackingRecord)>>;

    /// Where the record for `notebook` lives
    fn location(&self, notebook: &Path) -> PathBuf;
}

impl<T: TrackingRepository + ?Sized> TrackingRepository for &T {
    fn load(&self, notebook: &Path) -> TrackingResult<Option<TrackingRecord>> {
        (**self).load(notebook)
    }

    fn save(&self, notebook: &Path, record: &TrackingRecord) -> TrackingResult<()> {
        (**self).save(notebook, record)
    }

    fn delete(&self, notebook: &Path) -> TrackingResult<()> {
        (**self).delete(notebook)
    }

    fn scan(&self, dir: &Path) -> TrackingResult<Vec<(PathBuf, TrackingRecord)>> {
        (**self).scan(dir)
    }

    fn location(&self, notebook: &Path) -> PathBuf {
        (**self).location(notebook)
    }
}
