//! TOML Tracking Repository
//!
//! Implements the TrackingRepository port using TOML files stored next to
//! each notebook (`.<file>.marimo`).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::entities::{
    is_tracking_file_name, tracking_file_path, TrackedMount, TrackingRecord,
};
use crate::domain::ports::{TrackingError, TrackingRepository, TrackingResult};
use crate::domain::value_objects::ContentHash;
use crate::infrastructure::fs::atomic_write;

/// Current tracking file format version
const TRACKING_VERSION: u32 = 1;

/// TOML-based tracking repository
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlTrackingRepository;

impl TomlTrackingRepository {
    pub fn new() -> Self {
        Self
    }

    fn read(&self, path: &Path) -> TrackingResult<TrackingRecord> {
        let content = fs::read_to_string(path)?;
        let file: TomlTrackingFile =
            toml::from_str(&content).map_err(|e| TrackingError::InvalidFormat {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if file.version != TRACKING_VERSION {
            return Err(TrackingError::VersionMismatch {
                found: file.version,
                expected: TRACKING_VERSION,
            });
        }

        Ok(file.into_record())
    }
}

/// TOML representation of a local mount copy
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlMount {
    local: String,
    remote: String,
}

/// TOML representation of the tracking file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlTrackingFile {
    version: u32,
    name: String,
    namespace: String,
    original_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_hash: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    local_mounts: Vec<TomlMount>,
}

impl TomlTrackingFile {
    fn from_record(record: &TrackingRecord) -> Self {
        Self {
            version: TRACKING_VERSION,
            name: record.name().to_string(),
            namespace: record.namespace().to_string(),
            original_file: record.original_file().to_string(),
            file_hash: record.file_hash().map(|h| h.as_str().to_string()),
            created_at: record.created_at(),
            local_mounts: record
                .local_mounts()
                .iter()
                .map(|m| TomlMount {
                    local: m.local.clone(),
                    remote: m.remote.clone(),
                })
                .collect(),
        }
    }

    fn into_record(self) -> TrackingRecord {
        let mounts = self
            .local_mounts
            .into_iter()
            .map(|m| TrackedMount {
                local: m.local,
                remote: m.remote,
            })
            .collect();

        TrackingRecord::new(
            self.name,
            self.namespace,
            self.original_file,
            self.file_hash.as_deref().map(ContentHash::from_recorded),
        )
        .with_created_at(self.created_at)
        .with_local_mounts(mounts)
    }
}

impl TrackingRepository for TomlTrackingRepository {
    fn load(&self, notebook: &Path) -> TrackingResult<Option<TrackingRecord>> {
        let path = self.location(notebook);
        if !path.exists() {
            return Ok(None);
        }
        self.read(&path).map(Some)
    }

    fn save(&self, notebook: &Path, record: &TrackingRecord) -> TrackingResult<()> {
        let path = self.location(notebook);
        let content = toml::to_string_pretty(&TomlTrackingFile::from_record(record)).map_err(
            |e| TrackingError::InvalidFormat {
                path: path.clone(),
                message: e.to_string(),
            },
        )?;
        atomic_write(&path, content.as_bytes())?;
        Ok(())
    }

    fn delete(&self, notebook: &Path) -> TrackingResult<()> {
        let path = self.location(notebook);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn scan(&self, dir: &Path) -> TrackingResult<Vec<(PathBuf, TrackingRecord)>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_tracking = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_tracking_file_name);
            if !is_tracking || !path.is_file() {
                continue;
            }

            match self.read(&path) {
                Ok(record) => found.push((path, record)),
                Err(e) => warn!(path = %path.display(), "skipping tracking file: {}", e),
            }
        }

        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }

    fn location(&self, notebook: &Path) -> PathBuf {
        tracking_file_path(notebook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn record() -> TrackingRecord {
        TrackingRecord::new(
            "analysis",
            "data-team",
            "analysis.py",
            Some(ContentHash::from_content("print(1)")),
        )
        .with_created_at(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn load_missing_returns_none() {
        let dir = tempdir().unwrap();
        let repo = TomlTrackingRepository::new();

        assert_eq!(repo.load(&dir.path().join("nb.py")).unwrap(), None);
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let notebook = dir.path().join("analysis.py");
        let repo = TomlTrackingRepository::new();
        let record = record().with_local_mounts(vec![TrackedMount {
            local: "data".to_string(),
            remote: "/home/marimo/notebooks/mounts/local-0".to_string(),
        }]);

        repo.save(&notebook, &record).unwrap();

        assert!(dir.path().join(".analysis.py.marimo").exists());
        assert_eq!(repo.load(&notebook).unwrap(), Some(record));
    }

    #[test]
    fn saved_file_is_versioned_toml() {
        let dir = tempdir().unwrap();
        let notebook = dir.path().join("analysis.py");
        let repo = TomlTrackingRepository::new();

        repo.save(&notebook, &record()).unwrap();

        let content = fs::read_to_string(repo.location(&notebook)).unwrap();
        assert!(content.starts_with("version = 1\n"));
        assert!(content.contains("namespace = \"data-team\""));
        assert!(!content.contains("local_mounts"));
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let dir = tempdir().unwrap();
        let notebook = dir.path().join("nb.py");
        let repo = TomlTrackingRepository::new();
        fs::write(
            repo.location(&notebook),
            "version = 7\nname = \"nb\"\nnamespace = \"default\"\noriginal_file = \"nb.py\"\ncreated_at = \"2026-01-01T00:00:00Z\"\n",
        )
        .unwrap();

        let err = repo.load(&notebook).unwrap_err();
        assert!(matches!(
            err,
            TrackingError::VersionMismatch {
                found: 7,
                expected: 1
            }
        ));
    }

    #[test]
    fn garbage_is_invalid_format() {
        let dir = tempdir().unwrap();
        let notebook = dir.path().join("nb.py");
        let repo = TomlTrackingRepository::new();
        fs::write(repo.location(&notebook), "not toml [").unwrap();

        assert!(matches!(
            repo.load(&notebook).unwrap_err(),
            TrackingError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let notebook = dir.path().join("analysis.py");
        let repo = TomlTrackingRepository::new();

        repo.save(&notebook, &record()).unwrap();
        repo.delete(&notebook).unwrap();
        repo.delete(&notebook).unwrap();

        assert_eq!(repo.load(&notebook).unwrap(), None);
    }

    #[test]
    fn scan_finds_tracking_files_only() {
        let dir = tempdir().unwrap();
        let repo = TomlTrackingRepository::new();

        repo.save(&dir.path().join("b.py"), &record()).unwrap();
        repo.save(&dir.path().join("a.md"), &record()).unwrap();
        fs::write(dir.path().join("a.md"), "# notebook").unwrap();
        fs::write(dir.path().join(".broken.py.marimo"), "[").unwrap();

        let found = repo.scan(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![".a.md.marimo", ".b.py.marimo"]);
    }
}
