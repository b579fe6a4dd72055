//! Tracking record entity - remembers what was deployed from a local file
//!
//! Pure data. Persistence is handled by a `TrackingRepository`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::value_objects::ContentHash;

/// Suffix of tracking files (`.<file name>.marimo`).
pub const TRACKING_SUFFIX: &str = ".marimo";

/// Tracking file location for a notebook: a hidden sibling file.
pub fn tracking_file_path(notebook: &Path) -> PathBuf {
    let file_name = notebook
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tracking_name = format!(".{}{}", file_name, TRACKING_SUFFIX);
    match notebook.parent() {
        Some(parent) => parent.join(tracking_name),
        None => PathBuf::from(tracking_name),
    }
}

/// True for file names produced by [`tracking_file_path`].
pub fn is_tracking_file_name(name: &str) -> bool {
    name.len() > 1 + TRACKING_SUFFIX.len()
        && name.starts_with('.')
        && name.ends_with(TRACKING_SUFFIX)
}

/// A local mount copied into the pod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedMount {
    pub local: String,
    pub remote: String,
}

/// Deployment metadata for one local notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingRecord {
    name: String,
    namespace: String,
    original_file: String,
    file_hash: Option<ContentHash>,
    created_at: DateTime<Utc>,
    local_mounts: Vec<TrackedMount>,
}

impl TrackingRecord {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        original_file: impl Into<String>,
        file_hash: Option<ContentHash>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            original_file: original_file.into(),
            file_hash,
            created_at: Utc::now(),
            local_mounts: Vec::new(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_local_mounts(mut self, mounts: Vec<TrackedMount>) -> Self {
        self.local_mounts = mounts;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn original_file(&self) -> &str {
        &self.original_file
    }

    /// Hash of the content at the last deploy or sync (absent for directories)
    pub fn file_hash(&self) -> Option<&ContentHash> {
        self.file_hash.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn local_mounts(&self) -> &[TrackedMount] {
        &self.local_mounts
    }

    pub fn set_file_hash(&mut self, hash: ContentHash) {
        self.file_hash = Some(hash);
    }

    /// True when `current` differs from the recorded content.
    pub fn is_modified(&self, current: &str) -> bool {
        match &self.file_hash {
            Some(recorded) => !recorded.matches_content(current),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_path_is_hidden_sibling() {
        assert_eq!(
            tracking_file_path(Path::new("/work/notebook.py")),
            PathBuf::from("/work/.notebook.py.marimo")
        );
        assert_eq!(
            tracking_file_path(Path::new("notebook.md")),
            PathBuf::from(".notebook.md.marimo")
        );
    }

    #[test]
    fn tracking_file_name_detection() {
        assert!(is_tracking_file_name(".notebook.py.marimo"));
        assert!(!is_tracking_file_name("notebook.py"));
        assert!(!is_tracking_file_name(".marimo"));
        assert!(!is_tracking_file_name(".hidden"));
    }

    #[test]
    fn modification_detection() {
        let record = TrackingRecord::new(
            "nb",
            "default",
            "nb.py",
            Some(ContentHash::from_content("original")),
        );
        assert!(!record.is_modified("original"));
        assert!(record.is_modified("edited"));
    }

    #[test]
    fn directory_records_never_modified() {
        let record = TrackingRecord::new("proj", "default", ".", None);
        assert!(!record.is_modified("anything"));
    }

    #[test]
    fn set_file_hash_updates_baseline() {
        let mut record = TrackingRecord::new(
            "nb",
            "default",
            "nb.py",
            Some(ContentHash::from_content("v1")),
        );
        record.set_file_hash(ContentHash::from_content("v2"));
        assert!(!record.is_modified("v2"));
    }
}
