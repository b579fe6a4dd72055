//! Notebook server mode

use serde::{Deserialize, Serialize};

/// marimo server mode inside the pod.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum NotebookMode {
    /// Interactive editing
    #[default]
    Edit,
    /// Read-only app
    Run,
}

impl NotebookMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotebookMode::Edit => "edit",
            NotebookMode::Run => "run",
        }
    }
}

impl std::fmt::Display for NotebookMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
