//! Notebook content type detection

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Fenced code block carrying a marimo cell: ```` ```python {.marimo} ```` or
/// ```` ```{python marimo} ````.
static MARIMO_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:python\s*\{\.marimo\}|\{python\s+marimo\})").expect("valid regex")
});

/// Markers identifying a marimo Python notebook.
const MARIMO_PYTHON_MARKERS: &[&str] = &[
    "import marimo",
    "from marimo import",
    "@app.cell",
    "@app.function",
    "marimo.App(",
];

/// Notebook source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Python,
    Markdown,
}

impl ContentType {
    /// Detect the format from content alone. Defaults to Python.
    pub fn detect(content: &str) -> Self {
        if content.trim().starts_with("---") || MARIMO_FENCE.is_match(content) {
            ContentType::Markdown
        } else {
            ContentType::Python
        }
    }

    /// Choose the format from the file extension, falling back to content.
    pub fn for_path(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") => ContentType::Markdown,
            Some("py") => ContentType::Python,
            _ => Self::detect(content),
        }
    }

    /// File name of the notebook inside the pod.
    pub fn pod_file_name(&self) -> &'static str {
        match self {
            ContentType::Python => "notebook.py",
            ContentType::Markdown => "notebook.md",
        }
    }
}

/// True when the content looks like a marimo Python notebook.
pub fn is_marimo_python(content: &str) -> bool {
    MARIMO_PYTHON_MARKERS
        .iter()
        .any(|marker| content.contains(marker))
}

/// True when the content looks like a marimo Markdown notebook.
pub fn is_marimo_markdown(content: &str) -> bool {
    content.trim().starts_with("---") || MARIMO_FENCE.is_match(content)
}
