//! Notebook file formats
//!
//! Reads a notebook from disk and extracts its deployment metadata.

pub mod markdown;
pub mod python;

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::entities::NotebookDocument;
use crate::domain::value_objects::{is_marimo_markdown, is_marimo_python, ContentType};
use crate::error::{MarimoError, MarimoResult};

/// Parse a notebook file.
pub fn parse_file(path: &Path) -> MarimoResult<NotebookDocument> {
    if !path.is_file() {
        return Err(MarimoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    parse_content(path, content)
}

/// Parse notebook content already read from `path`.
pub fn parse_content(path: &Path, content: String) -> MarimoResult<NotebookDocument> {
    let content_type = ContentType::for_path(path, &content);
    let frontmatter = match content_type {
        ContentType::Markdown => {
            if !is_marimo_markdown(&content) {
                warn!(path = %path.display(), "file does not look like a marimo markdown notebook");
            }
            markdown::extract_frontmatter(&content, path)?
        }
        ContentType::Python => {
            if !is_marimo_python(&content) {
                warn!(path = %path.display(), "file does not look like a marimo notebook");
            }
            python::extract_metadata(&content, path)?
        }
    };

    debug!(
        path = %path.display(),
        ?content_type,
        has_metadata = frontmatter.is_some(),
        "parsed notebook"
    );
    Ok(NotebookDocument::file(path, content, content_type, frontmatter))
}
