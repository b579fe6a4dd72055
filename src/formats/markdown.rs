//! Markdown notebook metadata
//!
//! marimo Markdown notebooks carry settings in YAML frontmatter:
//!
//! ```text
//! ---
//! title: Sales Report
//! storage: 5Gi
//! mounts:
//!   - rsync://data:/data
//! ---
//! # Content here
//! ```

use std::path::Path;

use crate::domain::entities::Frontmatter;
use crate::error::{MarimoError, MarimoResult};

/// Delimiter for frontmatter sections
const FRONTMATTER_DELIMITER: &str = "---";

/// Raw YAML between the delimiters, or `None` when absent or unclosed.
pub fn frontmatter_block(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.first().map(|l| l.trim()) != Some(FRONTMATTER_DELIMITER) {
        return None;
    }

    let closing = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.trim() == FRONTMATTER_DELIMITER)
        .map(|(i, _)| i)?;

    Some(lines[1..closing].join("\n"))
}

/// Parse frontmatter metadata. Empty frontmatter counts as none.
pub fn extract_frontmatter(content: &str, file: &Path) -> MarimoResult<Option<Frontmatter>> {
    let Some(yaml) = frontmatter_block(content) else {
        return Ok(None);
    };
    if yaml.trim().is_empty() {
        return Ok(None);
    }

    serde_yaml_ng::from_str(&yaml)
        .map(Some)
        .map_err(|e| MarimoError::InvalidFrontmatter {
            file: file.to_path_buf(),
            message: e.to_string(),
        })
}
