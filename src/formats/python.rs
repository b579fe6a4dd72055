//! Python notebook metadata
//!
//! Settings live in the PEP 723 inline script block, under a
//! `[tool.marimo.k8s]` table:
//!
//! ```text
//! # /// script
//! # dependencies = ["marimo", "pandas"]
//! #
//! # [tool.marimo.k8s]
//! # image = "custom-image:latest"
//! # storage = "5Gi"
//! # ///
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::Frontmatter;
use crate::error::{MarimoError, MarimoResult};

/// Canonical PEP 723 block pattern.
static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^# /// (?P<type>[a-zA-Z0-9-]+)$\s(?P<content>(^#(| .*)$\s)+)^# ///$")
        .expect("valid regex")
});

/// TOML body of the `script` block, comment markers removed.
pub fn script_block(content: &str) -> Option<String> {
    let captures = SCRIPT_BLOCK
        .captures_iter(content)
        .find(|c| &c["type"] == "script")?;

    let body = captures["content"]
        .lines()
        .map(|line| {
            line.strip_prefix("# ")
                .or_else(|| line.strip_prefix('#'))
                .unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");
    Some(body)
}

/// Parse `[tool.marimo.k8s]` from the script block.
pub fn extract_metadata(content: &str, file: &Path) -> MarimoResult<Option<Frontmatter>> {
    let Some(body) = script_block(content) else {
        return Ok(None);
    };

    let invalid = |message: String| MarimoError::InvalidFrontmatter {
        file: file.to_path_buf(),
        message,
    };

    let table: toml::Table = toml::from_str(&body).map_err(|e| invalid(e.to_string()))?;
    let Some(k8s) = table
        .get("tool")
        .and_then(|t| t.get("marimo"))
        .and_then(|m| m.get("k8s"))
    else {
        return Ok(None);
    };

    k8s.clone()
        .try_into::<Frontmatter>()
        .map(Some)
        .map_err(|e| invalid(e.to_string()))
}
