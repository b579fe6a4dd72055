//! Resource naming
//!
//! Kubernetes object names are lowercase DNS labels of at most 63 characters.

use std::path::Path;

/// Maximum length of a Kubernetes object name.
pub const MAX_NAME_LEN: usize = 63;

/// Convert arbitrary text into a valid resource name.
///
/// Runs of characters outside `[a-z0-9]` collapse into a single `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug.truncate(MAX_NAME_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Resource name for a notebook file: frontmatter title, else file stem.
pub fn for_file(path: &Path, title: Option<&str>) -> String {
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        return slugify(title);
    }
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    slugify(stem)
}

/// Resource name for a directory deployment.
pub fn for_directory(dir_name: &str) -> String {
    slugify(dir_name)
}
