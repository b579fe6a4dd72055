//! Notebook document entity

use std::path::{Path, PathBuf};

use super::frontmatter::Frontmatter;
use crate::domain::value_objects::{name, ContentType};

/// A notebook ready to be turned into a cluster resource.
///
/// Directory deployments carry no content: the pod starts with an empty
/// working directory and files arrive through mounts.
#[derive(Debug, Clone, PartialEq)]
pub struct NotebookDocument {
    path: PathBuf,
    content: Option<String>,
    content_type: ContentType,
    frontmatter: Option<Frontmatter>,
    name: String,
}

impl NotebookDocument {
    pub fn file(
        path: impl Into<PathBuf>,
        content: String,
        content_type: ContentType,
        frontmatter: Option<Frontmatter>,
    ) -> Self {
        let path = path.into();
        let title = frontmatter.as_ref().and_then(|fm| fm.title.as_deref());
        let name = name::for_file(&path, title);
        Self {
            path,
            content: Some(content),
            content_type,
            frontmatter,
            name,
        }
    }

    /// `dir_name` is the resolved directory name (`.` already expanded).
    pub fn directory(path: impl Into<PathBuf>, dir_name: &str) -> Self {
        Self {
            path: path.into(),
            content: None,
            content_type: ContentType::Python,
            frontmatter: None,
            name: name::for_directory(dir_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn frontmatter(&self) -> Option<&Frontmatter> {
        self.frontmatter.as_ref()
    }

    /// Resource name derived from the title or path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directory(&self) -> bool {
        self.content.is_none()
    }

    /// Port declared in metadata, if any.
    pub fn port(&self) -> Option<u16> {
        self.frontmatter.as_ref().and_then(|fm| fm.port)
    }

    pub fn auth_disabled(&self) -> bool {
        self.frontmatter
            .as_ref()
            .map(Frontmatter::auth_disabled)
            .unwrap_or(false)
    }
}
