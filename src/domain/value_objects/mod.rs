//! Value Objects
//!
//! Immutable domain types: mount descriptors, content hashes, names, modes.

mod content_type;
mod hash;
mod mode;
mod mount;
pub mod name;

pub use content_type::{is_marimo_markdown, is_marimo_python, ContentType};
pub use hash::ContentHash;
pub use mode::NotebookMode;
pub use mount::{
    MountPaths, MountResolver, MountUriError, ParsedMount, DEFAULT_NOTEBOOK_DIR, LOCAL_SCHEME,
};
