//! Domain Layer
//!
//! Pure logic without I/O: mount resolution, resource construction,
//! tracking records.
//!
//! ## Structure
//!
//! - `entities/` - Frontmatter, NotebookDocument, MarimoNotebook, TrackingRecord
//! - `value_objects/` - MountResolver, ContentHash, NotebookMode, ContentType
//! - `services/` - Mount partitioning, ResourceBuilder
//! - `ports/` - Interfaces for the cluster, tracking store and prompts

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
