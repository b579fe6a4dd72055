//! Domain Entities
//!
//! - `Frontmatter` - deployment settings declared in a notebook
//! - `NotebookDocument` - parsed notebook (file or directory)
//! - `MarimoNotebook` - the custom resource sent to the cluster
//! - `TrackingRecord` - local bookkeeping of a deployment

mod frontmatter;
mod notebook;
pub mod resource;
mod tracking;

pub use frontmatter::{EnvValue, Frontmatter};
pub use notebook::NotebookDocument;
pub use resource::{
    AuthSpec, EnvVar, MarimoNotebook, MarimoNotebookSpec, ObjectMeta, StorageSpec,
};
pub use tracking::{
    is_tracking_file_name, tracking_file_path, TrackedMount, TrackingRecord, TRACKING_SUFFIX,
};
