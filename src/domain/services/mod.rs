//! Domain Services
//!
//! Stateless logic over domain types: mount partitioning and resource
//! construction.

mod mount_partitioner;
mod resource_builder;

pub use mount_partitioner::{mount_batch, LocalMount, MountPlan};
pub use resource_builder::{env_vars, BuiltResource, ResourceBuilder, DEFAULT_STORAGE};
