//! Property tests for kubectl-marimo.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "order is preserved".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/mount_uri.rs"]
mod mount_uri;

#[path = "properties/naming.rs"]
mod naming;
