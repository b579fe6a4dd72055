//! Divergence Resolver Port
//!
//! Decides what to do when a local notebook changed since its last deploy
//! or sync. Implementations can prompt the user or apply a fixed policy.

use std::path::Path;

/// Operation about to overwrite state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceAction {
    /// Deploy would replace the tracked baseline
    Deploy,
    /// Sync would overwrite the local file with pod content
    Sync,
    /// Delete would sync pod content over the local file first
    Delete,
}

impl DivergenceAction {
    /// Question asked before proceeding
    pub fn prompt(&self) -> &'static str {
        match self {
            DivergenceAction::Deploy => "Continue and overwrite tracking?",
            DivergenceAction::Sync | DivergenceAction::Delete => "Overwrite with pod content?",
        }
    }
}

/// Context given to the resolver
#[derive(Debug, Clone, Copy)]
pub struct DivergenceContext<'a> {
    pub path: &'a Path,
    pub action: DivergenceAction,
}

/// Trait for resolving local divergence.
///
/// - `InteractiveResolver`: asks on the terminal
/// - `ForceResolver`: always proceeds (`--force`)
/// - `SafeResolver`: never proceeds
pub trait DivergenceResolver {
    /// True to proceed, false to cancel
    fn proceed(&self, context: &DivergenceContext) -> bool;
}

/// Always proceeds.
pub struct ForceResolver;

impl DivergenceResolver for ForceResolver {
    fn proceed(&self, _context: &DivergenceContext) -> bool {
        true
    }
}

/// Always cancels.
pub struct SafeResolver;

impl DivergenceResolver for SafeResolver {
    fn proceed(&self, _context: &DivergenceContext) -> bool {
        false
    }
}
