//! Interactive Divergence Resolver
//!
//! Asks on the terminal before overwriting a locally modified notebook.

use dialoguer::Confirm;
use is_terminal::IsTerminal;
use tracing::warn;

use crate::domain::ports::{DivergenceContext, DivergenceResolver};

/// Prompts with `dialoguer::Confirm`.
///
/// Without a terminal on stdin nothing can be asked, so the answer is no.
#[derive(Debug, Default)]
pub struct InteractiveResolver;

impl InteractiveResolver {
    pub fn new() -> Self {
        Self
    }
}

impl DivergenceResolver for InteractiveResolver {
    fn proceed(&self, context: &DivergenceContext) -> bool {
        eprintln!(
            "Warning: {} has been modified since last deploy.",
            context.path.display()
        );

        if !std::io::stdin().is_terminal() {
            warn!("not a terminal, refusing to overwrite without --force");
            return false;
        }

        Confirm::new()
            .with_prompt(context.action.prompt())
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
