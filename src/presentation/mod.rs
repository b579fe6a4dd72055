//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Command-line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Text rendering and the console progress sink
//!
//! ## Usage
//!
//! ```ignore
//! use kubectl_marimo::config::Config;
//! use kubectl_marimo::presentation::factory;
//!
//! let config = Config::load_or_default();
//! let use_case = factory::create_status_use_case(&config);
//! let entries = use_case.execute(Path::new("."))?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands};
pub use output::{ConsoleProgressSink, OutputFormat};
