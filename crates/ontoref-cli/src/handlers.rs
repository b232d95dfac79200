//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod docs;
mod validate;

pub use completions::handle_completions;
pub use docs::handle_docs;
pub use validate::handle_validate;

use crate::config::Config;
use std::path::PathBuf;

/// Ontology directory to scan, preferring the command-line argument
fn ontology_root(arg: Option<PathBuf>, config: &Config) -> PathBuf {
    arg.unwrap_or_else(|| config.paths.ontology_dir.clone())
}
