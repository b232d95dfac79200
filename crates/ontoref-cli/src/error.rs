//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use ontoref_schemas::{DiscoveryError, DocumentationError, GrammarError};
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be read or understood
    #[error("Configuration error: {0}")]
    Config(String),

    /// The ontology directory could not be enumerated
    #[error("{0}")]
    Discovery(#[from] DiscoveryError),

    /// The Draft-07 meta-grammar could not be compiled
    #[error("{0}")]
    Grammar(#[from] GrammarError),

    /// Generated documentation could not be written
    #[error("{0}")]
    Documentation(#[from] DocumentationError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// At least one schema document did not validate
    #[error("{failed} of {total} schemas failed validation")]
    ValidationFailed { failed: usize, total: usize },

    /// At least one schema document was skipped during documentation
    #[error("Documentation skipped {} unreadable schema(s): {}", skipped.len(), list_paths(skipped))]
    DocumentationFailed { skipped: Vec<PathBuf> },

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationFailed { .. } | Self::DocumentationFailed { .. } => 1,
            Self::Io(_) => 2,
            Self::Discovery(_) => 3,
            Self::Config(_) => 4,
            Self::Grammar(_) => 5,
            Self::Documentation(_) => 6,
            Self::Json(_) => 7,
            Self::Yaml(_) => 8,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::Discovery(DiscoveryError::NotFound { .. }))
    }
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}
