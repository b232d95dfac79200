//! Error types for document loading and reference resolution
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while loading schema documents and resolving `$ref`s
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a syntactically valid YAML/JSON tree
    #[error("Failed to parse '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// A `$ref` target could not be located
    #[error("Failed to resolve reference '{reference}' in '{source_path}': {reason}")]
    UnresolvedReference {
        reference: String,
        source_path: PathBuf,
        reason: String,
    },

    /// Reference resolution looped back on itself
    #[error("Cyclic reference detected: {chain}")]
    CyclicReference { chain: String },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::ParseError {
            path,
            message: error.to_string(),
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::ParseError {
            path,
            message: error.to_string(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create an unresolved reference error
    pub fn unresolved(reference: &str, source_path: &Path, reason: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            reference: reference.to_string(),
            source_path: source_path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a cyclic reference error from the chain of visited locations
    pub fn cyclic_reference<I, S>(chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: std::fmt::Display,
    {
        let chain = chain
            .into_iter()
            .map(|link| link.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::CyclicReference { chain }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::ParseError { path, .. } => Some(path),
            Self::UnsupportedFormat { path } => Some(path),
            Self::UnresolvedReference { source_path, .. } => Some(source_path),
            Self::CyclicReference { .. } => None,
        }
    }

    /// Whether this error comes from following a `$ref`, as opposed to
    /// reading the document itself
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedReference { .. } | Self::CyclicReference { .. }
        )
    }
}
