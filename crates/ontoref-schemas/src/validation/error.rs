//! Violation and error types for grammar validation
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// One step of a structural path into a document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A structural path into a document.
///
/// Ordering compares segment by segment: keys lexically, indices numerically.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentPath(Vec<PathSegment>);

impl DocumentPath {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend with a mapping key
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Extend with a sequence index
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Append all of `other`'s segments to this path
    pub fn join(&self, other: &DocumentPath) -> Self {
        let mut segments = self.0.clone();
        segments.extend(other.0.iter().cloned());
        Self(segments)
    }

    /// Convert a JSON pointer into a path, using `document` to tell sequence
    /// indices apart from numeric-looking mapping keys
    pub fn from_pointer(pointer: &str, document: &Value) -> Self {
        let mut segments = Vec::new();
        let mut current = Some(document);

        for token in pointer.split('/').skip(1) {
            let token = token.replace("~1", "/").replace("~0", "~");

            match current {
                Some(Value::Array(items)) => match token.parse::<usize>() {
                    Ok(index) => {
                        current = items.get(index);
                        segments.push(PathSegment::Index(index));
                    }
                    Err(_) => {
                        current = None;
                        segments.push(PathSegment::Key(token));
                    }
                },
                Some(Value::Object(map)) => {
                    current = map.get(&token);
                    segments.push(PathSegment::Key(token));
                }
                _ => {
                    current = None;
                    segments.push(PathSegment::Key(token));
                }
            }
        }

        Self(segments)
    }
}

impl From<Vec<PathSegment>> for DocumentPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }

        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for DocumentPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A place where a document breaks the schema-description grammar
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Violation {
    /// Where in the document the problem is
    pub path: DocumentPath,
    /// Human-readable error message
    pub message: String,
}

impl Violation {
    pub fn new(path: DocumentPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Re-anchor this violation beneath `prefix`
    pub fn prefixed(self, prefix: &DocumentPath) -> Self {
        Self {
            path: prefix.join(&self.path),
            message: self.message,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Failure to set up grammar validation
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The embedded meta-grammar is not valid JSON
    #[error("Failed to read meta-grammar: {0}")]
    InvalidMetaGrammar(#[from] serde_json::Error),

    /// The meta-grammar could not be compiled into a validator
    #[error("Failed to compile meta-grammar: {message}")]
    Compile { message: String },
}
