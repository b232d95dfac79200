//! Schema loading and reference resolution
//!
//! This module provides:
//! - YAML and JSON parsing into an order-preserving document tree
//! - Reference resolution (`$ref` support) across documents
//! - Per-run caching of referenced files
//! - Circular reference detection
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use ontoref_schemas::loader::{ReferenceResolver, ResolverContext, SchemaParser};
//! use std::path::Path;
//!
//! let path = Path::new("ontology/entity/deal.schema.yaml");
//! let root = SchemaParser::new().parse_file(path)?;
//!
//! let mut resolver = ReferenceResolver::new();
//! resolver.insert_document(path, &root);
//! let target = resolver.resolve("#/definitions/Money", &ResolverContext::new(path))?;
//! println!("Resolved to {}", target.key);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;
pub mod resolver;

pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use resolver::{
    apply_json_pointer, Reference, ReferenceResolver, ResolutionKey, ResolvedTarget,
    ResolverContext,
};
