//! Ontoref Schemas - schema document model, validation and reference docs
//!
//! This crate processes a directory of declarative schema documents (an
//! ontology expressed as YAML records with typed properties, references,
//! enumerations and constraints) and provides:
//! - **Loading**: YAML/JSON parsing into an order-preserving tree
//! - **Reference Resolution**: same-document and cross-document `$ref`s with
//!   cycle detection
//! - **Grammar Validation**: JSON Schema Draft-07 meta-schema compliance plus
//!   the `required`/`properties` consistency check
//! - **Documentation**: Markdown pages per document and a category catalog
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ontoref_schemas::{discover_schemas, validate_files, ValidationConfig};
//! use std::path::Path;
//!
//! let root = Path::new("ontology");
//! let files = discover_schemas(root, ".schema.yaml")?;
//! let summary = validate_files(&files, &ValidationConfig::new(root))?;
//!
//! println!("{}/{} schemas valid", summary.valid_count(), summary.total());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

pub mod discovery;
pub mod document;
pub mod documentation;
pub mod loader;
pub mod validation;

// Re-export commonly used types for convenience
pub use discovery::{discover_schemas, DiscoveryError, DEFAULT_SUFFIX};
pub use document::{Category, PropertyDefinition, SchemaDocument, TypeKind};
pub use documentation::{
    build_catalog, type_label, write_site, CatalogOptions, DocumentRenderer, DocumentationError,
    SiteOptions, SiteReport,
};
pub use loader::{LoaderError, LoaderResult, ReferenceResolver, SchemaParser};
pub use validation::{
    validate_files, FileOutcome, FileReport, GrammarError, GrammarValidator, ValidationConfig,
    ValidationSummary, Violation,
};
