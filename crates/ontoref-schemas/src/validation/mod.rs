//! Grammar validation for schema documents
//!
//! Every schema document must itself be a well-formed instance of the
//! schema-description grammar (JSON Schema Draft-07). On top of the
//! meta-grammar, each schema node's `required` names must be declared under
//! its `properties`.
//!
//! # Examples
//!
//! ```rust
//! use ontoref_schemas::document::SchemaDocument;
//! use ontoref_schemas::loader::ReferenceResolver;
//! use ontoref_schemas::validation::GrammarValidator;
//! use serde_json::json;
//! use std::path::Path;
//!
//! let validator = GrammarValidator::new().unwrap();
//! let document = SchemaDocument::from_value(
//!     Path::new("ontology/entity/party.schema.yaml"),
//!     Path::new("ontology"),
//!     json!({"properties": {"name": {"type": "string"}}, "required": ["name", "id"]}),
//! );
//!
//! let violations = validator.validate(&document, &mut ReferenceResolver::new()).unwrap();
//! assert_eq!(violations[0].path.to_string(), "required.1");
//! ```
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

pub mod batch;
pub mod error;
pub mod grammar;
pub mod meta;

pub use batch::{validate_files, FileOutcome, FileReport, ValidationConfig, ValidationSummary};
pub use error::{DocumentPath, GrammarError, PathSegment, Violation};
pub use grammar::GrammarValidator;
pub use meta::MetaGrammar;
