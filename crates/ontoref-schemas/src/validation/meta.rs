//! The embedded Draft-07 meta-grammar
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{DocumentPath, GrammarError, Violation};
use serde_json::Value;
use std::fmt;

/// JSON Schema Draft-07 meta-schema, the grammar every schema document must satisfy
pub const DRAFT_07: &str = include_str!("../../meta/draft-07.schema.json");

/// Compiled meta-grammar checker
pub struct MetaGrammar {
    validator: jsonschema::Validator,
}

impl MetaGrammar {
    /// Compile the embedded Draft-07 meta-schema
    pub fn draft07() -> Result<Self, GrammarError> {
        let meta: Value = serde_json::from_str(DRAFT_07)?;
        Self::from_value(&meta)
    }

    /// Compile an arbitrary Draft-07 schema as the grammar
    pub fn from_value(meta: &Value) -> Result<Self, GrammarError> {
        let validator = jsonschema::draft7::new(meta).map_err(|e| GrammarError::Compile {
            message: e.to_string(),
        })?;
        Ok(Self { validator })
    }

    /// Violations of the grammar by `tree`, with paths relative to `tree`
    pub fn check(&self, tree: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(tree)
            .map(|e| {
                let pointer = e.instance_path.to_string();
                Violation::new(DocumentPath::from_pointer(&pointer, tree), e.to_string())
            })
            .collect()
    }

    pub fn is_valid(&self, tree: &Value) -> bool {
        self.validator.is_valid(tree)
    }
}

impl fmt::Debug for MetaGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaGrammar").finish_non_exhaustive()
    }
}
