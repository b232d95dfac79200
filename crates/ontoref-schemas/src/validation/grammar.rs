//! Grammar validation of schema documents
//!
//! A document is checked against the meta-grammar as a whole, then walked
//! through every position that holds a nested schema. At each node the
//! `required` names must all appear under `properties`. A `$ref` is resolved
//! and its target is checked and walked in turn, with its violations anchored
//! beneath the first location that references it.
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use crate::document::SchemaDocument;
use crate::loader::{LoaderResult, ReferenceResolver, ResolutionKey, ResolverContext};
use crate::validation::error::{DocumentPath, GrammarError, Violation};
use crate::validation::meta::MetaGrammar;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, trace};

/// Keywords whose value is a single nested schema
const SCHEMA_KEYWORDS: &[&str] = &[
    "additionalItems",
    "additionalProperties",
    "contains",
    "propertyNames",
    "if",
    "then",
    "else",
    "not",
];

/// Keywords whose value maps names to nested schemas
const SCHEMA_MAP_KEYWORDS: &[&str] = &[
    "properties",
    "definitions",
    "$defs",
    "patternProperties",
    "dependencies",
];

/// Keywords whose value is a list of nested schemas
const SCHEMA_LIST_KEYWORDS: &[&str] = &["allOf", "anyOf", "oneOf"];

/// Validator for schema documents against the schema-description grammar
#[derive(Debug)]
pub struct GrammarValidator {
    meta: MetaGrammar,
}

impl GrammarValidator {
    /// Create a validator using the embedded Draft-07 meta-grammar
    pub fn new() -> Result<Self, GrammarError> {
        Ok(Self::with_meta(MetaGrammar::draft07()?))
    }

    pub fn with_meta(meta: MetaGrammar) -> Self {
        Self { meta }
    }

    /// Validate one document, following its references through `resolver`.
    ///
    /// Returns the sorted, de-duplicated violations; an empty list means the
    /// document is valid. Reference failures abort the document and are
    /// returned as errors. Each reference target is checked once per call and
    /// its violations are anchored at the first location that reaches it.
    pub fn validate(
        &self,
        document: &SchemaDocument,
        resolver: &mut ReferenceResolver,
    ) -> LoaderResult<Vec<Violation>> {
        resolver.insert_document(&document.path, &document.root);
        let mut walk = Walk::new(&document.path);

        self.check_tree(&document.root, &DocumentPath::root(), resolver, &mut walk)?;

        let mut violations = walk.violations;
        violations.sort();
        violations.dedup();
        debug!(
            path = %document.path.display(),
            violations = violations.len(),
            targets = walk.checked.len(),
            "document validated"
        );
        Ok(violations)
    }

    /// Meta-check a whole tree, then walk it
    fn check_tree(
        &self,
        tree: &Value,
        at: &DocumentPath,
        resolver: &mut ReferenceResolver,
        walk: &mut Walk,
    ) -> LoaderResult<()> {
        walk.violations
            .extend(self.meta.check(tree).into_iter().map(|v| v.prefixed(at)));
        self.walk(tree, at, resolver, walk)
    }

    fn walk(
        &self,
        node: &Value,
        at: &DocumentPath,
        resolver: &mut ReferenceResolver,
        walk: &mut Walk,
    ) -> LoaderResult<()> {
        let Some(schema) = node.as_object() else {
            return Ok(());
        };

        // Siblings of `$ref` carry no meaning in Draft-07
        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            return self.descend_reference(reference, at, resolver, walk);
        }

        check_required(schema, at, &mut walk.violations);

        for &keyword in SCHEMA_KEYWORDS {
            if let Some(child) = schema.get(keyword) {
                self.walk(child, &at.key(keyword), resolver, walk)?;
            }
        }

        for &keyword in SCHEMA_MAP_KEYWORDS {
            if let Some(Value::Object(children)) = schema.get(keyword) {
                let base = at.key(keyword);
                for (name, child) in children {
                    self.walk(child, &base.key(name.as_str()), resolver, walk)?;
                }
            }
        }

        for &keyword in SCHEMA_LIST_KEYWORDS {
            if let Some(Value::Array(children)) = schema.get(keyword) {
                self.walk_list(children, &at.key(keyword), resolver, walk)?;
            }
        }

        match schema.get("items") {
            Some(Value::Array(children)) => {
                self.walk_list(children, &at.key("items"), resolver, walk)?;
            }
            Some(child) => self.walk(child, &at.key("items"), resolver, walk)?,
            None => {}
        }

        Ok(())
    }

    fn walk_list(
        &self,
        children: &[Value],
        at: &DocumentPath,
        resolver: &mut ReferenceResolver,
        walk: &mut Walk,
    ) -> LoaderResult<()> {
        for (index, child) in children.iter().enumerate() {
            self.walk(child, &at.index(index), resolver, walk)?;
        }
        Ok(())
    }

    fn descend_reference(
        &self,
        reference: &str,
        at: &DocumentPath,
        resolver: &mut ReferenceResolver,
        walk: &mut Walk,
    ) -> LoaderResult<()> {
        let target = resolver.resolve(reference, &walk.context)?;

        // A finished target has no path back onto the current stack: any
        // such loop would have been met while it was being walked.
        if walk.checked.contains(&target.key) {
            trace!(reference, target = %target.key, "reference target already checked");
            return Ok(());
        }
        trace!(reference, target = %target.key, "descending into reference");

        walk.context.push(target.key.clone())?;
        let result = self.check_tree(&target.value, &at.key("$ref"), resolver, walk);
        walk.context.pop();
        result?;

        walk.checked.insert(target.key);
        Ok(())
    }
}

/// State of one `validate` call
struct Walk {
    context: ResolverContext,
    /// Reference targets whose trees have been fully checked
    checked: HashSet<ResolutionKey>,
    violations: Vec<Violation>,
}

impl Walk {
    fn new(origin: &Path) -> Self {
        Self {
            context: ResolverContext::new(origin),
            checked: HashSet::new(),
            violations: Vec::new(),
        }
    }
}

/// Every name in `required` must be declared under `properties`
fn check_required(schema: &Map<String, Value>, at: &DocumentPath, out: &mut Vec<Violation>) {
    let Some(Value::Array(required)) = schema.get("required") else {
        return;
    };
    let properties = schema.get("properties").and_then(Value::as_object);

    for (index, name) in required.iter().enumerate() {
        let Some(name) = name.as_str() else {
            continue;
        };
        if !properties.is_some_and(|p| p.contains_key(name)) {
            out.push(Violation::new(
                at.key("required").index(index),
                format!("\"{name}\" is required but not declared in properties"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoaderError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn document(path: &Path, root: Value) -> SchemaDocument {
        SchemaDocument::from_value(path, path.parent().unwrap_or(Path::new("")), root)
    }

    fn rendered(violations: &[Violation]) -> Vec<String> {
        violations.iter().map(|v| v.path.to_string()).collect()
    }

    #[test]
    fn test_valid_document_has_no_violations() {
        let validator = GrammarValidator::new().unwrap();
        let doc = document(
            Path::new("ontology/entity/party.schema.yaml"),
            json!({
                "title": "Party",
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "role": {"enum": ["sponsor", "lender"]}
                },
                "required": ["name"]
            }),
        );

        let violations = validator.validate(&doc, &mut ReferenceResolver::new()).unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_required_must_be_declared() {
        let validator = GrammarValidator::new().unwrap();
        let doc = document(
            Path::new("ontology/entity/party.schema.yaml"),
            json!({
                "properties": {
                    "name": {"type": "string"},
                    "address": {
                        "type": "object",
                        "properties": {"city": {"type": "string"}},
                        "required": ["city", "zip"]
                    }
                },
                "required": ["name", "id"]
            }),
        );

        let violations = validator.validate(&doc, &mut ReferenceResolver::new()).unwrap();
        assert_eq!(
            rendered(&violations),
            vec!["properties.address.required.1", "required.1"]
        );
        assert!(violations[1].message.contains("\"id\""));
    }

    #[test]
    fn test_violations_are_sorted_and_unique() {
        let validator = GrammarValidator::new().unwrap();
        let doc = document(
            Path::new("ontology/entity/deal.schema.yaml"),
            json!({
                "title": 1,
                "properties": {"b": {"type": "bogus"}, "a": {"type": "bogus"}},
                "required": ["x"]
            }),
        );

        let violations = validator.validate(&doc, &mut ReferenceResolver::new()).unwrap();
        let mut sorted = violations.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(violations, sorted);

        let paths = rendered(&violations);
        let a = paths.iter().position(|p| p.starts_with("properties.a")).unwrap();
        let b = paths.iter().position(|p| p.starts_with("properties.b")).unwrap();
        assert!(a < b);
        assert_eq!(paths.last().map(String::as_str), Some("title"));
    }

    #[test]
    fn test_reference_targets_are_checked() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("money.schema.yaml"),
            "type: object\nproperties:\n  amount:\n    type: number\nrequired: [amount, currency]\n",
        )
        .unwrap();

        let validator = GrammarValidator::new().unwrap();
        let doc = document(
            &dir.path().join("deal.schema.yaml"),
            json!({"properties": {"price": {"$ref": "money.schema.yaml"}}}),
        );

        let violations = validator.validate(&doc, &mut ReferenceResolver::new()).unwrap();
        assert_eq!(rendered(&violations), vec!["properties.price.$ref.required.1"]);
    }

    #[test]
    fn test_recursive_definition_is_cyclic() {
        let validator = GrammarValidator::new().unwrap();
        let doc = document(
            Path::new("ontology/entity/node.schema.yaml"),
            json!({
                "definitions": {
                    "Node": {"properties": {"next": {"$ref": "#/definitions/Node"}}}
                }
            }),
        );

        let err = validator.validate(&doc, &mut ReferenceResolver::new()).unwrap_err();
        assert!(matches!(err, LoaderError::CyclicReference { .. }), "{err:?}");
    }

    #[test]
    fn test_cycle_across_two_documents() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.schema.yaml"),
            "properties:\n  b:\n    $ref: b.schema.yaml\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.schema.yaml"),
            "properties:\n  a:\n    $ref: a.schema.yaml\n",
        )
        .unwrap();

        let path = dir.path().join("a.schema.yaml");
        let doc = SchemaDocument::load(&path, dir.path()).unwrap();
        let err = GrammarValidator::new()
            .unwrap()
            .validate(&doc, &mut ReferenceResolver::new())
            .unwrap_err();
        assert!(matches!(err, LoaderError::CyclicReference { .. }), "{err:?}");
    }

    #[test]
    fn test_unresolved_reference_aborts() {
        let validator = GrammarValidator::new().unwrap();
        let doc = document(
            Path::new("ontology/entity/deal.schema.yaml"),
            json!({"properties": {"sponsor": {"$ref": "#/definitions/Missing"}}}),
        );

        let err = validator.validate(&doc, &mut ReferenceResolver::new()).unwrap_err();
        match err {
            LoaderError::UnresolvedReference { reference, .. } => {
                assert_eq!(reference, "#/definitions/Missing");
            }
            other => panic!("expected UnresolvedReference, got {other:?}"),
        }
    }

    #[test]
    fn test_shared_definition_is_not_a_cycle() {
        let validator = GrammarValidator::new().unwrap();
        let doc = document(
            Path::new("ontology/entity/deal.schema.yaml"),
            json!({
                "definitions": {"Money": {"type": "number"}},
                "properties": {
                    "price": {"$ref": "#/definitions/Money"},
                    "cost": {"$ref": "#/definitions/Money"},
                    "fees": {"type": "array", "items": {"$ref": "#/definitions/Money"}}
                }
            }),
        );

        let violations = validator.validate(&doc, &mut ReferenceResolver::new()).unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_diamond_references_are_checked_once() {
        const DEPTH: usize = 20;

        // Every level references the next one twice
        let mut definitions = Map::new();
        for level in 0..DEPTH {
            let next = json!({"$ref": format!("#/definitions/D{}", level + 1)});
            definitions.insert(
                format!("D{level}"),
                json!({"properties": {"left": next.clone(), "right": next}}),
            );
        }
        definitions.insert(format!("D{DEPTH}"), json!({"required": ["missing"]}));

        let validator = GrammarValidator::new().unwrap();
        let doc = document(
            Path::new("ontology/entity/ladder.schema.yaml"),
            json!({"definitions": definitions}),
        );

        let violations = validator.validate(&doc, &mut ReferenceResolver::new()).unwrap();
        let through_references = format!(
            "definitions.D0{}.required.0",
            ".properties.left.$ref".repeat(DEPTH)
        );
        assert_eq!(
            rendered(&violations),
            vec![through_references, format!("definitions.D{DEPTH}.required.0")]
        );
    }
}
