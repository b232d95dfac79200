//! Property definitions classified into a closed set of variants
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

/// The shape declared by a `type` keyword
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// `string`, `number`, `integer`, `boolean`, `null`, ...
    Primitive(String),
    /// `array`, with its item definition when `items` is a single schema
    Array { items: Option<Box<PropertyDefinition>> },
    /// `object`
    Object,
    /// `type` given as a list of names
    Union(Vec<String>),
}

/// A property definition from a schema document's `properties` mapping.
///
/// Classification precedence is `type`, then `enum`, then `$ref`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyDefinition {
    Typed {
        kind: TypeKind,
        description: Option<String>,
    },
    Enumerated {
        values: Vec<Value>,
        description: Option<String>,
    },
    Referential {
        reference: String,
        description: Option<String>,
    },
    Unclassified {
        description: Option<String>,
    },
}

impl PropertyDefinition {
    /// Classify a raw definition node
    pub fn from_value(value: &Value) -> Self {
        let description = value
            .get("description")
            .and_then(Value::as_str)
            .map(String::from);

        if let Some(kind) = value.get("type").and_then(|t| type_kind(t, value)) {
            return PropertyDefinition::Typed { kind, description };
        }

        if let Some(values) = value.get("enum").and_then(Value::as_array) {
            if !values.is_empty() {
                return PropertyDefinition::Enumerated {
                    values: values.clone(),
                    description,
                };
            }
        }

        if let Some(reference) = value.get("$ref").and_then(Value::as_str) {
            return PropertyDefinition::Referential {
                reference: reference.to_string(),
                description,
            };
        }

        PropertyDefinition::Unclassified { description }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            PropertyDefinition::Typed { description, .. }
            | PropertyDefinition::Enumerated { description, .. }
            | PropertyDefinition::Referential { description, .. }
            | PropertyDefinition::Unclassified { description } => description.as_deref(),
        }
    }
}

fn type_kind(declared: &Value, node: &Value) -> Option<TypeKind> {
    match declared {
        Value::String(name) => Some(match name.as_str() {
            "array" => TypeKind::Array {
                items: node
                    .get("items")
                    .filter(|items| items.is_object())
                    .map(|items| Box::new(PropertyDefinition::from_value(items))),
            },
            "object" => TypeKind::Object,
            other => TypeKind::Primitive(other.to_string()),
        }),
        Value::Array(names) => Some(TypeKind::Union(
            names
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
        )),
        _ => None,
    }
}
