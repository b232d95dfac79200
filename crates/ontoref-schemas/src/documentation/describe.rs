//! Human-readable type labels for property definitions
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use crate::document::{capitalize, scalar_text, PropertyDefinition, TypeKind};

/// Label for a property definition, e.g. `Array of String` or `Enum: a, b`
pub fn type_label(definition: &PropertyDefinition) -> String {
    match definition {
        PropertyDefinition::Typed { kind, .. } => kind_label(kind),
        PropertyDefinition::Enumerated { values, .. } => format!(
            "Enum: {}",
            values.iter().map(scalar_text).collect::<Vec<_>>().join(", ")
        ),
        PropertyDefinition::Referential { reference, .. } => format!(
            "Reference: {}",
            reference.strip_prefix("#/").unwrap_or(reference)
        ),
        PropertyDefinition::Unclassified { .. } => "Unknown".to_string(),
    }
}

fn kind_label(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Primitive(name) => capitalize(name),
        TypeKind::Array { items: Some(items) } => format!("Array of {}", type_label(items)),
        TypeKind::Array { items: None } => "Array".to_string(),
        TypeKind::Object => "Object".to_string(),
        TypeKind::Union(names) => names
            .iter()
            .map(|name| capitalize(name))
            .collect::<Vec<_>>()
            .join(" or "),
    }
}
