//! Markdown templates for documentation generation
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use crate::document::{scalar_text, Constraint, ConstraintKind, Property};
use crate::documentation::describe::type_label;
use serde_json::Value;
use std::fmt::Write;

/// Shown when a document has no `description`
pub const NO_DESCRIPTION_AVAILABLE: &str = "No description available.";

/// Shown when a property has no `description`
pub const NO_PROPERTY_DESCRIPTION: &str = "No description";

/// Section builders for generated Markdown
pub struct Template;

impl Template {
    /// Page title and provenance lines
    pub fn header(title: &str, category: &str, schema_file: &str) -> String {
        format!("# {title}\n\n**Category**: {category}\n\n**Schema File**: `{schema_file}`\n\n")
    }

    pub fn description(description: Option<&str>) -> String {
        format!(
            "## Description\n\n{}\n\n",
            description.unwrap_or(NO_DESCRIPTION_AVAILABLE)
        )
    }

    pub fn schema_id(id: &str) -> String {
        format!("**Schema ID**: `{id}`\n\n")
    }

    /// Property table, rows in declared order
    pub fn properties(properties: &[Property]) -> String {
        let mut result = String::from("## Properties\n\n");

        if properties.is_empty() {
            result.push_str("No properties defined.");
        } else {
            result.push_str("| Property | Type | Required | Description |\n");
            result.push_str("|----------|------|----------|-------------|\n");

            for property in properties {
                let marker = if property.required { "✅" } else { "❌" };
                let description = property
                    .definition
                    .description()
                    .map(table_cell)
                    .unwrap_or_else(|| NO_PROPERTY_DESCRIPTION.to_string());
                let _ = writeln!(
                    result,
                    "| `{}` | {} | {} | {} |",
                    table_cell(&property.name),
                    table_cell(&type_label(&property.definition)),
                    marker,
                    description
                );
            }
        }

        result.push_str("\n\n");
        result
    }

    /// Examples as YAML blocks, numbered from 1; empty when there are none
    pub fn examples(examples: &[Value]) -> String {
        if examples.is_empty() {
            return String::new();
        }

        let mut result = String::from("## Examples\n\n");

        for (i, example) in examples.iter().enumerate() {
            let yaml = serde_yaml::to_string(example).unwrap_or_else(|_| "null\n".to_string());
            let _ = write!(result, "### Example {}\n\n```yaml\n{}```\n\n", i + 1, yaml);
        }

        result
    }

    /// Constraint list; empty when there are no constraints
    pub fn constraints(constraints: &[Constraint]) -> String {
        if constraints.is_empty() {
            return String::new();
        }

        let mut result = String::from("## Constraints\n\n");
        for constraint in constraints {
            let value = scalar_text(&constraint.value);
            let _ = match constraint.kind {
                ConstraintKind::Pattern => {
                    writeln!(result, "- {}: `{}`", constraint.kind.label(), value)
                }
                _ => writeln!(result, "- {}: {}", constraint.kind.label(), value),
            };
        }
        result.push('\n');
        result
    }
}

/// Keep a value on one table row inside its own column
fn table_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PropertyDefinition;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_properties_table() {
        let properties = vec![
            Property {
                name: "name".to_string(),
                definition: PropertyDefinition::from_value(&json!({"type": "string", "description": "Legal name"})),
                required: true,
            },
            Property {
                name: "tags".to_string(),
                definition: PropertyDefinition::from_value(&json!({"type": "array", "items": {"type": "string"}})),
                required: false,
            },
        ];

        assert_eq!(
            Template::properties(&properties),
            "## Properties\n\n\
             | Property | Type | Required | Description |\n\
             |----------|------|----------|-------------|\n\
             | `name` | String | ✅ | Legal name |\n\
             | `tags` | Array of String | ❌ | No description |\n\
             \n\n"
        );
    }

    #[test]
    fn test_empty_properties() {
        assert_eq!(Template::properties(&[]), "## Properties\n\nNo properties defined.\n\n");
    }

    #[test]
    fn test_examples_keep_key_order() {
        let rendered = Template::examples(&[json!({"name": "Acme", "amount": 10})]);
        assert_eq!(rendered, "## Examples\n\n### Example 1\n\n```yaml\nname: Acme\namount: 10\n```\n\n");
    }

    #[test]
    fn test_constraints() {
        assert_eq!(Template::constraints(&[]), "");

        let lone_pattern = [Constraint { kind: ConstraintKind::Pattern, value: json!("^[A-Z]{3}$") }];
        assert_eq!(Template::constraints(&lone_pattern), "## Constraints\n\n- Pattern: `^[A-Z]{3}$`\n\n");

        let bounds = [
            Constraint { kind: ConstraintKind::Minimum, value: json!(0) },
            Constraint { kind: ConstraintKind::MaxLength, value: json!(64) },
        ];
        assert_eq!(
            Template::constraints(&bounds),
            "## Constraints\n\n- Minimum value: 0\n- Maximum length: 64\n\n"
        );
    }

    #[test]
    fn test_multiline_description_cell() {
        assert_eq!(table_cell("Folded\ndescription  text\n"), "Folded description text");
    }

    #[test]
    fn test_pipes_stay_inside_their_cell() {
        let properties = vec![Property {
            name: "in|out".to_string(),
            definition: PropertyDefinition::from_value(&json!({
                "enum": ["a|b", "c"],
                "description": "Either | or"
            })),
            required: false,
        }];

        let table = Template::properties(&properties);
        assert!(
            table.contains("| `in\\|out` | Enum: a\\|b, c | ❌ | Either \\| or |\n"),
            "{table}"
        );
    }

    #[test]
    fn test_no_examples_renders_nothing() {
        assert_eq!(Template::examples(&[]), "");
    }
}
