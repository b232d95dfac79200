//! The schema document model
//!
//! A [`SchemaDocument`] wraps the parsed tree of one schema file together with
//! where it came from. Accessors expose the recognized keys (`title`,
//! `description`, `$id`, `properties`, `required`, `examples` and the scalar
//! constraints) without assuming the document is well formed; checking that is
//! the validator's job.
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

pub mod property;

pub use property::{PropertyDefinition, TypeKind};

use crate::loader::{LoaderResult, SchemaParser};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Title used when a document has neither `title` nor `$id`
pub const UNKNOWN_TITLE: &str = "Unknown Schema";

/// The directory a schema document lives in, used to group documentation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Category of the file at `path`: the name of its parent directory
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .unwrap_or("uncategorized");
        Self::new(name)
    }

    /// The raw directory name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// `capital-stack` becomes `Capital Stack`
    pub fn display_name(&self) -> String {
        title_case(&self.0.replace('-', " "))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the scalar constraint keywords shown in documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Minimum,
    Maximum,
    MinLength,
    MaxLength,
    Pattern,
}

impl ConstraintKind {
    /// All kinds, in the order they are rendered
    pub const ALL: [ConstraintKind; 5] = [
        ConstraintKind::Minimum,
        ConstraintKind::Maximum,
        ConstraintKind::MinLength,
        ConstraintKind::MaxLength,
        ConstraintKind::Pattern,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ConstraintKind::Minimum => "minimum",
            ConstraintKind::Maximum => "maximum",
            ConstraintKind::MinLength => "minLength",
            ConstraintKind::MaxLength => "maxLength",
            ConstraintKind::Pattern => "pattern",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConstraintKind::Minimum => "Minimum value",
            ConstraintKind::Maximum => "Maximum value",
            ConstraintKind::MinLength => "Minimum length",
            ConstraintKind::MaxLength => "Maximum length",
            ConstraintKind::Pattern => "Pattern",
        }
    }
}

/// A constraint keyword present at the document root
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub value: Value,
}

/// A named entry of the `properties` mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub definition: PropertyDefinition,
    pub required: bool,
}

/// A loaded schema document
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    /// Location the document was read from
    pub path: PathBuf,
    /// Path shown in documentation: the input root's name followed by the
    /// path beneath it
    pub display_path: PathBuf,
    /// The parsed tree
    pub root: Value,
    pub category: Category,
}

impl SchemaDocument {
    /// Load the document at `path`, found beneath the input directory `input_root`
    pub fn load(path: &Path, input_root: &Path) -> LoaderResult<Self> {
        let root = SchemaParser::new().parse_file(path)?;
        Ok(Self::from_value(path, input_root, root))
    }

    /// Wrap an already parsed tree
    pub fn from_value(path: &Path, input_root: &Path, root: Value) -> Self {
        let relative = path.strip_prefix(input_root).unwrap_or(path);
        let display_path = match input_root.file_name() {
            Some(name) if relative != path => Path::new(name).join(relative),
            _ => relative.to_path_buf(),
        };

        Self {
            path: path.to_path_buf(),
            display_path,
            root,
            category: Category::from_path(path),
        }
    }

    /// `title`, falling back to `$id`, then to a placeholder
    pub fn title(&self) -> &str {
        self.str_key("title")
            .or_else(|| self.id())
            .unwrap_or(UNKNOWN_TITLE)
    }

    pub fn description(&self) -> Option<&str> {
        self.str_key("description")
    }

    pub fn id(&self) -> Option<&str> {
        self.str_key("$id")
    }

    /// Names listed under `required`
    pub fn required(&self) -> Vec<&str> {
        self.root
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Declared properties in source order; `None` when there is no
    /// `properties` key at all
    pub fn properties(&self) -> Option<Vec<Property>> {
        let properties = self.root.get("properties")?;
        let required = self.required();

        Some(
            properties
                .as_object()
                .map(|map| {
                    map.iter()
                        .map(|(name, definition)| Property {
                            name: name.clone(),
                            definition: PropertyDefinition::from_value(definition),
                            required: required.contains(&name.as_str()),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        )
    }

    /// The `examples` list, if present
    pub fn examples(&self) -> Option<&[Value]> {
        self.root
            .get("examples")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Root-level constraint keywords that are present, in rendering order
    pub fn constraints(&self) -> Vec<Constraint> {
        ConstraintKind::ALL
            .iter()
            .filter_map(|&kind| {
                self.root.get(kind.keyword()).map(|value| Constraint {
                    kind,
                    value: value.clone(),
                })
            })
            .collect()
    }

    /// File name without its last extension (`deal.schema.yaml` -> `deal.schema`)
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn str_key(&self, key: &str) -> Option<&str> {
        self.root.get(key).and_then(Value::as_str)
    }
}

/// Text of a scalar as it appears in documentation; strings are unquoted
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Upper-case the first letter of every word and lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }

    result
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(root: Value) -> SchemaDocument {
        SchemaDocument::from_value(
            Path::new("ontology/capital-stack/tranche.schema.yaml"),
            Path::new("ontology"),
            root,
        )
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::new("capital-stack").display_name(), "Capital Stack");
        assert_eq!(Category::new("entity").display_name(), "Entity");
        assert_eq!(
            Category::from_path(Path::new("ontology/market-data/curve.schema.yaml")).name(),
            "market-data"
        );
    }

    #[test]
    fn test_title_fallbacks() {
        assert_eq!(document(json!({"title": "Tranche", "$id": "x"})).title(), "Tranche");
        assert_eq!(document(json!({"$id": "https://cfdl.dev/ontology/t"})).title(), "https://cfdl.dev/ontology/t");
        assert_eq!(document(json!({})).title(), UNKNOWN_TITLE);
        assert_eq!(document(Value::Null).title(), UNKNOWN_TITLE);
    }

    #[test]
    fn test_paths() {
        let doc = document(json!({}));
        assert_eq!(doc.display_path, PathBuf::from("ontology/capital-stack/tranche.schema.yaml"));
        assert_eq!(doc.stem(), "tranche.schema");
        assert_eq!(doc.category.name(), "capital-stack");
    }

    #[test]
    fn test_properties_mark_required() {
        let doc = document(json!({
            "properties": {
                "name": {"type": "string"},
                "seniority": {"type": "integer"}
            },
            "required": ["seniority"]
        }));
        let properties = doc.properties().unwrap();
        let summary: Vec<(&str, bool)> = properties.iter().map(|p| (p.name.as_str(), p.required)).collect();
        assert_eq!(summary, vec![("name", false), ("seniority", true)]);

        assert!(document(json!({"title": "No props"})).properties().is_none());
        assert_eq!(document(json!({"properties": {}})).properties(), Some(vec![]));
    }

    #[test]
    fn test_constraints_in_render_order() {
        let doc = document(json!({"pattern": "^[A-Z]+$", "minimum": 0}));
        let kinds: Vec<ConstraintKind> = doc.constraints().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ConstraintKind::Minimum, ConstraintKind::Pattern]);
        assert!(document(json!({"title": "x"})).constraints().is_empty());
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(capitalize("string"), "String");
        assert_eq!(capitalize("dateTime"), "Datetime");
        assert_eq!(capitalize(""), "");
        assert_eq!(title_case("waterfall tier"), "Waterfall Tier");
        assert_eq!(scalar_text(&json!("abc")), "abc");
        assert_eq!(scalar_text(&json!(1.5)), "1.5");
        assert_eq!(scalar_text(&json!(true)), "true");
    }
}
