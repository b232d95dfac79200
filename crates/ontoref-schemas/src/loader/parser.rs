//! Schema parsing functionality for YAML and JSON formats
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats for schema parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }
}

/// Syntactic parser turning schema files into document trees.
///
/// No shape checking happens here; a file that parses is handed on as-is.
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    /// Create a new schema parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a schema file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse schema content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        // Non-string mapping keys have no JSON counterpart and fail here
        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("deal.schema.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("deal.schema.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("deal.schema.json")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("deal.schema.toml")).is_err());
        assert!(Format::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_yaml_preserves_key_order() {
        let parser = SchemaParser::new();
        let content = "properties:\n  zeta:\n    type: string\n  alpha:\n    type: number\n";
        let value = parser.parse_yaml(content, Path::new("order.yaml")).unwrap();
        let keys: Vec<&str> = value["properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_error_carries_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.schema.yaml");
        fs::write(&path, "title: [unclosed\n").unwrap();

        let err = SchemaParser::new().parse_file(&path).unwrap_err();
        match err {
            LoaderError::ParseError { path: err_path, message } => {
                assert_eq!(err_path, path);
                assert!(!message.is_empty());
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SchemaParser::new()
            .parse_file(Path::new("/nonexistent/deal.schema.yaml"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
    }

    #[test]
    fn test_non_string_keys_rejected() {
        let parser = SchemaParser::new();
        let err = parser.parse_yaml("? [a, b]\n: value\n", Path::new("keys.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::ParseError { .. }));
    }
}
