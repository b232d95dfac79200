//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use ontoref_schemas::documentation::DEFAULT_CATALOG_FILE;
use ontoref_schemas::{CatalogOptions, SiteOptions, ValidationConfig, DEFAULT_SUFFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identifier base under which ontology documents publish their `$id`s
pub const DEFAULT_ID_BASE: &str = "https://cfdl.dev/ontology/";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path settings
    pub paths: PathConfig,

    /// Schema discovery and rendering settings
    pub schemas: SchemaConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Path configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Directory scanned for schema documents
    pub ontology_dir: PathBuf,

    /// Directory the reference documentation is written to
    pub docs_dir: PathBuf,
}

/// Schema configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// File name suffix marking schema documents
    pub suffix: String,

    /// URI prefix mapped onto the ontology directory when resolving `$ref`s
    pub id_base: Option<String>,

    /// File name of the catalog page
    pub catalog_file: String,

    /// Heading of the catalog page
    pub catalog_title: String,

    /// Characters of each description shown in the catalog
    pub summary_length: usize,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            ontology_dir: PathBuf::from("ontology"),
            docs_dir: PathBuf::from("website/docs/specification"),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        let catalog = CatalogOptions::default();
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            id_base: Some(DEFAULT_ID_BASE.to_string()),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            catalog_title: catalog.title,
            summary_length: catalog.summary_length,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
            progress: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().and_then(|s| s.to_str()) == Some("yaml")
            || path.extension().and_then(|s| s.to_str()) == Some("yml")
        {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        config.check()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".ontoref.yaml"),
            PathBuf::from(".ontoref.json"),
            PathBuf::from("ontoref.yaml"),
            PathBuf::from("ontoref.json"),
        ];

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let ontoref_dir = config_dir.join("ontoref");
            paths.push(ontoref_dir.join("config.yaml"));
            paths.push(ontoref_dir.join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".ontoref.yaml"));
            paths.push(home_dir.join(".ontoref.json"));
        }

        paths
    }

    /// Reject settings no run could use
    fn check(&self) -> Result<()> {
        if self.schemas.suffix.is_empty() {
            return Err(Error::config("schemas.suffix must not be empty"));
        }
        if self.schemas.catalog_file.is_empty() {
            return Err(Error::config("schemas.catalog_file must not be empty"));
        }
        Ok(())
    }

    /// Suffix to discover with, preferring the command-line override
    pub fn suffix<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.unwrap_or(&self.schemas.suffix)
    }

    /// Validation settings for an ontology rooted at `root`
    pub fn validation_config(&self, root: &Path) -> ValidationConfig {
        let config = ValidationConfig::new(root);
        match &self.schemas.id_base {
            Some(base) => config.with_id_base(base.clone()),
            None => config,
        }
    }

    /// Documentation settings
    pub fn site_options(&self) -> SiteOptions {
        SiteOptions {
            catalog_file: self.schemas.catalog_file.clone(),
            catalog: CatalogOptions {
                title: self.schemas.catalog_title.clone(),
                summary_length: self.schemas.summary_length,
            },
        }
    }
}
