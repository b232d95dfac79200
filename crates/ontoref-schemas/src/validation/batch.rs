//! Best-effort validation of a list of schema files
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use crate::document::SchemaDocument;
use crate::loader::{LoaderError, ReferenceResolver};
use crate::validation::error::{GrammarError, Violation};
use crate::validation::grammar::GrammarValidator;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Validation configuration for batch operations
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Directory the files were discovered under
    pub input_root: PathBuf,
    /// Identifier base URI mapped onto `input_root` when resolving references
    pub id_base: Option<String>,
}

impl ValidationConfig {
    pub fn new(input_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            id_base: None,
        }
    }

    pub fn with_id_base(mut self, id_base: impl Into<String>) -> Self {
        self.id_base = Some(id_base.into());
        self
    }

    fn resolver(&self) -> ReferenceResolver {
        match &self.id_base {
            Some(base) => ReferenceResolver::new().with_id_base(base.clone(), self.input_root.clone()),
            None => ReferenceResolver::new(),
        }
    }
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "details", rename_all = "snake_case")]
pub enum FileOutcome {
    Valid,
    Invalid(Vec<Violation>),
    /// The file could not be read or parsed
    ParseFailed(String),
    /// A `$ref` could not be resolved, or looped
    ReferenceFailed(String),
}

impl FileOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, FileOutcome::Valid)
    }
}

/// Outcome for one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Outcomes for every file of a run, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub reports: Vec<FileReport>,
}

impl ValidationSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn valid_count(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_valid()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.valid_count() < self.total()
    }
}

/// Validate every file in `paths`, continuing past failures
pub fn validate_files(
    paths: &[PathBuf],
    config: &ValidationConfig,
) -> Result<ValidationSummary, GrammarError> {
    let validator = GrammarValidator::new()?;
    let mut resolver = config.resolver();

    let reports = paths
        .iter()
        .map(|path| FileReport {
            path: path.clone(),
            outcome: validate_file(&validator, &mut resolver, path, &config.input_root),
        })
        .collect();

    let summary = ValidationSummary { reports };
    info!(
        valid = summary.valid_count(),
        total = summary.total(),
        "batch validation finished"
    );
    Ok(summary)
}

fn validate_file(
    validator: &GrammarValidator,
    resolver: &mut ReferenceResolver,
    path: &Path,
    input_root: &Path,
) -> FileOutcome {
    let checked = SchemaDocument::load(path, input_root)
        .and_then(|document| validator.validate(&document, resolver));

    match checked {
        Ok(violations) if violations.is_empty() => FileOutcome::Valid,
        Ok(violations) => FileOutcome::Invalid(violations),
        Err(e) => {
            warn!(
                path = %path.display(),
                culprit = ?e.path(),
                error = %e,
                "schema could not be checked"
            );
            failure_outcome(e)
        }
    }
}

/// Reference failures are reported apart from files that could not be read
fn failure_outcome(error: LoaderError) -> FileOutcome {
    if error.is_reference_error() {
        return FileOutcome::ReferenceFailed(error.to_string());
    }
    match error {
        LoaderError::ParseError { message, .. } => FileOutcome::ParseFailed(message),
        other => FileOutcome::ParseFailed(other.to_string()),
    }
}
