//! Validation command handler

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use ontoref_schemas::{discover_schemas, validate_files, FileOutcome, FileReport, ValidationSummary};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Machine-readable result of a validate run
#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    valid: usize,
    total: usize,
    reports: &'a [FileReport],
}

/// Handle the validate command
#[instrument(skip_all, fields(root = tracing::field::Empty))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let root = super::ontology_root(args.root, config);
    let suffix = config.suffix(args.suffix.as_deref());
    tracing::Span::current().record("root", tracing::field::display(root.display()));

    let timer = Timer::with_details("validate_command", &format!("root: {}", root.display()));
    info!(suffix, "Starting validation");

    let files = discover_schemas(&root, suffix)?;
    if files.is_empty() {
        output.warning(&format!(
            "No files ending in '{}' found under {}",
            suffix,
            root.display()
        ))?;
    }

    let summary = validate_files(&files, &config.validation_config(&root))?;
    debug!(
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Validation finished"
    );

    if output.is_human() {
        print_summary(output, &summary)?;
    } else {
        output.data(&ValidationReport {
            valid: summary.valid_count(),
            total: summary.total(),
            reports: &summary.reports,
        })?;
    }

    if summary.has_failures() {
        return Err(Error::ValidationFailed {
            failed: summary.total() - summary.valid_count(),
            total: summary.total(),
        });
    }
    Ok(())
}

/// One status block per file, then the totals
fn print_summary(output: &mut OutputWriter, summary: &ValidationSummary) -> Result<()> {
    for report in &summary.reports {
        output.step(&format!("→ Validating {}", report.path.display()))?;
        match &report.outcome {
            FileOutcome::Valid => output.success("  ✔ OK")?,
            FileOutcome::ParseFailed(message) => {
                output.error(&format!("  ✖ Failed to parse YAML: {}", message))?
            }
            FileOutcome::Invalid(violations) => {
                for violation in violations {
                    output.error(&format!("  ✖ {}", violation))?;
                }
            }
            FileOutcome::ReferenceFailed(message) => {
                output.error(&format!("  ✖ Reference error: {}", message))?
            }
        }
    }

    output.step("")?;
    output.step(&format!(
        "{}/{} schemas valid",
        summary.valid_count(),
        summary.total()
    ))?;
    if summary.has_failures() {
        output.error("Schema validation FAILED.")
    } else {
        output.success("All schemas validated successfully.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::testing::SharedBuffer;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn ontology(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (relative, content) in files {
            let path = dir.path().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn run(root: &Path, format: OutputFormat) -> (Result<()>, String) {
        let buffer = SharedBuffer::default();
        let mut output = OutputWriter::with_writer(format, false, false, 0, Box::new(buffer.clone()));
        let args = ValidateArgs {
            root: Some(root.to_path_buf()),
            suffix: None,
        };
        let result = handle_validate(args, &Config::default(), &mut output);
        (result, buffer.contents())
    }

    #[test]
    fn test_all_valid() {
        let dir = ontology(&[("entity/party.schema.yaml", "title: Party\ntype: object\n")]);
        let (result, printed) = run(dir.path(), OutputFormat::Human);

        assert!(result.is_ok());
        let path = dir.path().join("entity/party.schema.yaml");
        assert_eq!(
            printed,
            format!(
                "→ Validating {}\n  ✔ OK\n\n1/1 schemas valid\nAll schemas validated successfully.\n",
                path.display()
            )
        );
    }

    #[test]
    fn test_failures_are_listed_and_exit_one() {
        let dir = ontology(&[
            ("entity/broken.schema.yaml", "title: [\n"),
            ("entity/fund.schema.yaml", "properties: {}\nrequired: [vintage]\n"),
            ("entity/gp.schema.yaml", "properties:\n  x:\n    $ref: '#/definitions/Nowhere'\n"),
        ]);
        let (result, printed) = run(dir.path(), OutputFormat::Human);

        let error = result.unwrap_err();
        assert_eq!(error.exit_code(), 1);
        assert!(matches!(error, Error::ValidationFailed { failed: 3, total: 3 }));

        assert!(printed.contains("  ✖ Failed to parse YAML: "), "{printed}");
        assert!(
            printed.contains("  ✖ required.0: \"vintage\" is required but not declared in properties\n"),
            "{printed}"
        );
        assert!(printed.contains("  ✖ Reference error: "), "{printed}");
        assert!(printed.ends_with("0/3 schemas valid\nSchema validation FAILED.\n"), "{printed}");
    }

    #[test]
    fn test_json_report() {
        let dir = ontology(&[
            ("entity/party.schema.yaml", "title: Party\n"),
            ("entity/fund.schema.yaml", "properties: {}\nrequired: [id]\n"),
        ]);
        let (result, printed) = run(dir.path(), OutputFormat::Json);
        assert!(result.is_err());

        let report: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(report["valid"], 1);
        assert_eq!(report["total"], 2);
        assert_eq!(report["reports"][0]["outcome"]["status"], "invalid");
        assert_eq!(report["reports"][1]["outcome"]["status"], "valid");
    }

    #[test]
    fn test_missing_root_is_a_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let (result, _) = run(&dir.path().join("absent"), OutputFormat::Human);
        assert!(matches!(result, Err(Error::Discovery(_))));
    }
}
