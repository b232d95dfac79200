//! Documentation generation command handler

use crate::cli::DocsArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use ontoref_schemas::{discover_schemas, write_site, SchemaDocument};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Machine-readable result of a docs run
#[derive(Debug, Serialize)]
struct DocsReport {
    output_dir: PathBuf,
    catalog: PathBuf,
    pages: Vec<PathBuf>,
    skipped: Vec<SkippedSchema>,
}

#[derive(Debug, Serialize)]
struct SkippedSchema {
    path: PathBuf,
    error: String,
}

/// Handle the docs command
#[instrument(skip_all)]
pub fn handle_docs(args: DocsArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let root = super::ontology_root(args.root, config);
    let out_dir = args.out.unwrap_or_else(|| config.paths.docs_dir.clone());
    let suffix = config.suffix(args.suffix.as_deref());

    let _timer = Timer::with_details(
        "docs_command",
        &format!("root: {}, out: {}", root.display(), out_dir.display()),
    );
    output.info("Generating schema documentation...")?;

    let files = discover_schemas(&root, suffix)?;

    let progress = output.progress_bar(files.len() as u64, "Loading schemas");
    let mut documents = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();
    for path in &files {
        match SchemaDocument::load(path, &root) {
            Ok(document) => documents.push(document),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable schema");
                skipped.push(SkippedSchema {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    for failure in &skipped {
        output.error(&format!("  ✖ {}", failure.error))?;
    }

    let site = {
        let spinner = output.spinner("Writing documentation...");
        let site = write_site(&documents, &out_dir, &config.site_options());
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        site?
    };

    info!(
        pages = site.pages.len(),
        skipped = skipped.len(),
        out = %out_dir.display(),
        "Documentation written"
    );

    let skipped_paths: Vec<PathBuf> = skipped.iter().map(|s| s.path.clone()).collect();

    if output.is_human() {
        output.debug(&format!("Wrote catalog {}", site.catalog.display()))?;
        for page in &site.pages {
            output.debug(&format!("Wrote {}", page.display()))?;
        }
        output.success(&format!(
            "✅ Generated documentation for {} schemas",
            site.pages.len()
        ))?;
        output.step(&format!("📁 Documentation saved to {}", out_dir.display()))?;
    } else {
        output.data(&DocsReport {
            output_dir: out_dir,
            catalog: site.catalog,
            pages: site.pages,
            skipped,
        })?;
    }

    if !skipped_paths.is_empty() {
        return Err(Error::DocumentationFailed {
            skipped: skipped_paths,
        });
    }
    Ok(())
}
