//! Schema documentation generation
//!
//! This module turns schema documents into Markdown reference pages, one per
//! document, plus a catalog page grouping every document by category.
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

pub mod catalog;
pub mod describe;
pub mod renderer;
pub mod templates;

pub use catalog::{build_catalog, summarize, CatalogOptions};
pub use describe::type_label;
pub use renderer::{page_path, DocumentRenderer, RenderedPage};
pub use templates::Template;

use crate::document::SchemaDocument;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default name of the catalog page
pub const DEFAULT_CATALOG_FILE: &str = "ontology-reference.md";

/// Failure to persist generated documentation
#[derive(Debug, Error)]
pub enum DocumentationError {
    #[error("Cannot create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Two or more documents share a category and a file stem
    #[error("Documents {} would all be written to '{page}'", display_paths(.sources))]
    PageCollision { page: PathBuf, sources: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!("'{}'", path.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Settings for a full documentation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    /// File name of the catalog page inside the output directory
    pub catalog_file: String,
    pub catalog: CatalogOptions,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            catalog: CatalogOptions::default(),
        }
    }
}

/// Files written by [`write_site`], in write order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteReport {
    pub pages: Vec<PathBuf>,
    pub catalog: PathBuf,
}

/// Render every document and the catalog into `out_dir`.
///
/// Nothing is written when two documents map to the same page.
pub fn write_site(
    documents: &[SchemaDocument],
    out_dir: &Path,
    options: &SiteOptions,
) -> Result<SiteReport, DocumentationError> {
    let renderer = DocumentRenderer::new();
    let rendered: Vec<_> = documents
        .iter()
        .map(|document| (document, renderer.render_page(document)))
        .collect();
    check_collisions(&rendered)?;

    let catalog = out_dir.join(&options.catalog_file);
    write_file(&catalog, &build_catalog(documents, &options.catalog))?;

    let mut pages = Vec::with_capacity(rendered.len());
    for (document, page) in rendered {
        let target = out_dir.join(&page.relative_path);
        write_file(&target, &page.content)?;
        debug!(source = %document.path.display(), target = %target.display(), "page written");
        pages.push(target);
    }

    Ok(SiteReport { pages, catalog })
}

/// Fail on the first page claimed by more than one document
fn check_collisions(rendered: &[(&SchemaDocument, RenderedPage)]) -> Result<(), DocumentationError> {
    let mut claims: BTreeMap<&Path, Vec<PathBuf>> = BTreeMap::new();
    for (document, page) in rendered {
        claims
            .entry(page.relative_path.as_path())
            .or_default()
            .push(document.path.clone());
    }

    match claims.into_iter().find(|(_, sources)| sources.len() > 1) {
        Some((page, sources)) => Err(DocumentationError::PageCollision {
            page: page.to_path_buf(),
            sources,
        }),
        None => Ok(()),
    }
}

/// Write `content` to `path`, creating parent directories as needed
fn write_file(path: &Path, content: &str) -> Result<(), DocumentationError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| DocumentationError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| DocumentationError::Write {
        path: path.to_path_buf(),
        source,
    })
}
