//! Category-grouped index of every documented schema
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use crate::document::{Category, SchemaDocument};
use crate::documentation::renderer::page_path;
use crate::documentation::templates::NO_DESCRIPTION_AVAILABLE;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Catalog page settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Page heading
    pub title: String,
    /// Characters of each description shown next to its entry
    pub summary_length: usize,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            title: "Ontology Reference".to_string(),
            summary_length: 100,
        }
    }
}

/// Build the catalog page for `documents`.
///
/// Categories are listed by name, entries within a category by path.
pub fn build_catalog(documents: &[SchemaDocument], options: &CatalogOptions) -> String {
    let mut by_category: BTreeMap<&Category, Vec<&SchemaDocument>> = BTreeMap::new();
    for document in documents {
        by_category.entry(&document.category).or_default().push(document);
    }

    let mut doc = format!(
        "# {}\n\nThis document provides a complete reference for all schemas.\n\n## Schema Categories\n\n",
        options.title
    );

    for (category, mut entries) in by_category {
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        let _ = write!(
            doc,
            "### {}\n\n**{} schemas**\n\n",
            category.display_name(),
            entries.len()
        );
        for entry in entries {
            let description = entry.description().unwrap_or(NO_DESCRIPTION_AVAILABLE);
            let _ = writeln!(
                doc,
                "- **[{}](./{})** - {}",
                entry.title(),
                page_path(entry).to_string_lossy(),
                summarize(description, options.summary_length)
            );
        }
        doc.push('\n');
    }

    let _ = write!(doc, "## Total Schemas: {}\n\n", documents.len());
    doc
}

/// First `limit` characters of `text` on one line, with `...` when cut short
pub fn summarize(text: &str, limit: usize) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match line.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line,
    }
}
