//! Per-document Markdown pages
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use crate::document::SchemaDocument;
use crate::documentation::templates::Template;
use std::path::PathBuf;

/// A rendered page and where it belongs in the output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// `<category>/<stem>.md`, relative to the output directory
    pub relative_path: PathBuf,
    pub content: String,
}

/// Composes a schema document into a Markdown reference page
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer;

impl DocumentRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the page and pair it with its output location
    pub fn render_page(&self, document: &SchemaDocument) -> RenderedPage {
        RenderedPage {
            relative_path: page_path(document),
            content: self.render(document),
        }
    }

    /// Render the Markdown for one document
    pub fn render(&self, document: &SchemaDocument) -> String {
        let mut doc = Template::header(
            document.title(),
            &document.category.display_name(),
            &document.display_path.to_string_lossy(),
        );
        doc.push_str(&Template::description(document.description()));

        if let Some(id) = document.id() {
            doc.push_str(&Template::schema_id(id));
        }

        if let Some(properties) = document.properties() {
            doc.push_str(&Template::properties(&properties));
        }

        if let Some(examples) = document.examples() {
            doc.push_str(&Template::examples(examples));
        }

        doc.push_str(&Template::constraints(&document.constraints()));
        doc
    }
}

/// Output location of a document's page, relative to the output directory
pub fn page_path(document: &SchemaDocument) -> PathBuf {
    PathBuf::from(document.category.name()).join(format!("{}.md", document.stem()))
}
