//! End-to-end documentation generation tests
//!
//! Schema files are written to a temporary ontology, loaded, and rendered to a
//! temporary output directory; the resulting Markdown is compared verbatim.

use ontoref_schemas::{
    discover_schemas, write_site, CatalogOptions, DocumentationError, SchemaDocument, SiteOptions,
    DEFAULT_SUFFIX,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const WATERFALL: &str = r#"
$id: https://cfdl.dev/ontology/waterfall/waterfall.schema.yaml
title: Waterfall
description: Ordered distribution of cash flows across tiers.
type: object
properties:
  tiers:
    type: array
    description: Distribution tiers in priority order
    items:
      $ref: '#/definitions/Tier'
  basis:
    enum: [cash, accrual]
  hurdle:
    type: number
required: [tiers]
examples:
  - tiers: []
    basis: cash
"#;

const TIER: &str = r#"
title: Tier
description: A single distribution step.
pattern: '^T[0-9]+$'
"#;

const PARTY: &str = r#"
title: Party
properties:
  name:
    type: string
"#;

fn ontology() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (relative, content) in [
        ("waterfall/waterfall.schema.yaml", WATERFALL),
        ("waterfall/tier.schema.yaml", TIER),
        ("entity/party.schema.yaml", PARTY),
    ] {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn load_all(root: &Path) -> Vec<SchemaDocument> {
    discover_schemas(root, DEFAULT_SUFFIX)
        .unwrap()
        .iter()
        .map(|path| SchemaDocument::load(path, root).unwrap())
        .collect()
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_document_page() {
    let input = ontology();
    let out = tempfile::tempdir().unwrap();
    let root_name = input.path().file_name().unwrap().to_string_lossy().into_owned();

    write_site(&load_all(input.path()), out.path(), &SiteOptions::default()).unwrap();

    let expected = format!(
        "# Waterfall\n\n\
         **Category**: Waterfall\n\n\
         **Schema File**: `{root_name}/waterfall/waterfall.schema.yaml`\n\n\
         ## Description\n\nOrdered distribution of cash flows across tiers.\n\n\
         **Schema ID**: `https://cfdl.dev/ontology/waterfall/waterfall.schema.yaml`\n\n\
         ## Properties\n\n\
         | Property | Type | Required | Description |\n\
         |----------|------|----------|-------------|\n\
         | `tiers` | Array of Reference: definitions/Tier | ✅ | Distribution tiers in priority order |\n\
         | `basis` | Enum: cash, accrual | ❌ | No description |\n\
         | `hurdle` | Number | ❌ | No description |\n\
         \n\n\
         ## Examples\n\n\
         ### Example 1\n\n```yaml\ntiers: []\nbasis: cash\n```\n\n"
    );
    assert_eq!(read(out.path().join("waterfall/waterfall.schema.md")), expected);
}

#[test]
fn test_constraint_only_page() {
    let input = ontology();
    let out = tempfile::tempdir().unwrap();
    write_site(&load_all(input.path()), out.path(), &SiteOptions::default()).unwrap();

    let page = read(out.path().join("waterfall/tier.schema.md"));
    assert!(page.ends_with("## Constraints\n\n- Pattern: `^T[0-9]+$`\n\n"), "{page}");
    assert!(!page.contains("## Properties"));
    assert_eq!(page.matches("- ").count(), 1);
}

#[test]
fn test_catalog_page() {
    let input = ontology();
    let out = tempfile::tempdir().unwrap();
    let options = SiteOptions {
        catalog_file: "index.md".to_string(),
        catalog: CatalogOptions {
            title: "CFDL Ontology Reference".to_string(),
            summary_length: 20,
        },
    };

    let report = write_site(&load_all(input.path()), out.path(), &options).unwrap();
    assert_eq!(report.pages.len(), 3);

    assert_eq!(
        read(report.catalog),
        "# CFDL Ontology Reference\n\n\
         This document provides a complete reference for all schemas.\n\n\
         ## Schema Categories\n\n\
         ### Entity\n\n**1 schemas**\n\n\
         - **[Party](./entity/party.schema.md)** - No description avail...\n\n\
         ### Waterfall\n\n**2 schemas**\n\n\
         - **[Tier](./waterfall/tier.schema.md)** - A single distributio...\n\
         - **[Waterfall](./waterfall/waterfall.schema.md)** - Ordered distribution...\n\n\
         ## Total Schemas: 3\n\n"
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let input = ontology();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let a = write_site(&load_all(input.path()), first.path(), &SiteOptions::default()).unwrap();
    let b = write_site(&load_all(input.path()), second.path(), &SiteOptions::default()).unwrap();

    let relative = |report: &ontoref_schemas::SiteReport, base: &Path| -> Vec<PathBuf> {
        report.pages.iter().map(|p| p.strip_prefix(base).unwrap().to_path_buf()).collect()
    };
    assert_eq!(relative(&a, first.path()), relative(&b, second.path()));

    for page in relative(&a, first.path()) {
        assert_eq!(read(first.path().join(&page)), read(second.path().join(&page)));
    }
    assert_eq!(read(a.catalog), read(b.catalog));
}

#[test]
fn test_same_category_and_stem_is_rejected() {
    let input = tempfile::tempdir().unwrap();
    for (relative, title) in [
        ("fund-a/common/money.schema.yaml", "Money A"),
        ("fund-b/common/money.schema.yaml", "Money B"),
    ] {
        let path = input.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("title: {title}\n")).unwrap();
    }
    let out = tempfile::tempdir().unwrap();

    let err = write_site(&load_all(input.path()), out.path(), &SiteOptions::default()).unwrap_err();
    match err {
        DocumentationError::PageCollision { page, sources } => {
            assert_eq!(page, PathBuf::from("common/money.schema.md"));
            assert_eq!(sources.len(), 2);
            assert!(sources[0].ends_with("fund-a/common/money.schema.yaml"));
            assert!(sources[1].ends_with("fund-b/common/money.schema.yaml"));
        }
        other => panic!("expected PageCollision, got {other:?}"),
    }
    assert!(!out.path().join("common").exists());
    assert!(!out.path().join("ontology-reference.md").exists());
}
