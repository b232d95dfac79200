//! Discovery of schema files beneath an input directory
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Suffix that marks a file as a schema document
pub const DEFAULT_SUFFIX: &str = ".schema.yaml";

/// The input root could not be enumerated
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Input directory '{path}' does not exist")]
    NotFound { path: PathBuf },

    #[error("Input path '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read input directory '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Find every file under `root` whose name ends with `suffix`, sorted by path
pub fn discover_schemas(root: &Path, suffix: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::NotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut schemas = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            // Only the root itself failing is fatal
            Err(e) if e.depth() == 0 => {
                return Err(DiscoveryError::Unreadable {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(suffix));
        if entry.file_type().is_file() && matches {
            schemas.push(entry.into_path());
        }
    }

    schemas.sort();
    debug!(root = %root.display(), count = schemas.len(), "discovered schema files");
    Ok(schemas)
}
