//! Reference resolution for `$ref` pointers
//!
//! This module handles:
//! - Same-document fragment references (`#/definitions/Money`)
//! - Cross-document references relative to the referencing file
//! - `$id`-style references under a configured identifier base
//! - Chains of references and cycle detection
//!
//! Copyright (c) 2025 Ontoref Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::SchemaParser;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Default bound on how deep the validator may descend through references
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A parsed `$ref` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `#/path/into/the/same/document`
    Fragment { pointer: String },
    /// `other.schema.yaml` or `other.schema.yaml#/path`
    External { target: String, pointer: String },
}

impl Reference {
    /// Split a raw reference into its file and fragment parts
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('#') {
            Some(("", pointer)) => Reference::Fragment {
                pointer: pointer.to_string(),
            },
            Some((target, pointer)) => Reference::External {
                target: target.to_string(),
                pointer: pointer.to_string(),
            },
            None => Reference::External {
                target: raw.to_string(),
                pointer: String::new(),
            },
        }
    }

    /// JSON pointer applied once the target document is loaded
    pub fn pointer(&self) -> &str {
        match self {
            Reference::Fragment { pointer } | Reference::External { pointer, .. } => pointer,
        }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, Reference::Fragment { .. })
    }
}

/// A location in the reference graph: a file plus a pointer inside it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionKey {
    pub file: PathBuf,
    pub pointer: String,
}

impl ResolutionKey {
    pub fn new(file: PathBuf, pointer: impl Into<String>) -> Self {
        Self {
            file,
            pointer: pointer.into(),
        }
    }

    /// Key for the root of a document
    pub fn root(file: &Path) -> Self {
        Self::new(canonical_or_given(file), "")
    }
}

impl fmt::Display for ResolutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.file.display(), self.pointer)
    }
}

/// The located target of a reference
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTarget {
    /// Where the target lives
    pub key: ResolutionKey,
    /// A copy of the referenced subtree
    pub value: Value,
}

/// Resolution state for one walk over a document
#[derive(Debug, Clone)]
pub struct ResolverContext {
    /// Locations currently being descended into, outermost first
    pub resolution_stack: Vec<ResolutionKey>,
    /// Maximum nesting of references before giving up
    pub max_depth: usize,
}

impl ResolverContext {
    /// Create a context rooted at the document being processed
    pub fn new(origin: &Path) -> Self {
        Self {
            resolution_stack: vec![ResolutionKey::root(origin)],
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// The file whose fragments `#/...` references currently resolve against
    pub fn current_file(&self) -> &Path {
        self.resolution_stack
            .last()
            .map(|key| key.file.as_path())
            .unwrap_or_else(|| Path::new(""))
    }

    /// Enter a resolved location, failing if it is already being visited
    pub fn push(&mut self, key: ResolutionKey) -> LoaderResult<()> {
        if self.resolution_stack.contains(&key) || self.resolution_stack.len() >= self.max_depth {
            let chain = self.resolution_stack.iter().chain(std::iter::once(&key));
            return Err(LoaderError::cyclic_reference(chain));
        }

        self.resolution_stack.push(key);
        Ok(())
    }

    /// Leave the innermost location
    pub fn pop(&mut self) -> Option<ResolutionKey> {
        // The origin document stays on the stack
        if self.resolution_stack.len() > 1 {
            self.resolution_stack.pop()
        } else {
            None
        }
    }
}

/// Reference resolver with a per-run document cache
#[derive(Debug, Default)]
pub struct ReferenceResolver {
    parser: SchemaParser,
    cache: HashMap<PathBuf, Value>,
    /// Identifier base URI and the directory it maps onto
    id_base: Option<(String, PathBuf)>,
}

impl ReferenceResolver {
    /// Create a new reference resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Map references starting with `base` (e.g. `https://cfdl.dev/ontology/`)
    /// onto files beneath `root`
    pub fn with_id_base(mut self, base: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        self.id_base = Some((base.into(), root.into()));
        self
    }

    /// Seed the cache with an already parsed document
    pub fn insert_document(&mut self, path: &Path, root: &Value) {
        self.cache.insert(canonical_or_given(path), root.clone());
    }

    /// Resolve `raw` from the context's current file, following chains of
    /// references until a non-reference node is reached
    pub fn resolve(&mut self, raw: &str, context: &ResolverContext) -> LoaderResult<ResolvedTarget> {
        let mut origin = context.current_file().to_path_buf();
        let mut current = raw.to_string();
        let mut chain: Vec<ResolutionKey> = Vec::new();

        loop {
            let reference = Reference::parse(&current);
            let file = match &reference {
                Reference::Fragment { .. } => origin.clone(),
                Reference::External { target, .. } => self.locate(target, &current, &origin)?,
            };
            let key = ResolutionKey::new(file, reference.pointer());

            if chain.contains(&key) {
                chain.push(key);
                return Err(LoaderError::cyclic_reference(&chain));
            }
            chain.push(key.clone());
            trace!(reference = %current, target = %key, "following reference");

            let target = {
                let document = self.load_document(&key.file, &current, &origin)?;
                apply_json_pointer(document, &key.pointer, &current, &origin)?.clone()
            };

            match target.get("$ref").and_then(Value::as_str) {
                Some(next) => {
                    origin = key.file.clone();
                    current = next.to_string();
                }
                None => {
                    debug!(reference = raw, target = %key, hops = chain.len(), "reference resolved");
                    return Ok(ResolvedTarget { key, value: target });
                }
            }
        }
    }

    /// Number of documents held in the cache
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Find the file an external reference points at
    fn locate(&self, target: &str, reference: &str, origin: &Path) -> LoaderResult<PathBuf> {
        let candidate = match &self.id_base {
            Some((base, root)) if target.starts_with(base.as_str()) => {
                root.join(&target[base.len()..])
            }
            _ if target.contains("://") => {
                return Err(LoaderError::unresolved(
                    reference,
                    origin,
                    "remote references are not supported",
                ));
            }
            _ => origin
                .parent()
                .map(|dir| dir.join(target))
                .unwrap_or_else(|| PathBuf::from(target)),
        };

        candidate.canonicalize().map_err(|e| {
            LoaderError::unresolved(
                reference,
                origin,
                format!("cannot open '{}': {}", candidate.display(), e),
            )
        })
    }

    /// Load a referenced file through the cache
    fn load_document(&mut self, file: &Path, reference: &str, origin: &Path) -> LoaderResult<&Value> {
        if !self.cache.contains_key(file) {
            let document = self.parser.parse_file(file).map_err(|e| {
                LoaderError::unresolved(reference, origin, format!("target could not be loaded: {e}"))
            })?;
            self.cache.insert(file.to_path_buf(), document);
        }

        self.cache
            .get(file)
            .ok_or_else(|| LoaderError::unresolved(reference, origin, "target not cached"))
    }
}

/// Walk a JSON pointer (`/a/b/0`) into `document`
pub fn apply_json_pointer<'a>(
    document: &'a Value,
    pointer: &str,
    reference: &str,
    source_path: &Path,
) -> LoaderResult<&'a Value> {
    if pointer.is_empty() {
        return Ok(document);
    }

    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(LoaderError::unresolved(
            reference,
            source_path,
            format!("fragment '{pointer}' must start with '/'"),
        ));
    };

    let mut current = document;
    for segment in rest.split('/') {
        let decoded = segment.replace("~1", "/").replace("~0", "~");

        current = match current {
            Value::Object(obj) => obj.get(&decoded).ok_or_else(|| {
                LoaderError::unresolved(reference, source_path, format!("property '{decoded}' not found"))
            })?,
            Value::Array(arr) => decoded
                .parse::<usize>()
                .ok()
                .and_then(|index| arr.get(index))
                .ok_or_else(|| {
                    LoaderError::unresolved(reference, source_path, format!("invalid array index '{decoded}'"))
                })?,
            _ => {
                return Err(LoaderError::unresolved(
                    reference,
                    source_path,
                    format!("cannot access '{decoded}' on a scalar"),
                ));
            }
        };
    }

    Ok(current)
}

fn canonical_or_given(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
