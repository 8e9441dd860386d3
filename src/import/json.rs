//! Sampled JSON document loading

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use super::ImportError;
use crate::inference::value_type_name;

/// A fully decoded source document
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Source identifier, usually the file path as given
    pub id: String,
    /// File-derived raw type name: the base name up to the first dot
    pub name: String,
    /// Sampled root values. Bare objects and strings are wrapped into a
    /// one-element list; arrays contribute one sample per element.
    pub samples: Vec<Value>,
}

/// Expand source patterns into a sorted list of paths.
///
/// Patterns that do not compile as globs are kept verbatim as literal
/// paths. The combined list is sorted lexicographically so processing
/// order is deterministic regardless of pattern order.
pub fn expand_sources(patterns: &[String]) -> Vec<PathBuf> {
    let mut expanded = Vec::new();
    for pattern in patterns {
        match glob::glob(pattern) {
            Ok(paths) => {
                for entry in paths {
                    match entry {
                        Ok(path) => {
                            debug!(path = %path.display(), "found source file");
                            expanded.push(path);
                        }
                        Err(e) => {
                            warn!(pattern = %pattern, error = %e, "skipping unreadable path");
                        }
                    }
                }
            }
            Err(_) => expanded.push(PathBuf::from(pattern)),
        }
    }
    expanded.sort();
    expanded
}

/// Load and classify one source document.
///
/// Top-level raw numbers, booleans and nulls carry neither structure nor a
/// wrappable sample and are rejected.
pub fn load_document(path: &Path) -> Result<SourceDocument, ImportError> {
    let id = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: id.clone(),
        message: e.to_string(),
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|e| ImportError::Decode {
        path: id.clone(),
        message: e.to_string(),
    })?;

    let samples = match value {
        Value::Object(_) | Value::String(_) => vec![value],
        Value::Array(items) => items,
        other => {
            return Err(ImportError::UnsupportedDocument {
                path: id,
                found: value_type_name(&other).to_string(),
            });
        }
    };

    Ok(SourceDocument {
        name: type_name_for(path),
        id,
        samples,
    })
}

/// Expand, load and classify every source pattern, in sorted path order
pub fn load_documents(patterns: &[String]) -> Result<Vec<SourceDocument>, ImportError> {
    expand_sources(patterns)
        .iter()
        .map(|path| load_document(path))
        .collect()
}

fn type_name_for(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.split('.').next().unwrap_or_default().to_string()
}
