//! Registry of canonical type names and their shapes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::InferenceError;
use super::types::{DescriptorKind, Shape};

/// Provenance reported for entries that never recorded a source
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Mutable store of canonical name to shape, plus per-name provenance and
/// free-text descriptions.
///
/// The registry is the single owner of every shape; all other components
/// refer to entries by name. Entries are never deleted, only widened.
/// Keys are held sorted, so iteration order is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRegistry {
    shapes: BTreeMap<String, Shape>,
    provenance: BTreeMap<String, String>,
    descriptions: BTreeMap<String, String>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a shape by canonical name
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    /// Mutable access to a shape, for widening
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Shape> {
        self.shapes.get_mut(name)
    }

    /// Whether a canonical name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// Insert or replace a shape under a canonical name
    pub fn put(&mut self, name: impl Into<String>, shape: Shape) {
        self.shapes.insert(name.into(), shape);
    }

    /// Canonical names in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    /// Iterate entries in sorted name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Shape)> {
        self.shapes.iter()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Record the originating source for a name. Later recordings win, so
    /// provenance points at the most recent document that touched a type.
    pub fn record_provenance(&mut self, name: &str, source: &str) {
        self.provenance
            .insert(name.to_string(), source.to_string());
    }

    /// Originating source recorded for a name, or [`UNKNOWN_SOURCE`]
    pub fn provenance(&self, name: &str) -> &str {
        self.provenance
            .get(name)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_SOURCE)
    }

    /// Record a free-text description for a name. Empty text is ignored.
    pub fn record_description(&mut self, name: &str, text: &str) {
        if !text.is_empty() {
            self.descriptions.insert(name.to_string(), text.to_string());
        }
    }

    /// Description recorded for a name, if any
    pub fn description(&self, name: &str) -> Option<&str> {
        self.descriptions.get(name).map(String::as_str)
    }

    /// Verify the closed-world reference invariant: every named reference
    /// and every multi-variant member in the registry must resolve to a
    /// registered key.
    pub fn verify_references(&self) -> Result<(), InferenceError> {
        for (owner, shape) in &self.shapes {
            for (_, descriptor) in shape.iter() {
                self.verify_kind(&descriptor.kind, owner)?;
            }
        }
        Ok(())
    }

    fn verify_kind(&self, kind: &DescriptorKind, owner: &str) -> Result<(), InferenceError> {
        match kind {
            DescriptorKind::Named(name) => {
                if !self.contains(name) {
                    return Err(InferenceError::UnresolvedReference {
                        name: name.clone(),
                        owner: owner.to_string(),
                    });
                }
                Ok(())
            }
            DescriptorKind::Multi(names) => {
                for name in names {
                    if !self.contains(name) {
                        return Err(InferenceError::UnresolvedReference {
                            name: name.clone(),
                            owner: owner.to_string(),
                        });
                    }
                }
                Ok(())
            }
            DescriptorKind::Array(inner) | DescriptorKind::Map(inner) => {
                self.verify_kind(inner, owner)
            }
            DescriptorKind::Primitive(_) | DescriptorKind::Unknown => Ok(()),
        }
    }
}
