//! Recursive decomposition of sampled JSON documents

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::config::InferenceConfig;
use super::error::InferenceError;
use super::registry::TypeRegistry;
use super::schema::{self, ComponentsDocument};
use super::types::{PrimitiveKind, Shape, TypeDescriptor, value_type_name};
use super::unify::resolve_or_register;
use crate::import::SourceDocument;

/// Type inference engine.
///
/// Walks sampled JSON values top-down, building a [`Shape`] per object
/// level and unifying every discovered shape into the registry. Documents
/// are fed one at a time; later documents widen or fork entries created by
/// earlier ones, so feeding order must be deterministic for reproducible
/// output.
pub struct StructInferrer {
    config: InferenceConfig,
    registry: TypeRegistry,
}

impl StructInferrer {
    /// Create an inferrer with default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create an inferrer with custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self {
            config,
            registry: TypeRegistry::new(),
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// The registry built so far
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Decompose every sample of a loaded document under the document's
    /// file-derived type name.
    pub fn add_document(&mut self, document: &SourceDocument) -> Result<(), InferenceError> {
        for sample in &document.samples {
            self.add_sample(&document.id, &document.name, sample)?;
        }
        Ok(())
    }

    /// Decompose one sampled root value under the given type name.
    ///
    /// String and array samples (the wrapped bare-scalar case and nested
    /// sample lists) carry no structure and contribute nothing to the
    /// registry; raw numbers, booleans and nulls do not fit any supported
    /// shape and are rejected.
    pub fn add_sample(
        &mut self,
        source_id: &str,
        name: &str,
        sample: &Value,
    ) -> Result<(), InferenceError> {
        match sample {
            Value::Object(fields) => {
                let root_scope = self.config.root_scope.clone();
                let key = self.decompose_object(fields, name, &root_scope, source_id)?;
                debug!(source = source_id, key = %key, "sample decomposed");
                Ok(())
            }
            Value::String(_) | Value::Array(_) => {
                warn!(
                    source = source_id,
                    found = value_type_name(sample),
                    "skipping structureless sample"
                );
                Ok(())
            }
            other => Err(InferenceError::UnsupportedShape {
                field: name.to_string(),
                found: value_type_name(other).to_string(),
                source_file: source_id.to_string(),
            }),
        }
    }

    /// Register every object component of a declarative schema set.
    ///
    /// Component shapes are inserted directly under their component names;
    /// a component map cannot contain duplicate names, so no unification
    /// pass runs. References between components stay unresolved until
    /// [`StructInferrer::finalize`] checks them.
    pub fn add_components(
        &mut self,
        source_id: &str,
        document: &ComponentsDocument,
    ) -> Result<(), InferenceError> {
        for (name, component) in &document.components.schemas {
            let Some(shape) = schema::component_shape(name, component, source_id)? else {
                continue;
            };
            self.registry.put(name.clone(), shape);
            self.registry.record_provenance(name, source_id);
            self.registry.record_description(name, &component.description);
        }
        Ok(())
    }

    /// Run the closed-world post-condition check and hand the registry to
    /// the caller. Every named reference and multi-variant member must
    /// resolve to a registered key.
    pub fn finalize(self) -> Result<TypeRegistry, InferenceError> {
        self.registry.verify_references()?;
        Ok(self.registry)
    }

    fn decompose_object(
        &mut self,
        fields: &Map<String, Value>,
        local_name: &str,
        parent_scope: &str,
        source: &str,
    ) -> Result<String, InferenceError> {
        let mut shape = Shape::new();
        for (field_name, value) in fields {
            let descriptor = self.decompose_value(value, field_name, local_name, source)?;
            shape.insert(field_name.clone(), descriptor);
        }

        let key = resolve_or_register(
            local_name,
            parent_scope,
            shape,
            &mut self.registry,
            &self.config,
        );
        self.registry.record_provenance(&key, source);
        Ok(key)
    }

    fn decompose_value(
        &mut self,
        value: &Value,
        field_name: &str,
        enclosing: &str,
        source: &str,
    ) -> Result<TypeDescriptor, InferenceError> {
        let descriptor = match value {
            Value::Object(fields) => {
                let key = self.decompose_object(fields, field_name, enclosing, source)?;
                TypeDescriptor::named(key)
            }
            Value::Array(items) => self.decompose_array(items, field_name, enclosing, source)?,
            Value::Null => TypeDescriptor::unknown(),
            scalar => PrimitiveKind::of_value(scalar)
                .map(TypeDescriptor::primitive)
                .unwrap_or_else(TypeDescriptor::unknown),
        };
        Ok(descriptor.with_origin(source))
    }

    fn decompose_array(
        &mut self,
        items: &[Value],
        field_name: &str,
        enclosing: &str,
        source: &str,
    ) -> Result<TypeDescriptor, InferenceError> {
        // Only the first element is sampled; later elements never widen
        // the element shape.
        let Some(first) = items.first() else {
            return Ok(TypeDescriptor::unknown().into_array());
        };
        match first {
            Value::Object(fields) => {
                let key = self.decompose_object(fields, field_name, enclosing, source)?;
                Ok(TypeDescriptor::named(key).into_array())
            }
            Value::Array(_) => Err(InferenceError::NestedArray {
                field: field_name.to_string(),
                source_file: source.to_string(),
            }),
            Value::Null => Ok(TypeDescriptor::unknown().into_array()),
            scalar => Ok(PrimitiveKind::of_value(scalar)
                .map(TypeDescriptor::primitive)
                .unwrap_or_else(TypeDescriptor::unknown)
                .into_array()),
        }
    }
}

impl Default for StructInferrer {
    fn default() -> Self {
        Self::new()
    }
}
