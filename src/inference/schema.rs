//! Decomposition of declarative OpenAPI component schemas
//!
//! Walks the explicit `type` enumeration of each component plus `$ref`,
//! `oneOf`/`anyOf`/`allOf` and `additionalProperties`, producing the same
//! descriptor variants as the sampled-JSON path. Only `$ref` members are
//! supported inside composite lists.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use super::error::InferenceError;
use super::types::{DescriptorKind, EMBEDDED_FIELD, PrimitiveKind, Shape, TypeDescriptor};

/// Explicit type enumeration of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// A node that only references another component
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefOnly {
    /// Reference target, e.g. `#/components/schemas/User`
    #[serde(rename = "$ref", default)]
    pub reference: String,
}

/// oneOf/anyOf/allOf composite lists
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeRefs {
    #[serde(default)]
    pub all_of: Vec<RefOnly>,
    #[serde(default)]
    pub any_of: Vec<RefOnly>,
    #[serde(default)]
    pub one_of: Vec<RefOnly>,
}

impl CompositeRefs {
    /// The first non-empty composite list, checked in allOf, oneOf,
    /// anyOf order
    pub fn members(&self) -> Option<&[RefOnly]> {
        [&self.all_of, &self.one_of, &self.any_of]
            .into_iter()
            .find(|list| !list.is_empty())
            .map(Vec::as_slice)
    }
}

/// A property node of a component schema
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProperty {
    /// Explicit schema type, absent for pure refs and composites
    #[serde(rename = "type", default)]
    pub schema_type: Option<SchemaType>,
    /// Reference to another component
    #[serde(rename = "$ref", default)]
    pub reference: String,
    /// Free-text description carried through to the descriptor
    #[serde(default)]
    pub description: String,
    /// Element schema for `array` nodes
    #[serde(default)]
    pub items: Option<Box<SchemaProperty>>,
    /// Element schema for map-like objects
    #[serde(default)]
    pub additional_properties: Option<Box<SchemaProperty>>,
    #[serde(flatten)]
    pub composite: CompositeRefs,
}

/// One component schema
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSchema {
    #[serde(rename = "type", default)]
    pub schema_type: Option<SchemaType>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,
    #[serde(flatten)]
    pub composite: CompositeRefs,
}

/// The `components.schemas` subset of an OpenAPI document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentsDocument {
    #[serde(default)]
    pub components: Components,
}

/// Component container
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, ComponentSchema>,
}

/// Last path segment of a `$ref` target
pub fn type_from_ref(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Build the shape for one component, or `None` when the component carries
/// no object structure (bare primitive components are skipped).
pub(crate) fn component_shape(
    name: &str,
    component: &ComponentSchema,
    source: &str,
) -> Result<Option<Shape>, InferenceError> {
    if let Some(members) = component.composite.members() {
        let mut shape = Shape::new();
        shape.insert(
            EMBEDDED_FIELD,
            multi_descriptor(members)
                .with_description(Some(component.description.clone()))
                .with_origin(source),
        );
        return Ok(Some(shape));
    }

    if component.schema_type != Some(SchemaType::Object) {
        warn!(
            component = name,
            kind = ?component.schema_type,
            "skipping component without object structure"
        );
        return Ok(None);
    }

    let mut shape = Shape::new();
    for (field, property) in &component.properties {
        let descriptor = resolve_property(property, field, source)?.with_origin(source);
        shape.insert(field.clone(), descriptor);
    }
    Ok(Some(shape))
}

fn multi_descriptor(members: &[RefOnly]) -> TypeDescriptor {
    let names = members
        .iter()
        .map(|m| type_from_ref(&m.reference).to_string())
        .collect();
    TypeDescriptor::new(DescriptorKind::Multi(names))
}

fn resolve_property(
    property: &SchemaProperty,
    field: &str,
    source: &str,
) -> Result<TypeDescriptor, InferenceError> {
    let description = Some(property.description.clone());
    let descriptor = match property.schema_type {
        Some(SchemaType::Boolean) => TypeDescriptor::primitive(PrimitiveKind::Boolean),
        Some(SchemaType::Integer) => TypeDescriptor::primitive(PrimitiveKind::Integer),
        Some(SchemaType::Number) => TypeDescriptor::primitive(PrimitiveKind::Float),
        Some(SchemaType::String) => TypeDescriptor::primitive(PrimitiveKind::String),
        Some(SchemaType::Array) => return resolve_array(property, field, source),
        Some(SchemaType::Object) => {
            if let Some(members) = property.composite.members() {
                multi_descriptor(members)
            } else if let Some(element) = &property.additional_properties {
                let element = resolve_property(element, field, source)?;
                // an array element stays an array inside the map
                let element_kind = if element.is_array {
                    DescriptorKind::Array(Box::new(element.kind))
                } else {
                    element.kind
                };
                TypeDescriptor::new(DescriptorKind::Map(Box::new(element_kind)))
            } else if !property.reference.is_empty() {
                TypeDescriptor::named(type_from_ref(&property.reference))
            } else {
                TypeDescriptor::unknown()
            }
        }
        // no explicit type: pure refs and composites
        None => {
            if let Some(members) = property.composite.members() {
                multi_descriptor(members)
            } else if !property.reference.is_empty() {
                TypeDescriptor::named(type_from_ref(&property.reference))
            } else {
                TypeDescriptor::unknown()
            }
        }
    };
    Ok(descriptor.with_description(description))
}

fn resolve_array(
    property: &SchemaProperty,
    field: &str,
    source: &str,
) -> Result<TypeDescriptor, InferenceError> {
    let description = Some(property.description.clone());
    let Some(items) = &property.items else {
        return Ok(TypeDescriptor::unknown()
            .with_description(description)
            .into_array());
    };
    if items.schema_type == Some(SchemaType::Array) {
        return Err(InferenceError::NestedArray {
            field: field.to_string(),
            source_file: source.to_string(),
        });
    }
    if !items.reference.is_empty() {
        return Ok(TypeDescriptor::named(type_from_ref(&items.reference))
            .with_description(description)
            .into_array());
    }
    if let Some(members) = items.composite.members() {
        return Ok(multi_descriptor(members)
            .with_description(description)
            .into_array());
    }
    // typed items carry their own description
    let element = resolve_property(items, field, source)?;
    Ok(element.into_array())
}
