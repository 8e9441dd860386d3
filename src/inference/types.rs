//! Type descriptors and shapes produced by inference

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive scalar kind of a sampled value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveKind {
    /// String values
    String,
    /// Whole numbers (no fractional part in the literal)
    Integer,
    /// Floating point numbers
    Float,
    /// Boolean values
    Boolean,
}

impl PrimitiveKind {
    /// Classify a scalar JSON value.
    ///
    /// Numbers that decode as `i64`/`u64` (no fractional part in the
    /// literal) are `Integer`, all other numbers `Float`. Returns `None`
    /// for null, arrays and objects.
    pub fn of_value(value: &Value) -> Option<PrimitiveKind> {
        match value {
            Value::Bool(_) => Some(PrimitiveKind::Boolean),
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Some(PrimitiveKind::Integer)
                } else {
                    Some(PrimitiveKind::Float)
                }
            }
            Value::String(_) => Some(PrimitiveKind::String),
            _ => None,
        }
    }

    /// Name of the kind, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Boolean => "boolean",
        }
    }
}

/// Structural kind of an inferred field type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DescriptorKind {
    /// A primitive scalar
    Primitive(PrimitiveKind),
    /// An array of a primitive or named element. Deeper array nesting is
    /// an unsupported input shape and never constructed.
    Array(Box<DescriptorKind>),
    /// Reference to a registry entry by canonical name. The registry is
    /// the single owner of the shape; this holds it by name only.
    Named(String),
    /// One of several referenced types (oneOf/anyOf/allOf). A structural
    /// union: nothing records which alternative a value actually is.
    Multi(Vec<String>),
    /// Map from string keys to an element type (additionalProperties)
    Map(Box<DescriptorKind>),
    /// No structure or primitive kind could be determined
    Unknown,
}

impl DescriptorKind {
    /// Shallow equivalence: same variant, same primitive kind or referenced
    /// name. Nested shapes are compared by name only; structural drift
    /// inside a referenced shape surfaces as a conflict under that shape's
    /// own canonical name.
    pub fn equivalent(&self, other: &DescriptorKind) -> bool {
        match (self, other) {
            (DescriptorKind::Primitive(a), DescriptorKind::Primitive(b)) => a == b,
            (DescriptorKind::Named(a), DescriptorKind::Named(b)) => a == b,
            (DescriptorKind::Multi(a), DescriptorKind::Multi(b)) => a == b,
            (DescriptorKind::Array(a), DescriptorKind::Array(b)) => a.equivalent(b),
            (DescriptorKind::Map(a), DescriptorKind::Map(b)) => a.equivalent(b),
            (DescriptorKind::Unknown, DescriptorKind::Unknown) => true,
            _ => false,
        }
    }

    /// Name of the variant, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            DescriptorKind::Primitive(_) => "primitive",
            DescriptorKind::Array(_) => "array",
            DescriptorKind::Named(_) => "named",
            DescriptorKind::Multi(_) => "multi",
            DescriptorKind::Map(_) => "map",
            DescriptorKind::Unknown => "unknown",
        }
    }
}

/// Inferred type of a single field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Structural kind
    pub kind: DescriptorKind,
    /// Set when the field's outer value was an array whose element
    /// decomposition produced a non-array descriptor
    pub is_array: bool,
    /// Free-text description, if the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Originating source identifier, for diagnostics only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Structural equality. Descriptions and provenance are diagnostics and
/// do not participate.
impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.is_array == other.is_array
    }
}

impl TypeDescriptor {
    /// Create a descriptor of the given kind
    pub fn new(kind: DescriptorKind) -> Self {
        Self {
            kind,
            is_array: false,
            description: None,
            origin: None,
        }
    }

    /// A descriptor with no determinable structure
    pub fn unknown() -> Self {
        Self::new(DescriptorKind::Unknown)
    }

    /// A primitive descriptor
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(DescriptorKind::Primitive(kind))
    }

    /// A reference to a registered shape
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(DescriptorKind::Named(name.into()))
    }

    /// Mark this descriptor as array-valued
    pub fn into_array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    /// Attach the originating source identifier
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Equivalence as used by the unifier. Array-ness, descriptions and
    /// provenance do not participate; only the structural kind counts.
    pub fn equivalent(&self, other: &TypeDescriptor) -> bool {
        self.kind.equivalent(&other.kind)
    }
}

/// JSON value kind name, for diagnostics
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field name reserved for component-level composites: a schema that *is*
/// a oneOf/anyOf/allOf holds its union under this name and is rendered as
/// embedded members instead of a named field.
pub const EMBEDDED_FIELD: &str = "";

/// One structural level: field name mapped to its inferred type.
///
/// Keys are unique and held in a `BTreeMap`, so equality is independent of
/// insertion order while iteration is always sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Fields of this level, ordered by name
    pub fields: BTreeMap<String, TypeDescriptor>,
}

impl Shape {
    /// Create an empty shape
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field
    pub fn insert(&mut self, name: impl Into<String>, descriptor: TypeDescriptor) {
        self.fields.insert(name.into(), descriptor);
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.fields.get(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the shape has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeDescriptor)> {
        self.fields.iter()
    }

    /// Whether every field present in both shapes carries an equivalent
    /// descriptor. Fields unique to either side do not participate.
    pub fn compatible_with(&self, other: &Shape) -> bool {
        self.fields.iter().all(|(name, descriptor)| {
            other
                .fields
                .get(name)
                .is_none_or(|theirs| descriptor.equivalent(theirs))
        })
    }

    /// Add every field of `other` that this shape does not yet have.
    /// Existing fields are left untouched, so widening is idempotent.
    pub fn widen_from(&mut self, other: &Shape) {
        for (name, descriptor) in &other.fields {
            if !self.fields.contains_key(name) {
                self.fields.insert(name.clone(), descriptor.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_of_value() {
        assert_eq!(
            PrimitiveKind::of_value(&serde_json::json!(1)),
            Some(PrimitiveKind::Integer)
        );
        assert_eq!(
            PrimitiveKind::of_value(&serde_json::json!(1.5)),
            Some(PrimitiveKind::Float)
        );
        assert_eq!(
            PrimitiveKind::of_value(&serde_json::json!("x")),
            Some(PrimitiveKind::String)
        );
        assert_eq!(
            PrimitiveKind::of_value(&serde_json::json!(true)),
            Some(PrimitiveKind::Boolean)
        );
        assert_eq!(PrimitiveKind::of_value(&Value::Null), None);
    }

    #[test]
    fn test_integer_literal_without_fraction() {
        // "1.0" carries a fractional part in the literal and decodes as f64
        let v: Value = serde_json::from_str("1.0").unwrap();
        assert_eq!(PrimitiveKind::of_value(&v), Some(PrimitiveKind::Float));
        let v: Value = serde_json::from_str("1").unwrap();
        assert_eq!(PrimitiveKind::of_value(&v), Some(PrimitiveKind::Integer));
    }

    #[test]
    fn test_equivalence_shallow() {
        let a = TypeDescriptor::named("address");
        let b = TypeDescriptor::named("address").into_array();
        // array-ness does not participate
        assert!(a.equivalent(&b));

        let c = TypeDescriptor::named("other");
        assert!(!a.equivalent(&c));

        let p1 = TypeDescriptor::primitive(PrimitiveKind::String);
        let p2 = TypeDescriptor::primitive(PrimitiveKind::Integer);
        assert!(!p1.equivalent(&p2));

        assert!(TypeDescriptor::unknown().equivalent(&TypeDescriptor::unknown()));
        assert!(!p1.equivalent(&a));
    }

    #[test]
    fn test_array_kind_equivalence() {
        let a = DescriptorKind::Array(Box::new(DescriptorKind::Named("tag".into())));
        let b = DescriptorKind::Array(Box::new(DescriptorKind::Named("tag".into())));
        let c = DescriptorKind::Array(Box::new(DescriptorKind::Primitive(PrimitiveKind::String)));
        assert!(a.equivalent(&b));
        assert!(!a.equivalent(&c));
    }

    #[test]
    fn test_shape_compatibility() {
        let mut a = Shape::new();
        a.insert("x", TypeDescriptor::primitive(PrimitiveKind::String));
        a.insert("y", TypeDescriptor::primitive(PrimitiveKind::Integer));

        let mut b = Shape::new();
        b.insert("x", TypeDescriptor::primitive(PrimitiveKind::String));
        b.insert("z", TypeDescriptor::primitive(PrimitiveKind::Boolean));
        assert!(a.compatible_with(&b));
        assert!(b.compatible_with(&a));

        let mut c = Shape::new();
        c.insert("x", TypeDescriptor::primitive(PrimitiveKind::Integer));
        assert!(!a.compatible_with(&c));
    }

    #[test]
    fn test_widen_idempotent() {
        let mut a = Shape::new();
        a.insert("x", TypeDescriptor::primitive(PrimitiveKind::String));

        let mut b = Shape::new();
        b.insert("x", TypeDescriptor::primitive(PrimitiveKind::String));
        b.insert("y", TypeDescriptor::primitive(PrimitiveKind::Integer));

        a.widen_from(&b);
        let once = a.clone();
        a.widen_from(&b);
        assert_eq!(a, once);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_shape_equality_ignores_insertion_order() {
        let mut a = Shape::new();
        a.insert("x", TypeDescriptor::primitive(PrimitiveKind::String));
        a.insert("y", TypeDescriptor::primitive(PrimitiveKind::Integer));

        let mut b = Shape::new();
        b.insert("y", TypeDescriptor::primitive(PrimitiveKind::Integer));
        b.insert("x", TypeDescriptor::primitive(PrimitiveKind::String));

        assert_eq!(a, b);
    }
}
