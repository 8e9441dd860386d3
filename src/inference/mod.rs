//! Type inference and unification engine
//!
//! Decomposes sampled JSON documents (or OpenAPI component schemas) into
//! field-level type descriptors and unifies structurally matching shapes
//! under canonical, de-duplicated names.
//!
//! ## Features
//!
//! - **Decomposition** - recursive walk of sampled values into shapes
//! - **Unification** - merge compatible shapes, widen optional fields,
//!   fork qualified names on conflict
//! - **Normalization** - casing/separator-insensitive canonical keys with
//!   derived display identifiers
//! - **Provenance** - originating source tracked per registered type
//!
//! ## Example
//!
//! ```rust,ignore
//! use structgen::inference::StructInferrer;
//!
//! let mut inferrer = StructInferrer::new();
//! let sample = serde_json::json!({"id": 1, "address": {"city": "X"}});
//! inferrer.add_sample("user.json", "user", &sample)?;
//!
//! let registry = inferrer.finalize()?;
//! assert!(registry.contains("user"));
//! assert!(registry.contains("address"));
//! ```

mod config;
mod error;
mod inferrer;
pub mod naming;
mod registry;
mod schema;
mod types;
mod unify;

pub use config::{InferenceConfig, InferenceConfigBuilder};
pub use error::InferenceError;
pub use inferrer::StructInferrer;
pub use registry::{TypeRegistry, UNKNOWN_SOURCE};
pub use schema::{
    ComponentSchema, Components, ComponentsDocument, CompositeRefs, RefOnly, SchemaProperty,
    SchemaType, type_from_ref,
};
pub use types::{
    DescriptorKind, EMBEDDED_FIELD, PrimitiveKind, Shape, TypeDescriptor, value_type_name,
};
pub use unify::resolve_or_register;
