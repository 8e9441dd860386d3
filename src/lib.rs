//! structgen - Go struct declarations inferred from sampled data
//!
//! Provides unified interfaces for:
//! - Type inference and unification (shapes, canonical names, registry)
//! - Source loading (sample JSON files, OpenAPI component schemas)
//! - Go struct rendering

#[cfg(feature = "cli")]
pub mod cli;
pub mod export;
pub mod import;
pub mod inference;

// Re-export commonly used types
pub use export::{ExportError, GoRenderOptions, GoStructExporter};
pub use import::{ImportError, SourceDocument};
pub use inference::{
    DescriptorKind, InferenceConfig, InferenceError, PrimitiveKind, Shape, StructInferrer,
    TypeDescriptor, TypeRegistry,
};
