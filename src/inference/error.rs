//! Error types for type inference

use thiserror::Error;

/// Errors that can occur while decomposing and unifying sampled data
#[derive(Error, Debug, Clone)]
pub enum InferenceError {
    /// An array nested directly inside another array. Only one level of
    /// array-of-array is representable, and only when the inner element
    /// resolves to a primitive or named type.
    #[error("unsupported nested array at field '{field}' in {source_file}")]
    NestedArray { field: String, source_file: String },

    /// A decomposed value that does not fit the supported variant set
    #[error("unsupported {found} value at field '{field}' in {source_file}")]
    UnsupportedShape {
        field: String,
        found: String,
        source_file: String,
    },

    /// A named reference or multi-variant member that does not resolve to
    /// a registry key after the full inference pass
    #[error("unresolved type reference '{name}' in '{owner}'")]
    UnresolvedReference { name: String, owner: String },
}
