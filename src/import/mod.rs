//! Input adapters
//!
//! Loads the documents the inference engine consumes:
//! - sampled JSON files, expanded from glob patterns
//! - OpenAPI component schema files (JSON or YAML)
//!
//! Each document is opened, fully decoded and released before the next is
//! processed; a decode failure aborts before any part of the document can
//! reach the registry.

pub mod json;
pub mod openapi;

/// Error during source loading
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// A source file could not be opened or read
    #[error("opening {path}: {message}")]
    Io { path: String, message: String },

    /// A source file is not valid structured data
    #[error("decoding {path}: {message}")]
    Decode { path: String, message: String },

    /// A document whose top level is not an object, an array of objects,
    /// or a bare string
    #[error("the top-level JSON in {path} is a {found}; expected an object, an array or a string")]
    UnsupportedDocument { path: String, found: String },
}

pub use json::{SourceDocument, expand_sources, load_document, load_documents};
pub use openapi::load_components;
