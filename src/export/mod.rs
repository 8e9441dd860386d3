//! Export functionality
//!
//! Renders a finalized type registry as target-language source. Go struct
//! declarations are the only supported syntax.

pub mod golang;

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Output could not be written
    #[error("writing output: {0}")]
    Io(#[from] std::io::Error),
}

pub use golang::{GoRenderOptions, GoStructExporter};
