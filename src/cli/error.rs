//! Error types for the CLI

use thiserror::Error;

use crate::export::ExportError;
use crate::import::ImportError;
use crate::inference::InferenceError;

/// Errors reported by the structgen binary
#[derive(Debug, Error)]
pub enum CliError {
    /// Flags or override tables were improperly invoked
    #[error("bad usage: {0}")]
    Usage(String),

    /// Source loading failed
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Inference failed
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Rendering failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// The target file could not be created
    #[error("creating output file {path}: {message}")]
    Output { path: String, message: String },
}

impl CliError {
    /// Process exit status: usage errors exit with 2, everything else
    /// with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}
