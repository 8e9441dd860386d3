//! OpenAPI component schema loading
//!
//! Accepts JSON or YAML; JSON is tried first since it is the stricter
//! syntax.

use std::path::Path;

use super::ImportError;
use crate::inference::ComponentsDocument;

/// Load the `components.schemas` subset of an OpenAPI document
pub fn load_components(path: &Path) -> Result<(String, ComponentsDocument), ImportError> {
    let id = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: id.clone(),
        message: e.to_string(),
    })?;

    let document = if serde_json::from_str::<serde_json::Value>(&content).is_ok() {
        serde_json::from_str(&content).map_err(|e| ImportError::Decode {
            path: id.clone(),
            message: e.to_string(),
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|e| ImportError::Decode {
            path: id.clone(),
            message: e.to_string(),
        })?
    };

    Ok((id, document))
}
