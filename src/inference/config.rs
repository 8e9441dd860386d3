//! Configuration for type inference

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Configuration for type inference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Package or module scope whose name is stripped from stuttering
    /// type names during normalization
    pub package_scope: String,

    /// Parent qualifier used when a top-level document conflicts with an
    /// existing entry of the same canonical name
    pub root_scope: String,

    /// Exact-match rename overrides, applied to raw names before
    /// normalization
    pub renames: BTreeMap<String, String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            package_scope: "main".to_string(),
            root_scope: "top_level".to_string(),
            renames: BTreeMap::new(),
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Set the package scope used for stutter stripping
    pub fn package_scope(mut self, scope: impl Into<String>) -> Self {
        self.config.package_scope = scope.into();
        self
    }

    /// Set the parent qualifier for top-level conflict forks
    pub fn root_scope(mut self, scope: impl Into<String>) -> Self {
        self.config.root_scope = scope.into();
        self
    }

    /// Add a single rename override
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.config.renames.insert(from.into(), to.into());
        self
    }

    /// Replace the rename override table
    pub fn renames(mut self, renames: BTreeMap<String, String>) -> Self {
        self.config.renames = renames;
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InferenceConfig::default();
        assert_eq!(config.package_scope, "main");
        assert_eq!(config.root_scope, "top_level");
        assert!(config.renames.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = InferenceConfig::builder()
            .package_scope("models")
            .rename("issuetype", "ticket_kind")
            .build();

        assert_eq!(config.package_scope, "models");
        assert_eq!(config.renames["issuetype"], "ticket_kind");
    }
}
