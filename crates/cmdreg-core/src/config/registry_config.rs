//! Registry configuration

use serde::{Deserialize, Serialize};

use crate::commands::types::AliasMode;

/// Command tree settings shared by every tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Joins path segments into fully-qualified names and store keys
    pub separator: String,
    /// Fold names and aliases to lowercase for lookup
    pub case_insensitive: bool,
    /// Mode used when a caller does not pick one
    pub default_alias_mode: AliasMode,
    /// Deepest allowed command path
    pub max_depth: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            case_insensitive: true,
            default_alias_mode: AliasMode::Strict,
            max_depth: 8,
        }
    }
}

impl RegistryConfig {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
