use serde::{Deserialize, Serialize};

/// Runtime-mutable application settings, persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// When off, the build assembler skips pairwise compatibility
    /// warnings.
    #[serde(rename = "enableCompatibilityCheck", default = "default_true")]
    pub enable_compatibility_check: bool,
    #[serde(rename = "defaultCurrency", default = "default_currency")]
    pub default_currency: String,
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "AED".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            enable_compatibility_check: true,
            default_currency: default_currency(),
        }
    }
}
