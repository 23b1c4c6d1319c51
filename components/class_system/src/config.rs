//! Class registry configuration.

use serde::{Deserialize, Serialize};

/// Options controlling how class bodies are compiled.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use class_system::ClassConfig;
///
/// let config = ClassConfig::from_json(r#"{ "inline_simple_arrays": false }"#).unwrap();
/// assert!(!config.inline_simple_arrays);
/// assert_eq!(config.init_member, "init");
/// assert_eq!(config.after_init_member, "_afterInit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    /// Inline arrays made only of strings, booleans, numbers and nulls as
    /// literals. When disabled every non-empty array is copied from the
    /// reference table on construction.
    pub inline_simple_arrays: bool,
    /// Member invoked with the construction arguments
    pub init_member: String,
    /// Member invoked without arguments as the last construction step
    pub after_init_member: String,
}

impl Default for ClassConfig {
    fn default() -> Self {
        ClassConfig {
            inline_simple_arrays: true,
            init_member: "init".to_string(),
            after_init_member: "_afterInit".to_string(),
        }
    }
}

impl ClassConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
