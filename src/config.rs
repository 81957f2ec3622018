//! @ai:module:intent Configuration for schema generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api SchemaConfig
//! @ai:module:stateless true

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Knobs shared by every builder and serializer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaConfig {
    #[serde(default = "default_primitive_types")]
    pub primitive_types: Vec<String>,
    #[serde(default = "default_produces")]
    pub produces: Vec<String>,
    #[serde(default = "default_format_values")]
    pub format_values: Vec<String>,
    #[serde(default = "default_notes_line_break")]
    pub notes_line_break: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            primitive_types: default_primitive_types(),
            produces: default_produces(),
            format_values: default_format_values(),
            notes_line_break: default_notes_line_break(),
        }
    }
}

fn default_primitive_types() -> Vec<String> {
    [
        "string", "integer", "number", "boolean", "array", "object", "file", "date",
        "date-time", "float", "double", "long", "int", "byte", "binary", "password", "void",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_produces() -> Vec<String> {
    vec!["application/json".to_string(), "application/xml".to_string()]
}

fn default_format_values() -> Vec<String> {
    vec!["json".to_string(), "xml".to_string()]
}

fn default_notes_line_break() -> String {
    "<br>".to_string()
}

impl SchemaConfig {
    /// @ai:intent Parse configuration from TOML text
    /// @ai:effects pure
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// @ai:intent Check whether a type name is a configured primitive
    /// @ai:effects pure
    pub fn is_primitive(&self, name: &str) -> bool {
        self.primitive_types.iter().any(|p| p == name)
    }
}
