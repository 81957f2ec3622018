//! @ai:module:intent Define the annotated declarations consumed by the schema builders
//! @ai:module:layer domain
//! @ai:module:public_api Declaration, DeclarationKind, Tag, TagKind, Location, parse_declarations
//! @ai:module:stateless true

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Represents a source code location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

/// @ai:intent Classifies a declaration the way the extraction tool reports it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Module,
    #[default]
    Method,
    Constant,
    Other,
}

/// @ai:intent Known tag names; anything else is carried as Unknown and ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    Model,
    Property,
    Path,
    Parameter,
    ParameterList,
    ResponseType,
    ErrorMessage,
    Summary,
    Notes,
    Unknown(String),
}

/// @ai:intent A single annotation attached to a declaration
///
/// `name` is the tag's own name slot, e.g. `status(required)` in
/// `@parameter [Array] status(required) Filter by status` or `404` in
/// `@error_message 404 Not found`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// @ai:intent An annotated source declaration handed over by the extraction tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Declaration {
    pub path: String,
    #[serde(rename = "type", default)]
    pub kind: DeclarationKind,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl From<&str> for TagKind {
    fn from(s: &str) -> Self {
        match s {
            "model" => Self::Model,
            "property" => Self::Property,
            "path" => Self::Path,
            "parameter" => Self::Parameter,
            "parameter_list" => Self::ParameterList,
            "response_type" => Self::ResponseType,
            "error_message" => Self::ErrorMessage,
            "summary" => Self::Summary,
            "notes" => Self::Notes,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Tag {
    /// @ai:intent Create a tag with text only
    pub fn new(tag_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            name: None,
            text: text.into(),
            types: Vec::new(),
        }
    }

    /// @ai:intent Set the tag's name slot
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// @ai:intent Set the tag's bracketed type list
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// @ai:intent Classify this tag by its name
    /// @ai:effects pure
    pub fn kind(&self) -> TagKind {
        TagKind::from(self.tag_name.as_str())
    }

    /// @ai:intent First declared type, if any
    pub fn first_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }
}

impl Declaration {
    /// @ai:intent Create an empty declaration of the given kind
    pub fn new(path: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            path: path.into(),
            kind,
            location: None,
            tags: Vec::new(),
        }
    }

    /// @ai:intent Append a tag, keeping declaration order
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// @ai:intent Human-readable identity used in diagnostics
    pub fn identity(&self) -> String {
        match &self.location {
            Some(loc) => format!("{} ({}:{})", self.path, loc.file.display(), loc.line),
            None => self.path.clone(),
        }
    }
}

/// @ai:intent Decode a JSON array of declarations produced by an extraction tool
/// @ai:effects pure
pub fn parse_declarations(json: &str) -> Result<Vec<Declaration>> {
    Ok(serde_json::from_str(json)?)
}
