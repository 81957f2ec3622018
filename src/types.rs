//! @ai:module:intent Data-type references used by properties, parameters and responses
//! @ai:module:layer domain
//! @ai:module:public_api Type, TypeKind
//! @ai:module:depends_on parser, config
//! @ai:module:stateless true

use crate::config::SchemaConfig;
use crate::parser::split_type_list;
use serde_json::{json, Value};

/// @ai:intent Primitive scalar or reference to a named model, decided at parse time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Primitive(String),
    Reference(String),
}

/// @ai:intent A single type reference, possibly a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    kind: TypeKind,
    array: bool,
}

impl TypeKind {
    /// @ai:intent Classify a type name
    /// @ai:post Primitive for configured primitives and any spelling of `array`,
    /// @ai:post otherwise Reference iff the name has an upper-case char
    /// @ai:effects pure
    pub fn classify(name: &str, config: &SchemaConfig) -> Self {
        let primitive = config.is_primitive(name) || name.eq_ignore_ascii_case("array");
        if !primitive && name.chars().any(char::is_uppercase) {
            Self::Reference(name.to_string())
        } else {
            Self::Primitive(name.to_string())
        }
    }
}

impl Type {
    pub fn new(kind: TypeKind, array: bool) -> Self {
        Self { kind, array }
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Primitive(name.into()), false)
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Reference(name.into()), false)
    }

    /// @ai:intent Parse one raw annotation such as `Array<Widget>`
    /// @ai:example "Array<Widget>" -> Reference("Widget"), array
    /// @ai:effects pure
    pub fn parse(raw: &str, config: &SchemaConfig) -> Self {
        let fragments = split_type_list(raw);
        Self::new(TypeKind::classify(fragments.name, config), fragments.array)
    }

    /// @ai:intent Parse the first entry of a tag's type list
    /// @ai:post None when the list is empty
    pub fn from_type_list(types: &[String], config: &SchemaConfig) -> Option<Self> {
        types.first().map(|raw| Self::parse(raw, config))
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            TypeKind::Primitive(name) | TypeKind::Reference(name) => name,
        }
    }

    pub fn is_array(&self) -> bool {
        self.array
    }

    pub fn is_ref(&self) -> bool {
        matches!(self.kind, TypeKind::Reference(_))
    }

    /// @ai:intent Name of the referenced model, if this is a reference type
    pub fn model_name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Reference(name) => Some(name),
            TypeKind::Primitive(_) => None,
        }
    }

    /// @ai:intent Legacy (v1) hash form
    /// @ai:effects pure
    pub fn to_legacy(&self) -> Value {
        if self.array {
            let tag = if self.is_ref() { "$ref" } else { "type" };
            json!({ "type": "array", "items": { tag: self.name() } })
        } else {
            json!({ "type": self.name() })
        }
    }

    /// @ai:intent OpenAPI v2 schema form
    /// @ai:effects pure
    pub fn to_v2(&self) -> Value {
        let inner = match &self.kind {
            TypeKind::Reference(name) => json!({ "$ref": format!("#/definitions/{}", name) }),
            TypeKind::Primitive(name) => json!({ "type": name }),
        };

        if self.array {
            json!({ "type": "array", "items": inner })
        } else {
            inner
        }
    }
}
