//! @ai:module:intent Typed fields of a model, built from @property tags
//! @ai:module:layer domain
//! @ai:module:public_api Property
//! @ai:module:depends_on types, parser, declaration
//! @ai:module:stateless true

use crate::config::SchemaConfig;
use crate::declaration::Tag;
use crate::parser::split_name_options;
use crate::types::Type;
use serde_json::Value;

/// @ai:intent A named, typed, optionally required model field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    ty: Type,
    description: Option<String>,
    required: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: Type, description: Option<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            description,
            required,
        }
    }

    /// @ai:intent Build a property from `@property [Type] name(required) description`
    /// @ai:post untyped tags default to a string property
    /// @ai:effects pure
    pub fn from_tag(tag: &Tag, config: &SchemaConfig) -> Self {
        let (name, options) = split_name_options(tag.name.as_deref().unwrap_or(""));
        let ty = Type::from_type_list(&tag.types, config).unwrap_or_else(|| Type::primitive("string"));
        let description = Some(tag.text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Self::new(name, ty, description, options.contains(&"required"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// @ai:intent Referenced model, if the property's type is a reference
    pub fn model_name(&self) -> Option<&str> {
        self.ty.model_name()
    }

    /// @ai:intent Legacy (v1) hash form
    pub fn to_legacy(&self) -> Value {
        let mut value = self.ty.to_legacy();
        if let Value::Object(map) = &mut value {
            map.insert("description".to_string(), self.description.clone().into());
        }
        value
    }

    /// @ai:intent OpenAPI v2 schema form
    /// @ai:post description is dropped next to a bare `$ref`
    pub fn to_v2(&self) -> Value {
        let mut value = self.ty.to_v2();
        if let (Value::Object(map), Some(description)) = (&mut value, &self.description) {
            if !map.contains_key("$ref") {
                map.insert("description".to_string(), Value::from(description.as_str()));
            }
        }
        value
    }
}
