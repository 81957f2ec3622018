//! @ai:module:intent Operation inputs built from path templates, @parameter and @parameter_list tags
//! @ai:module:layer domain
//! @ai:module:public_api Parameter, ParameterOptions, ParamLocation
//! @ai:module:depends_on types, parser, declaration
//! @ai:module:stateless true

use crate::config::SchemaConfig;
use crate::declaration::Tag;
use crate::parser::{split_name_options, FORMAT_PLACEHOLDER};
use crate::types::Type;
use serde_json::{json, Value};
use std::fmt;

/// @ai:intent Where a parameter is carried in the request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamLocation {
    Path,
    #[default]
    Query,
    Body,
    Header,
    FormData,
    Other(String),
}

/// @ai:intent Constraints attached to a parameter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterOptions {
    pub required: bool,
    pub param_type: ParamLocation,
    pub allow_multiple: bool,
    pub allowable_values: Vec<String>,
}

/// @ai:intent A single operation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    ty: Type,
    description: String,
    options: ParameterOptions,
}

impl From<&str> for ParamLocation {
    fn from(s: &str) -> Self {
        match s {
            "path" => Self::Path,
            "query" => Self::Query,
            "body" => Self::Body,
            "header" => Self::Header,
            "form" | "formData" => Self::FormData,
            other => Self::Other(other.to_string()),
        }
    }
}

impl ParamLocation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
            Self::Header => "header",
            Self::FormData => "formData",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Parameter {
    pub fn new(
        name: impl Into<String>,
        ty: Type,
        description: impl Into<String>,
        options: ParameterOptions,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            description: description.into(),
            options,
        }
    }

    /// @ai:intent Required string path parameter for a `{placeholder}` in a path template
    pub fn from_path_param(name: &str) -> Self {
        Self::new(
            name,
            Type::primitive("string"),
            format!("Scope response to {}", name),
            ParameterOptions {
                required: true,
                param_type: ParamLocation::Path,
                ..Default::default()
            },
        )
    }

    /// @ai:intent Build a parameter from `@parameter [Type] name(required, location) description`
    /// @ai:post `multiple` in the options sets allow_multiple; the last other option is the location
    /// @ai:effects pure
    pub fn from_tag(tag: &Tag, config: &SchemaConfig) -> Self {
        let (name, mut options) = split_name_options(tag.name.as_deref().unwrap_or(""));
        let ty = Type::from_type_list(&tag.types, config).unwrap_or_else(|| Type::primitive("string"));

        let required = take_option(&mut options, "required");
        let allow_multiple = take_option(&mut options, "multiple");
        let param_type = options
            .last()
            .map(|loc| ParamLocation::from(*loc))
            .unwrap_or_default();

        Self::new(
            name,
            ty,
            tag.text.trim(),
            ParameterOptions {
                required,
                param_type,
                allow_multiple,
                allowable_values: Vec::new(),
            },
        )
    }

    /// @ai:intent The trailing response-format parameter every operation carries
    pub fn format_parameter(config: &SchemaConfig) -> Self {
        Self::new(
            FORMAT_PLACEHOLDER,
            Type::primitive("string"),
            "Response format either JSON or XML",
            ParameterOptions {
                required: true,
                param_type: ParamLocation::Path,
                allow_multiple: false,
                allowable_values: config.format_values.clone(),
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &ParameterOptions {
        &self.options
    }

    pub fn is_required(&self) -> bool {
        self.options.required
    }

    pub fn param_type(&self) -> &ParamLocation {
        &self.options.param_type
    }

    pub fn allowable_values(&self) -> &[String] {
        &self.options.allowable_values
    }

    /// @ai:intent Legacy (v1) parameter form
    /// @ai:effects pure
    pub fn to_legacy(&self) -> Value {
        let mut value = json!({
            "paramType": self.options.param_type.as_str(),
            "name": self.name,
            "description": self.description,
            "required": self.options.required,
            "allowMultiple": self.options.allow_multiple,
        });

        if let Value::Object(map) = &mut value {
            if !self.options.allowable_values.is_empty() {
                map.insert(
                    "allowableValues".to_string(),
                    json!({ "valueType": "LIST", "values": self.options.allowable_values }),
                );
            }
            if let Value::Object(type_map) = self.ty.to_legacy() {
                map.extend(type_map);
            }
        }

        value
    }

    /// @ai:intent OpenAPI v2 parameter form
    /// @ai:post body parameters nest their type under `schema`
    /// @ai:effects pure
    pub fn to_v2(&self) -> Value {
        let mut value = json!({
            "name": self.name,
            "description": self.description,
            "required": self.options.required,
            "in": self.options.param_type.as_str(),
        });

        if let Value::Object(map) = &mut value {
            if self.options.param_type == ParamLocation::Body {
                map.insert("schema".to_string(), self.ty.to_v2());
            } else if let Value::Object(type_map) = self.ty.to_v2() {
                map.extend(type_map);
            }

            let has_enum = !self.options.allowable_values.is_empty();
            if map.contains_key("items") && (has_enum || self.options.allow_multiple) {
                map.insert("collectionFormat".to_string(), json!("multi"));
            }
            if has_enum {
                map.insert("enum".to_string(), json!(self.options.allowable_values));
            }
        }

        value
    }
}

fn take_option(options: &mut Vec<&str>, flag: &str) -> bool {
    let before = options.len();
    options.retain(|o| *o != flag);
    options.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn from_tag(name: &str, ty: &str, text: &str) -> Parameter {
        let tag = Tag::new("parameter", text).with_name(name).with_types([ty]);
        Parameter::from_tag(&tag, &SchemaConfig::default())
    }

    #[test]
    fn test_from_path_param() {
        let param = Parameter::from_path_param("account_id");

        assert_eq!(param.name(), "account_id");
        assert!(param.is_required());
        assert_eq!(param.param_type(), &ParamLocation::Path);
        assert_eq!(param.description(), "Scope response to account_id");
    }

    #[test]
    fn test_from_tag_defaults_to_optional_query() {
        let param = from_tag("media[media_type_id]", "integer", "ID of the desired media type.");

        assert_eq!(param.name(), "media[media_type_id]");
        assert!(!param.is_required());
        assert_eq!(param.param_type(), &ParamLocation::Query);
        assert!(!param.options().allow_multiple);
    }

    #[test]
    fn test_from_tag_with_options() {
        let param = from_tag("status(required, body)", "Array", "Filter by status.");
        assert!(param.is_required());
        assert_eq!(param.param_type(), &ParamLocation::Body);

        let param = from_tag("ids(multiple)", "Array<integer>", "Ids");
        assert!(!param.is_required());
        assert!(param.options().allow_multiple);
        assert_eq!(param.param_type(), &ParamLocation::Query);
    }

    #[test]
    fn test_format_parameter() {
        let param = Parameter::format_parameter(&SchemaConfig::default());

        assert_eq!(param.name(), "format_type");
        assert!(param.is_required());
        assert_eq!(param.param_type(), &ParamLocation::Path);
        assert_eq!(param.allowable_values(), ["json", "xml"]);
    }

    #[test]
    fn test_legacy_form() {
        assert_eq!(
            Parameter::format_parameter(&SchemaConfig::default()).to_legacy(),
            json!({
                "paramType": "path",
                "name": "format_type",
                "description": "Response format either JSON or XML",
                "required": true,
                "allowMultiple": false,
                "allowableValues": { "valueType": "LIST", "values": ["json", "xml"] },
                "type": "string"
            })
        );
    }

    #[test]
    fn test_v2_body_parameter_nests_schema() {
        let param = from_tag("widget(required, body)", "Widget", "Widget to create");

        assert_eq!(
            param.to_v2(),
            json!({
                "name": "widget",
                "description": "Widget to create",
                "required": true,
                "in": "body",
                "schema": { "$ref": "#/definitions/Widget" }
            })
        );
    }

    #[test]
    fn test_v2_array_with_enum() {
        let param = Parameter::new(
            "status",
            Type::parse("Array<string>", &SchemaConfig::default()),
            "Filter by status",
            ParameterOptions {
                allowable_values: vec!["1".to_string(), "2".to_string()],
                ..Default::default()
            },
        );

        assert_eq!(
            param.to_v2(),
            json!({
                "name": "status",
                "description": "Filter by status",
                "required": false,
                "in": "query",
                "type": "array",
                "items": { "type": "string" },
                "collectionFormat": "multi",
                "enum": ["1", "2"]
            })
        );
    }
}
