//! @ai:module:intent Parse one endpoint declaration into an Operation and serialize it
//! @ai:module:layer application
//! @ai:module:public_api Operation, ApiContext, ErrorMessage
//! @ai:module:depends_on parameter, types, parser, declaration, error
//! @ai:module:stateless true

use crate::config::SchemaConfig;
use crate::declaration::{Declaration, Tag, TagKind};
use crate::error::{Error, Result};
use crate::parameter::{ParamLocation, Parameter, ParameterOptions};
use crate::parser::{self, path_placeholders};
use crate::types::Type;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// @ai:intent Read-only defaults supplied by the resource that owns an operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiContext {
    pub description: Option<String>,
    pub resource: Option<String>,
}

/// @ai:intent An error response declared with @error_message
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub code: i64,
    pub message: String,
    #[serde(rename = "responseModel", skip_serializing_if = "Option::is_none")]
    pub response_model: Option<String>,
}

/// @ai:intent One documented endpoint
#[derive(Debug, Clone)]
pub struct Operation<'a> {
    api: &'a ApiContext,
    config: &'a SchemaConfig,
    declaration: String,
    path: Option<String>,
    http_method: Option<String>,
    summary: Option<String>,
    notes: Option<String>,
    parameters: Vec<Parameter>,
    response_type: Option<Type>,
    error_messages: Vec<ErrorMessage>,
    model_names: Vec<String>,
}

impl<'a> Operation<'a> {
    /// @ai:intent Parse every tag of an endpoint declaration in a single pass
    /// @ai:post parameters are sorted by name and end with the format parameter
    /// @ai:effects pure
    pub fn from_declaration(
        declaration: &Declaration,
        api: &'a ApiContext,
        config: &'a SchemaConfig,
    ) -> Result<Self> {
        let mut operation = Self {
            api,
            config,
            declaration: declaration.identity(),
            path: None,
            http_method: None,
            summary: None,
            notes: None,
            parameters: Vec::new(),
            response_type: None,
            error_messages: Vec::new(),
            model_names: Vec::new(),
        };

        for tag in &declaration.tags {
            match tag.kind() {
                TagKind::Path => operation.add_path_params_and_method(tag),
                TagKind::Parameter => operation
                    .parameters
                    .push(Parameter::from_tag(tag, config)),
                TagKind::ParameterList => operation.add_parameter_list(tag)?,
                TagKind::ResponseType => {
                    if let Some(ty) = Type::from_type_list(&tag.types, config) {
                        operation.add_response_type(ty);
                    }
                }
                TagKind::ErrorMessage => operation.add_error_message(tag)?,
                TagKind::Summary => operation.summary = Some(tag.text.clone()),
                TagKind::Notes => {
                    operation.notes = Some(tag.text.replace('\n', &config.notes_line_break))
                }
                other => tracing::debug!("Ignoring {:?} tag on {}", other, operation.declaration),
            }
        }

        operation.parameters.sort_by(|a, b| a.name().cmp(b.name()));
        operation.parameters.push(Parameter::format_parameter(config));

        tracing::debug!(
            "Parsed operation {} with {} parameters",
            operation.declaration,
            operation.parameters.len()
        );

        Ok(operation)
    }

    /// @ai:intent Record method and path template, adding one path parameter per placeholder
    /// @ai:example [PUT] /api/v1/accounts/{account_id}.{format_type}
    fn add_path_params_and_method(&mut self, tag: &Tag) {
        let path = tag.text.trim();
        self.http_method = tag.first_type().map(str::to_string);
        self.parameters.extend(
            path_placeholders(path)
                .into_iter()
                .map(Parameter::from_path_param),
        );
        self.path = Some(path.to_string());
    }

    /// @ai:intent Add a query parameter from the `[Type] name(required) description` + `[List]` shorthand
    /// @ai:pre tag text matches the parameter list grammar
    fn add_parameter_list(&mut self, tag: &Tag) -> Result<()> {
        let list = parser::parse_parameter_list(&tag.text).ok_or_else(|| {
            Error::MalformedParameterList {
                declaration: self.declaration.clone(),
                text: tag.text.clone(),
            }
        })?;

        self.parameters.push(Parameter::new(
            list.name,
            Type::primitive(list.type_name.to_lowercase()),
            list.description,
            ParameterOptions {
                required: list.required,
                param_type: ParamLocation::Query,
                allow_multiple: false,
                allowable_values: list.values,
            },
        ));
        Ok(())
    }

    fn add_response_type(&mut self, ty: Type) {
        if let Some(name) = ty.model_name() {
            self.model_names.push(name.to_string());
        }
        self.response_type = Some(ty);
    }

    /// @ai:intent Record an error response; the tag's name slot is the status code
    /// @ai:pre tag name parses as an integer status code
    fn add_error_message(&mut self, tag: &Tag) -> Result<()> {
        let raw_code = tag.name.as_deref().unwrap_or("").trim();
        let code = raw_code.parse().map_err(|_| Error::InvalidStatusCode {
            declaration: self.declaration.clone(),
            code: raw_code.to_string(),
        })?;

        self.error_messages.push(ErrorMessage {
            code,
            message: tag.text.clone(),
            response_model: tag.first_type().map(str::to_string),
        });
        Ok(())
    }

    pub fn api(&self) -> &ApiContext {
        self.api
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn http_method(&self) -> Option<&str> {
        self.http_method.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn response_type(&self) -> Option<&Type> {
        self.response_type.as_ref()
    }

    pub fn error_messages(&self) -> &[ErrorMessage] {
        &self.error_messages
    }

    pub fn model_names(&self) -> &[String] {
        &self.model_names
    }

    fn effective_summary(&self) -> Option<&str> {
        self.summary.as_deref().or(self.api.description.as_deref())
    }

    fn path_and_method(&self) -> Result<(&str, &str)> {
        let path = self.path.as_deref().ok_or_else(|| Error::MissingPath {
            declaration: self.declaration.clone(),
        })?;
        let method = self
            .http_method
            .as_deref()
            .ok_or_else(|| Error::MissingHttpMethod {
                declaration: self.declaration.clone(),
            })?;
        Ok((path, method))
    }

    /// @ai:intent Derive the operation nickname from path and method
    /// @ai:pre a @path tag with a method was parsed
    pub fn nickname(&self) -> Result<String> {
        let (path, method) = self.path_and_method()?;
        Ok(parser::nickname(path, method))
    }

    /// @ai:intent Legacy (v1) operation form, merged with the response type's fields
    /// @ai:effects pure
    pub fn to_legacy(&self) -> Result<Value> {
        let (_, method) = self.path_and_method()?;

        let mut value = json!({
            "httpMethod": method,
            "nickname": self.nickname()?,
            "type": "void",
            "produces": self.config.produces,
            "parameters": self.parameters.iter().map(Parameter::to_legacy).collect::<Vec<_>>(),
            "summary": self.effective_summary(),
            "notes": self.notes,
            "responseMessages": self.error_messages,
        });

        if let (Value::Object(map), Some(ty)) = (&mut value, &self.response_type) {
            if let Value::Object(type_map) = ty.to_legacy() {
                map.extend(type_map);
            }
        }

        Ok(value)
    }

    /// @ai:intent OpenAPI v2 form, keyed by the lower-cased HTTP method
    /// @ai:effects pure
    pub fn to_v2(&self) -> Result<Value> {
        let (_, method) = self.path_and_method()?;
        let summary = self.effective_summary();

        let mut default_response = Map::new();
        default_response.insert("description".to_string(), json!(summary.unwrap_or("")));
        if let Some(ty) = &self.response_type {
            default_response.insert("schema".to_string(), ty.to_v2());
        }

        let mut responses = Map::new();
        responses.insert("default".to_string(), Value::Object(default_response));
        for err in &self.error_messages {
            let mut response = Map::new();
            response.insert("description".to_string(), json!(err.message));
            if let Some(model) = &err.response_model {
                response.insert("schema".to_string(), Type::parse(model, self.config).to_v2());
            }
            responses.insert(err.code.to_string(), Value::Object(response));
        }

        let mut op = Map::new();
        if let Some(summary) = summary {
            op.insert("summary".to_string(), json!(summary));
        }
        op.insert("tags".to_string(), json!(self.api.resource.iter().collect::<Vec<_>>()));
        op.insert(
            "parameters".to_string(),
            Value::Array(self.parameters.iter().map(Parameter::to_v2).collect()),
        );
        op.insert("responses".to_string(), Value::Object(responses));
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            op.insert("description".to_string(), json!(notes));
        }

        let mut keyed = Map::new();
        keyed.insert(method.to_lowercase(), Value::Object(op));
        Ok(Value::Object(keyed))
    }
}
