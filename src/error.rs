//! @ai:module:intent Define error types for swagger schema generation
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Unified error type for tag parsing and schema serialization
#[derive(Error, Debug)]
pub enum Error {
    #[error("Model{} is missing @model tag", describe_declaration(.declaration))]
    MissingModelId { declaration: Option<String> },

    #[error("Invalid status code {code:?} in @error_message tag of {declaration}")]
    InvalidStatusCode { declaration: String, code: String },

    #[error("Malformed @parameter_list tag in {declaration}: {text:?}")]
    MalformedParameterList { declaration: String, text: String },

    #[error("Operation {declaration} has no @path tag")]
    MissingPath { declaration: String },

    #[error("@path tag of {declaration} declares no HTTP method")]
    MissingHttpMethod { declaration: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn describe_declaration(declaration: &Option<String>) -> String {
    declaration
        .as_ref()
        .map(|d| format!(" {}", d))
        .unwrap_or_default()
}

