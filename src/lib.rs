//! @ai:module:intent Swagger schema generation from annotated source declarations
//! @ai:module:layer domain
//! @ai:module:public_api declaration, config, types, property, model, parameter, operation, parser, error
//! @ai:module:stateless true
//!
//! # Swagdoc
//!
//! Turns `@model`, `@property`, `@path`, `@parameter`, `@parameter_list`,
//! `@response_type`, `@error_message`, `@summary` and `@notes` tags attached to
//! source declarations into models and operations, and serializes them as
//! legacy (v1) hashes or OpenAPI v2 fragments.
//!
//! ## Example
//!
//! ```rust
//! use swagdoc_parser::{ApiContext, Declaration, DeclarationKind, Operation, SchemaConfig, Tag};
//!
//! let config = SchemaConfig::default();
//! let api = ApiContext {
//!     description: Some("Widgets".to_string()),
//!     resource: Some("widgets".to_string()),
//! };
//! let declaration = Declaration::new("WidgetsController#show", DeclarationKind::Method)
//!     .with_tag(Tag::new("path", "/widgets/{id}.{format_type}").with_types(["GET"]))
//!     .with_tag(Tag::new("response_type", "").with_types(["Widget"]));
//!
//! let operation = Operation::from_declaration(&declaration, &api, &config).unwrap();
//! assert_eq!(operation.nickname().unwrap(), "widgets-idget");
//! println!("{}", operation.to_v2().unwrap());
//! ```

pub mod config;
pub mod declaration;
pub mod error;
pub mod model;
pub mod operation;
pub mod parameter;
pub mod parser;
pub mod property;
pub mod types;

pub use config::SchemaConfig;
pub use declaration::{parse_declarations, Declaration, DeclarationKind, Location, Tag, TagKind};
pub use error::{Error, Result};
pub use model::Model;
pub use operation::{ApiContext, ErrorMessage, Operation};
pub use parameter::{ParamLocation, Parameter, ParameterOptions};
pub use property::Property;
pub use types::{Type, TypeKind};
