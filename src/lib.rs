//! Declarative record validation with embedded validators.
//!
//! A [`ValidatorDefinition`] declares field rules, free-form validations and
//! embedded definitions for nested records. Validating a record produces an
//! [`ErrorNode`] tree with the same shape as the input: one child node per
//! embedded record, one index-aligned list of nodes per embedded list.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `validation_rail::*` or use the [`prelude`].
//!
//! # Examples
//!
//! ## Nested list
//!
//! ```
//! use serde_json::json;
//! use validation_rail::prelude::*;
//!
//! let user = ValidatorDefinition::builder("User")
//!     .validates("name", Presence::new())
//!     .embedded(
//!         "tasks",
//!         Embedded::many(ValidatorDefinition::builder("Task").validates("title", Presence::new())),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut validator = user.validator(try_record(json!({
//!     "name": "",
//!     "tasks": [{"title": ""}, {"title": "Two"}]
//! })).unwrap());
//!
//! assert!(!validator.is_valid().unwrap());
//! assert_eq!(validator.errors()["name"], ["can't be blank"]);
//!
//! let tasks = validator.errors().children("tasks").unwrap();
//! assert_eq!(tasks[0]["title"], ["can't be blank"]);
//! assert!(tasks[1].is_empty());
//! ```
//!
//! ## Root and parent records
//!
//! ```
//! use serde_json::json;
//! use validation_rail::prelude::*;
//!
//! let user = ValidatorDefinition::builder("User")
//!     .embedded(
//!         "tasks",
//!         Embedded::many(ValidatorDefinition::builder("Task").validate(|ctx| {
//!             let expected = format!("{} Task", ctx.root()["name"].as_str().unwrap_or_default());
//!             if ctx.get("title").and_then(|t| t.as_str()) != Some(expected.as_str()) {
//!                 ctx.add_base("does not look correct");
//!             }
//!         })),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let err = user
//!     .call(try_record(json!({"name": "Jade", "tasks": [{"title": "Jane Task"}]})).unwrap())
//!     .unwrap_err();
//! let errors = err.validation_errors().unwrap();
//! assert_eq!(errors.children("tasks").unwrap()[0].base(), ["does not look correct"]);
//! ```

/// Per-node runtime state handed to rules
pub mod context;
/// Validator definitions and their builders
pub mod definition;
/// Validation engine and embedded dispatcher
pub mod engine;
/// Crate error types
pub mod error;
/// Internal logging macros
mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// The rule contract
pub mod rule;
/// Built-in rules and the rule registry
pub mod rules;
/// Uniqueness store abstraction and in-memory implementation
pub mod store;
/// Error tree and error wrapper types
pub mod types;
/// Validation type for error accumulation
pub mod validation;
/// The owning validator object
pub mod validator;

pub use context::ValidationContext;
pub use definition::{Cardinality, DefinitionBuilder, Embedded, EmbeddedSpec, ValidatorDefinition};
pub use error::{DefinitionError, DefinitionErrorKind, DefinitionErrors, Error, StoreFailure, ValidationError};
pub use rule::{Rule, RuleResult};
pub use types::{ComposableError, ErrorKey, ErrorNode, ErrorVec, Messages, Nested};
pub use validator::Validator;

/// A record: field names mapped to JSON values.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Converts a JSON value into [`Attributes`].
///
/// # Errors
///
/// [`Error::NotARecord`] if `value` is not a JSON object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validation_rail::{try_record, Error};
///
/// let attributes = try_record(json!({"name": "Jade"})).unwrap();
/// assert_eq!(attributes["name"], "Jade");
///
/// assert!(matches!(try_record(json!([1, 2])), Err(Error::NotARecord { found: "array" })));
/// ```
pub fn try_record(value: serde_json::Value) -> Result<Attributes, Error> {
    match value {
        serde_json::Value::Object(attributes) => Ok(attributes),
        other => Err(Error::NotARecord {
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
