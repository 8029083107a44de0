//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use validation_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Declaring**: [`ValidatorDefinition`], [`DefinitionBuilder`], [`Embedded`]
//! - **Rules**: [`Rule`], [`Presence`], [`Uniqueness`], [`Format`], [`Length`], [`RuleRegistry`]
//! - **Running**: [`Validator`], [`ValidationContext`], [`try_record`]
//! - **Results**: [`ErrorNode`], [`Nested`], [`Messages`], [`Error`]
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use validation_rail::prelude::*;
//!
//! let user = ValidatorDefinition::builder("User")
//!     .validates("name", Presence::new())
//!     .build()
//!     .unwrap();
//!
//! assert!(user.call(try_record(json!({"name": "Jade"})).unwrap()).is_ok());
//! ```

pub use crate::definition::{DefinitionBuilder, Embedded, ValidatorDefinition};
pub use crate::rule::Rule;
pub use crate::rules::{Format, Length, Presence, RuleRegistry, Uniqueness};
pub use crate::store::{MemoryStore, UniquenessStore};
pub use crate::types::{ErrorNode, Messages, Nested};
pub use crate::validator::Validator;
pub use crate::{try_record, Attributes, Error, ValidationContext};
