//! The owning validator object.
use std::sync::Arc;

use serde::Serialize;

use crate::context::ValidationContext;
use crate::definition::ValidatorDefinition;
use crate::engine;
use crate::error::{Error, StoreFailure, ValidationError};
use crate::macros::{enter_span, trace_event};
use crate::types::ErrorNode;
use crate::{try_record, Attributes};

/// A definition bound to one record.
///
/// Validation runs lazily on the first [`is_valid`](Self::is_valid) or
/// eagerly through [`validate`](Self::validate). Every run replaces the
/// previous error tree; `validate` takes `&mut self`, so one instance runs at
/// most one validation at a time.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validation_rail::prelude::*;
///
/// let user = ValidatorDefinition::builder("User")
///     .validates("name", Presence::new())
///     .build()
///     .unwrap();
///
/// let mut validator = Validator::new(user, try_record(json!({"name": ""})).unwrap());
/// assert!(!validator.is_valid().unwrap());
/// assert_eq!(validator.errors()["name"], ["can't be blank"]);
/// ```
#[derive(Debug)]
pub struct Validator {
    definition: Arc<ValidatorDefinition>,
    attributes: Attributes,
    errors: ErrorNode,
    validated: bool,
}

impl Validator {
    pub fn new(definition: Arc<ValidatorDefinition>, attributes: Attributes) -> Self {
        Self {
            definition,
            attributes,
            errors: ErrorNode::new(),
            validated: false,
        }
    }

    /// Builds a validator for any serializable record.
    ///
    /// # Errors
    ///
    /// [`Error::Serialize`] if `record` cannot be serialized, and
    /// [`Error::NotARecord`] if it does not serialize to an object.
    pub fn from_record<T>(definition: Arc<ValidatorDefinition>, record: &T) -> Result<Self, Error>
    where
        T: Serialize + ?Sized,
    {
        let attributes = try_record(serde_json::to_value(record)?)?;
        Ok(Self::new(definition, attributes))
    }

    pub fn definition(&self) -> &ValidatorDefinition {
        &self.definition
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Runs validation unless it already ran, and reports whether the record is valid.
    ///
    /// # Errors
    ///
    /// A [`StoreFailure`] when a store-backed rule cannot reach its store.
    pub fn is_valid(&mut self) -> Result<bool, StoreFailure> {
        if !self.validated {
            self.validate()?;
        }
        Ok(self.errors.is_empty())
    }

    /// Runs validation, replacing the previous error tree.
    ///
    /// # Errors
    ///
    /// A [`StoreFailure`] when a store-backed rule cannot reach its store. The
    /// validator is then left unvalidated with an empty tree.
    pub fn validate(&mut self) -> Result<(), StoreFailure> {
        let model_name = self.definition.model_name();
        enter_span!("validate", model = model_name);

        self.validated = false;
        self.errors = ErrorNode::new();

        let mut ctx = ValidationContext::new(&self.definition, &self.attributes);
        engine::run(&self.definition, &mut ctx)
            .map_err(|err| err.with_context(format!("validating {model_name}")))?;
        let errors = ctx.into_errors();

        trace_event!(debug, errors = errors.error_count(), "validation finished");
        self.errors = errors;
        self.validated = true;
        Ok(())
    }

    /// Validates and hands the attributes back when the record is valid.
    ///
    /// # Errors
    ///
    /// [`Error::Invalid`] carrying the error tree when the record is invalid,
    /// [`Error::Store`] when a store-backed rule fails.
    pub fn call(mut self) -> Result<Attributes, Error> {
        self.validate()?;
        if self.errors.is_empty() {
            Ok(self.attributes)
        } else {
            let model_name = self.definition.model_name().to_owned();
            Err(ValidationError::new(model_name, self.errors).into())
        }
    }

    /// Error tree of the last run; empty before the first run.
    pub fn errors(&self) -> &ErrorNode {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorNode {
        self.errors
    }
}
