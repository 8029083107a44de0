//! Error types surfaced by the crate.
//!
//! An invalid record is normally a *result*, not a failure: `is_valid`,
//! `validate` and `errors` always answer with the error tree. Failures are
//! reserved for:
//!
//! - [`Error::Invalid`], raised only by `call` when the tree is non-empty
//! - [`StoreFailure`], when a store-backed rule cannot reach its store
//! - [`DefinitionErrors`], when a declaration is inconsistent
use core::fmt;

use crate::store::StoreError;
use crate::types::{ComposableError, ErrorNode, ErrorVec};

/// A store failure annotated with the path where the lookup happened.
pub type StoreFailure = ComposableError<StoreError>;

/// Returned by `call` when the record has validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    model_name: String,
    errors: ErrorNode,
}

impl ValidationError {
    pub fn new(model_name: impl Into<String>, errors: ErrorNode) -> Self {
        Self {
            model_name: model_name.into(),
            errors,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// The full error tree of the failed run.
    pub fn errors(&self) -> &ErrorNode {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorNode {
        self.errors
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is invalid: {}", self.model_name, self.errors)
    }
}

impl std::error::Error for ValidationError {}

/// Crate-level error.
#[derive(Debug)]
pub enum Error {
    /// The record failed validation.
    Invalid(ValidationError),
    /// A rule could not consult its uniqueness store.
    Store(StoreFailure),
    /// The value handed to the validator is not a record.
    NotARecord { found: &'static str },
    /// The value could not be converted into a record.
    Serialize(serde_json::Error),
}

impl Error {
    /// The error tree, when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ErrorNode> {
        match self {
            Error::Invalid(err) => Some(err.errors()),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Error::Invalid(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Invalid(err) => fmt::Display::fmt(err, f),
            Error::Store(err) => write!(f, "uniqueness store failure: {err}"),
            Error::NotARecord { found } => write!(f, "expected a record, found {found}"),
            Error::Serialize(err) => write!(f, "record could not be serialized: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Invalid(err) => Some(err),
            Error::Store(err) => Some(err),
            Error::NotARecord { .. } => None,
            Error::Serialize(err) => Some(err),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Invalid(err)
    }
}

impl From<StoreFailure> for Error {
    fn from(err: StoreFailure) -> Self {
        Error::Store(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err)
    }
}

/// What is wrong with a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionErrorKind {
    /// The field is both a rule target and an embedded validator.
    RuleAndEmbedOverlap,
    /// The field has two embedded validators.
    DuplicateEmbedded,
    /// A rule needs a relation but the definition declares none.
    MissingRelation { rule: String },
    /// No rule of that name is registered.
    UnknownRule { rule: String },
    /// The registered rule rejected its options.
    InvalidOptions { rule: String, reason: String },
}

/// One declaration problem, located by model and field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionError {
    model: String,
    field: String,
    kind: DefinitionErrorKind,
}

impl DefinitionError {
    pub fn new(
        model: impl Into<String>,
        field: impl Into<String>,
        kind: DefinitionErrorKind,
    ) -> Self {
        Self {
            model: model.into(),
            field: field.into(),
            kind,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> &DefinitionErrorKind {
        &self.kind
    }

    pub(crate) fn within(mut self, model: &str) -> Self {
        self.model = model.to_owned();
        self
    }
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (model, field) = (&self.model, &self.field);
        match &self.kind {
            DefinitionErrorKind::RuleAndEmbedOverlap => write!(
                f,
                "{model}.{field} is declared both as a rule target and as an embedded validator"
            ),
            DefinitionErrorKind::DuplicateEmbedded => {
                write!(f, "{model}.{field} declares more than one embedded validator")
            },
            DefinitionErrorKind::MissingRelation { rule } => write!(
                f,
                "{model}.{field}: rule '{rule}' requires a relation but none is declared"
            ),
            DefinitionErrorKind::UnknownRule { rule } => {
                write!(f, "{model}.{field}: no rule named '{rule}' is registered")
            },
            DefinitionErrorKind::InvalidOptions { rule, reason } => {
                write!(f, "{model}.{field}: invalid options for '{rule}': {reason}")
            },
        }
    }
}

impl std::error::Error for DefinitionError {}

/// Every problem found while building a definition tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionErrors {
    errors: ErrorVec<DefinitionError>,
}

impl DefinitionErrors {
    pub fn iter(&self) -> core::slice::Iter<'_, DefinitionError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<ErrorVec<DefinitionError>> for DefinitionErrors {
    fn from(errors: ErrorVec<DefinitionError>) -> Self {
        Self { errors }
    }
}

impl<'a> IntoIterator for &'a DefinitionErrors {
    type Item = &'a DefinitionError;
    type IntoIter = core::slice::Iter<'a, DefinitionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for DefinitionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            fmt::Display::fmt(err, f)?;
        }
        Ok(())
    }
}

impl std::error::Error for DefinitionErrors {}
