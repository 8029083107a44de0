//! Declared shape of a validator.
//!
//! A [`ValidatorDefinition`] is assembled once through a [`DefinitionBuilder`]
//! and is immutable afterwards. It holds field rules, free-form validations
//! and embedded definitions for nested records, each kept in declaration
//! order.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use validation_rail::prelude::*;
//!
//! let user = ValidatorDefinition::builder("User")
//!     .validates("name", Presence::new())
//!     .embedded(
//!         "address",
//!         Embedded::one(
//!             ValidatorDefinition::builder("Address")
//!                 .validates_all(["street", "city", "zipcode"], Presence::new()),
//!         ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(user.embedded_validator("address").unwrap().model_name(), "Address");
//!
//! let mut validator = user.validator(try_record(json!({
//!     "name": "Jade",
//!     "address": {"street": "Main", "city": "", "zipcode": "1000"}
//! })).unwrap());
//! assert!(!validator.is_valid().unwrap());
//! assert_eq!(validator.errors().child("address").unwrap()["city"], ["can't be blank"]);
//! ```
use core::fmt;
use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;

use crate::context::ValidationContext;
use crate::error::{DefinitionError, DefinitionErrorKind, DefinitionErrors, Error};
use crate::rule::Rule;
use crate::rules::RuleRegistry;
use crate::types::ErrorVec;
use crate::validation::Validation;
use crate::validator::Validator;
use crate::Attributes;

/// Free-form validation over a whole node.
pub type FreeValidation = Box<dyn Fn(&mut ValidationContext<'_>) + Send + Sync>;

const DEFAULT_PRIMARY_KEY: &str = "id";

/// Whether an embedded field holds one record or a list of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Single,
    List,
}

/// A nested definition attached to a field of its parent definition.
#[derive(Debug)]
pub struct EmbeddedSpec {
    definition: ValidatorDefinition,
    requires_presence: bool,
    cardinality: Cardinality,
}

impl EmbeddedSpec {
    pub fn definition(&self) -> &ValidatorDefinition {
        &self.definition
    }

    /// When `true`, a missing value is reported as "can't be blank".
    pub fn requires_presence(&self) -> bool {
        self.requires_presence
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn model_name(&self) -> &str {
        self.definition.model_name()
    }
}

/// Immutable validator definition.
pub struct ValidatorDefinition {
    model_name: String,
    relation: Option<String>,
    primary_key: String,
    field_rules: Vec<(String, Arc<dyn Rule>)>,
    free_validations: Vec<FreeValidation>,
    embedded: Vec<(String, EmbeddedSpec)>,
}

impl ValidatorDefinition {
    /// Starts a declaration for `model_name`.
    pub fn builder(model_name: impl Into<String>) -> DefinitionBuilder {
        DefinitionBuilder::new().model_name(model_name)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Field rules in declaration order.
    pub fn field_rules(&self) -> impl Iterator<Item = (&str, &dyn Rule)> {
        self.field_rules
            .iter()
            .map(|(field, rule)| (field.as_str(), rule.as_ref()))
    }

    pub(crate) fn free_validations(&self) -> &[FreeValidation] {
        &self.free_validations
    }

    /// Embedded definitions in declaration order.
    pub fn embedded_validators(&self) -> impl Iterator<Item = (&str, &EmbeddedSpec)> {
        self.embedded
            .iter()
            .map(|(field, spec)| (field.as_str(), spec))
    }

    /// Embedded definition declared for `field`.
    pub fn embedded_validator(&self, field: &str) -> Option<&EmbeddedSpec> {
        self.embedded
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, spec)| spec)
    }

    /// Instantiates a validator for `attributes`.
    pub fn validator(self: &Arc<Self>, attributes: Attributes) -> Validator {
        Validator::new(Arc::clone(self), attributes)
    }

    /// Validates `attributes`, returning them when valid.
    ///
    /// # Errors
    ///
    /// [`Error::Invalid`] with the full error tree when the record is invalid,
    /// [`Error::Store`] when a store-backed rule fails.
    pub fn call(self: &Arc<Self>, attributes: Attributes) -> Result<Attributes, Error> {
        self.validator(attributes).call()
    }
}

impl fmt::Debug for ValidatorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorDefinition")
            .field("model_name", &self.model_name)
            .field("relation", &self.relation)
            .field("primary_key", &self.primary_key)
            .field("field_rules", &self.field_rules)
            .field("free_validations", &self.free_validations.len())
            .field("embedded", &self.embedded)
            .finish()
    }
}

/// Declaration of an embedded validator, consumed by [`DefinitionBuilder::embedded`].
pub struct Embedded {
    builder: DefinitionBuilder,
    requires_presence: bool,
    cardinality: Cardinality,
}

impl Embedded {
    /// The field holds a single nested record.
    pub fn one(builder: DefinitionBuilder) -> Self {
        Self {
            builder,
            requires_presence: true,
            cardinality: Cardinality::Single,
        }
    }

    /// The field holds a list of nested records.
    pub fn many(builder: DefinitionBuilder) -> Self {
        Self {
            builder,
            requires_presence: true,
            cardinality: Cardinality::List,
        }
    }

    /// Sets whether a missing value is an error (default `true`).
    pub fn presence(mut self, required: bool) -> Self {
        self.requires_presence = required;
        self
    }

    fn build(self, field: &str) -> Validation<DefinitionError, EmbeddedSpec> {
        let Embedded {
            builder,
            requires_presence,
            cardinality,
        } = self;
        builder.assemble(field).map(|definition| EmbeddedSpec {
            definition,
            requires_presence,
            cardinality,
        })
    }
}

/// Collects declarations and produces a [`ValidatorDefinition`].
///
/// Mistakes are not reported eagerly: [`build`](Self::build) checks the whole
/// tree and returns every problem it found.
#[derive(Default)]
pub struct DefinitionBuilder {
    model_name: Option<String>,
    relation: Option<String>,
    primary_key: Option<String>,
    field_rules: Vec<(String, Arc<dyn Rule>)>,
    free_validations: Vec<FreeValidation>,
    embedded: Vec<(String, Embedded)>,
    problems: ErrorVec<DefinitionError>,
}

impl DefinitionBuilder {
    /// Starts an unnamed declaration. Embedded definitions without a name
    /// take the name of the field they are attached to.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Binds the definition to a data source for store-backed rules.
    pub fn relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    /// Field identifying a stored record (default `id`).
    pub fn primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = Some(field.into());
        self
    }

    /// Adds `rule` for `field`. Rules on the same field run in declaration order.
    pub fn validates(mut self, field: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.field_rules.push((field.into(), Arc::new(rule)));
        self
    }

    /// Adds one shared `rule` for each of `fields`.
    pub fn validates_all<I, S>(mut self, fields: I, rule: impl Rule + 'static) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rule: Arc<dyn Rule> = Arc::new(rule);
        for field in fields {
            self.field_rules.push((field.into(), Arc::clone(&rule)));
        }
        self
    }

    /// Adds rules for `field` by name, resolving them through `registry`.
    ///
    /// `options` maps rule names to their options, e.g.
    /// `{"presence": true, "uniqueness": {"message": "TAKEN!"}}`. Rules are
    /// added in key order; a rule whose options are `false` is skipped.
    pub fn validates_with(
        mut self,
        registry: &RuleRegistry,
        field: impl Into<String>,
        options: Value,
    ) -> Self {
        let field = field.into();
        let Value::Object(options) = options else {
            self.problems.push(DefinitionError::new(
                "",
                &field,
                DefinitionErrorKind::InvalidOptions {
                    rule: String::from("*"),
                    reason: String::from("expected an object of rule names to options"),
                },
            ));
            return self;
        };

        for (name, rule_options) in &options {
            if rule_options == &Value::Bool(false) {
                continue;
            }
            match registry.build(name, rule_options) {
                Ok(rule) => self.field_rules.push((field.clone(), rule)),
                Err(kind) => self.problems.push(DefinitionError::new("", &field, kind)),
            }
        }
        self
    }

    /// Adds a free-form validation over the whole node.
    ///
    /// The closure sees the current record, the root and parent records, and
    /// may add messages under any field or the base key.
    pub fn validate<F>(mut self, validation: F) -> Self
    where
        F: Fn(&mut ValidationContext<'_>) + Send + Sync + 'static,
    {
        self.free_validations.push(Box::new(validation));
        self
    }

    /// Attaches an embedded validator to `field`.
    pub fn embedded(mut self, field: impl Into<String>, embedded: Embedded) -> Self {
        self.embedded.push((field.into(), embedded));
        self
    }

    /// Checks the declaration tree and produces the definition.
    ///
    /// # Errors
    ///
    /// Every [`DefinitionError`] found anywhere in the tree: a field that is
    /// both a rule target and an embed target, a field embedded twice, a
    /// store-backed rule without a relation, or a rule the registry could not
    /// build.
    pub fn build(self) -> Result<Arc<ValidatorDefinition>, DefinitionErrors> {
        self.assemble("")
            .to_result()
            .map(Arc::new)
            .map_err(DefinitionErrors::from)
    }

    fn assemble(self, fallback_name: &str) -> Validation<DefinitionError, ValidatorDefinition> {
        let DefinitionBuilder {
            model_name,
            relation,
            primary_key,
            field_rules,
            free_validations,
            embedded,
            problems,
        } = self;
        let model_name = model_name.unwrap_or_else(|| fallback_name.to_owned());

        let mut problems: Vec<DefinitionError> = problems
            .into_iter()
            .map(|problem| problem.within(&model_name))
            .collect();

        let rule_fields: BTreeSet<&str> = field_rules.iter().map(|(f, _)| f.as_str()).collect();
        let mut embedded_fields = BTreeSet::new();
        for (field, _) in &embedded {
            if !embedded_fields.insert(field.as_str()) {
                problems.push(DefinitionError::new(
                    &model_name,
                    field,
                    DefinitionErrorKind::DuplicateEmbedded,
                ));
            } else if rule_fields.contains(field.as_str()) {
                problems.push(DefinitionError::new(
                    &model_name,
                    field,
                    DefinitionErrorKind::RuleAndEmbedOverlap,
                ));
            }
        }

        if relation.is_none() {
            problems.extend(
                field_rules
                    .iter()
                    .filter(|(_, rule)| rule.requires_relation())
                    .map(|(field, rule)| {
                        DefinitionError::new(
                            &model_name,
                            field,
                            DefinitionErrorKind::MissingRelation {
                                rule: rule.name().to_owned(),
                            },
                        )
                    }),
            );
        }

        let own = Validation::from_errors((), problems);
        let nested: Validation<DefinitionError, Vec<(String, EmbeddedSpec)>> = embedded
            .into_iter()
            .map(|(field, embedded)| {
                let spec = embedded.build(&field);
                spec.map(|spec| (field, spec))
            })
            .collect();

        own.zip(nested).map(|((), embedded)| ValidatorDefinition {
            model_name,
            relation,
            primary_key: primary_key.unwrap_or_else(|| DEFAULT_PRIMARY_KEY.to_owned()),
            field_rules,
            free_validations,
            embedded,
        })
    }
}
