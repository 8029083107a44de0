//! Per-node runtime state of a validation run.
use serde_json::Value;

use crate::definition::ValidatorDefinition;
use crate::types::ErrorNode;
use crate::Attributes;

/// State handed to rules and free validations while one record is validated.
///
/// Every context of a run shares the same `root`; `parent` is the record one
/// level up (`None` at the root). Records are borrowed read-only for the whole
/// run; the only thing a context owns is the [`ErrorNode`] it is filling.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validation_rail::prelude::*;
/// use validation_rail::engine;
///
/// let definition = ValidatorDefinition::builder("User").build().unwrap();
/// let attributes = try_record(json!({"name": "Jade"})).unwrap();
///
/// let mut ctx = ValidationContext::new(&definition, &attributes);
/// ctx.add_base("checked by hand");
/// engine::run(&definition, &mut ctx).unwrap();
///
/// assert!(ctx.parent().is_none());
/// assert_eq!(ctx.errors().base(), ["checked by hand"]);
/// ```
#[derive(Debug)]
pub struct ValidationContext<'a> {
    definition: &'a ValidatorDefinition,
    attributes: &'a Attributes,
    root: &'a Attributes,
    parent: Option<&'a Attributes>,
    path: String,
    errors: ErrorNode,
}

impl<'a> ValidationContext<'a> {
    /// Creates the root context of a run.
    pub fn new(definition: &'a ValidatorDefinition, attributes: &'a Attributes) -> Self {
        Self {
            definition,
            attributes,
            root: attributes,
            parent: None,
            path: String::new(),
            errors: ErrorNode::new(),
        }
    }

    /// Creates the context of an embedded record one level below `self`.
    ///
    /// `segment` names the record relative to this node, e.g. `address` or
    /// `tasks[2]`.
    pub fn child(
        &self,
        definition: &'a ValidatorDefinition,
        attributes: &'a Attributes,
        segment: &str,
    ) -> ValidationContext<'a> {
        let path = if self.path.is_empty() {
            segment.to_owned()
        } else {
            format!("{}.{}", self.path, segment)
        };
        ValidationContext {
            definition,
            attributes,
            root: self.root,
            parent: Some(self.attributes),
            path,
            errors: ErrorNode::new(),
        }
    }

    /// The record being validated at this node.
    pub fn attributes(&self) -> &'a Attributes {
        self.attributes
    }

    /// The top-level record of the run.
    pub fn root(&self) -> &'a Attributes {
        self.root
    }

    /// The record that embeds this one.
    pub fn parent(&self) -> Option<&'a Attributes> {
        self.parent
    }

    /// Value of `field` in the current record.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.attributes.get(field)
    }

    pub fn definition(&self) -> &'a ValidatorDefinition {
        self.definition
    }

    pub fn model_name(&self) -> &'a str {
        self.definition.model_name()
    }

    /// Data source store-backed rules query, if the definition declares one.
    pub fn relation(&self) -> Option<&'a str> {
        self.definition.relation()
    }

    pub fn primary_key(&self) -> &'a str {
        self.definition.primary_key()
    }

    /// Location of this node in the root record; empty at the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn errors(&self) -> &ErrorNode {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ErrorNode {
        &mut self.errors
    }

    /// Records `message` under `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Records a record-level `message`.
    pub fn add_base(&mut self, message: impl Into<String>) {
        self.errors.add_base(message);
    }

    pub fn into_errors(self) -> ErrorNode {
        self.errors
    }
}
