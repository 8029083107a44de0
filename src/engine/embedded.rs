//! Cardinality-aware recursion into embedded records.
use serde_json::Value;

use crate::context::ValidationContext;
use crate::definition::{Cardinality, EmbeddedSpec, ValidatorDefinition};
use crate::engine;
use crate::error::StoreFailure;
use crate::macros::trace_event;
use crate::rules::{BLANK_MESSAGE, INVALID_MESSAGE};
use crate::types::{ErrorNode, Nested};
use crate::Attributes;

/// Validates the value of `field` against `spec` and records the outcome in
/// `ctx`.
///
/// - absent or `null`: "can't be blank" on `field` when presence is required,
///   nothing otherwise
/// - single record: one child node under `field`, even when empty
/// - list: one child node per element, index-aligned, even when empty
/// - anything else: "is invalid" on `field`; a list element that is not a
///   record gets "is invalid" on its own node's base key
///
/// # Errors
///
/// Propagates [`StoreFailure`] from any nested run, with the element path
/// pushed as context.
pub fn dispatch<'a>(
    field: &str,
    spec: &'a EmbeddedSpec,
    ctx: &mut ValidationContext<'a>,
) -> Result<(), StoreFailure> {
    let value = match ctx.get(field) {
        None | Some(Value::Null) => {
            trace_event!(trace, field, required = spec.requires_presence(), "embedded value missing");
            if spec.requires_presence() {
                ctx.add(field, BLANK_MESSAGE);
            }
            return Ok(());
        },
        Some(value) => value,
    };

    match (spec.cardinality(), value) {
        (Cardinality::Single, Value::Object(record)) => {
            let child = visit(field, spec.definition(), record, ctx)?;
            ctx.errors_mut().attach(field, Nested::One(child));
        },
        (Cardinality::List, Value::Array(items)) => {
            trace_event!(trace, field, len = items.len(), "validating embedded list");
            let mut children = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let child = match item {
                    Value::Object(record) => {
                        visit(&format!("{field}[{index}]"), spec.definition(), record, ctx)?
                    },
                    _ => {
                        let mut node = ErrorNode::new();
                        node.add_base(INVALID_MESSAGE);
                        node
                    },
                };
                children.push(child);
            }
            ctx.errors_mut().attach(field, Nested::Many(children));
        },
        _ => ctx.add(field, INVALID_MESSAGE),
    }

    Ok(())
}

fn visit<'a>(
    segment: &str,
    definition: &'a ValidatorDefinition,
    record: &'a Attributes,
    parent: &ValidationContext<'a>,
) -> Result<ErrorNode, StoreFailure> {
    let mut child = parent.child(definition, record, segment);
    engine::run(definition, &mut child).map_err(|err| err.with_context(segment))?;
    Ok(child.into_errors())
}
