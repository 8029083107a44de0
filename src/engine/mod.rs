//! Runs a definition against one record and recurses into embedded records.
//!
//! Order within a node is fixed: field rules, then free validations, then
//! embedded definitions, each in declaration order. Messages are only ever
//! added, so the same input always yields the same tree.
use crate::context::ValidationContext;
use crate::definition::ValidatorDefinition;
use crate::error::StoreFailure;
use crate::macros::trace_event;
use crate::types::ComposableError;

pub mod embedded;

/// Populates `ctx`'s error node from `definition`.
///
/// # Errors
///
/// Returns a [`StoreFailure`] when a store-backed rule cannot reach its store.
/// The run stops there; the failure carries the path of the failing rule.
pub fn run<'a>(
    definition: &'a ValidatorDefinition,
    ctx: &mut ValidationContext<'a>,
) -> Result<(), StoreFailure> {
    for (field, rule) in definition.field_rules() {
        let messages = rule.evaluate(field, ctx.get(field), ctx).map_err(|err| {
            trace_event!(
                warn,
                model = definition.model_name(),
                path = ctx.path(),
                field,
                rule = rule.name(),
                error = %err,
                "rule could not reach its store"
            );
            ComposableError::new(err).with_context(format!("{} on '{}'", rule.name(), field))
        })?;
        ctx.errors_mut().extend(field, messages);
    }

    for validation in definition.free_validations() {
        validation(&mut *ctx);
    }

    for (field, spec) in definition.embedded_validators() {
        embedded::dispatch(field, spec, ctx)?;
    }

    Ok(())
}
