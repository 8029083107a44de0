use std::sync::Arc;

use serde_json::Value;

use crate::context::ValidationContext;
use crate::macros::trace_event;
use crate::rule::{Rule, RuleResult};
use crate::store::{StoreError, UniquenessQuery, UniquenessStore};
use crate::types::Messages;

pub const TAKEN_MESSAGE: &str = "has already been taken";

/// Requires no other stored record in the definition's relation to share the
/// field's value.
///
/// Absent and `null` values are not checked. When the record carries its
/// primary key, the stored record with that identity is ignored, so updating
/// a record does not conflict with itself.
#[derive(Clone)]
pub struct Uniqueness {
    store: Arc<dyn UniquenessStore>,
    message: Option<String>,
    scope: Vec<String>,
}

impl core::fmt::Debug for Uniqueness {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Uniqueness")
            .field("message", &self.message)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl Uniqueness {
    pub fn new(store: Arc<dyn UniquenessStore>) -> Self {
        Self {
            store,
            message: None,
            scope: Vec::new(),
        }
    }

    /// Replaces the default "has already been taken" message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Narrows the constraint: a conflict also requires `field` to match.
    pub fn scope(mut self, field: impl Into<String>) -> Self {
        self.scope.push(field.into());
        self
    }

    fn query(&self, relation: &str, field: &str, value: &Value, ctx: &ValidationContext<'_>) -> UniquenessQuery {
        let mut query = UniquenessQuery::new(relation, field, value.clone());
        for scope_field in &self.scope {
            let scope_value = ctx.get(scope_field).cloned().unwrap_or(Value::Null);
            query = query.scoped(scope_field, scope_value);
        }
        match ctx.get(ctx.primary_key()) {
            Some(identity) if !identity.is_null() => query.excluding(ctx.primary_key(), identity.clone()),
            _ => query,
        }
    }
}

impl Rule for Uniqueness {
    fn name(&self) -> &str {
        "uniqueness"
    }

    fn evaluate(&self, field: &str, value: Option<&Value>, ctx: &ValidationContext<'_>) -> RuleResult {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(Messages::new());
        };
        let relation = ctx.relation().ok_or_else(|| {
            StoreError::new("", format!("model {} declares no relation", ctx.model_name()))
        })?;

        let query = self.query(relation, field, value, ctx);
        let taken = self.store.exists(&query)?;
        trace_event!(trace, relation, field, taken, "uniqueness lookup");

        if taken {
            Ok(Messages::from(self.message.as_deref().unwrap_or(TAKEN_MESSAGE)))
        } else {
            Ok(Messages::new())
        }
    }

    fn requires_relation(&self) -> bool {
        true
    }
}
