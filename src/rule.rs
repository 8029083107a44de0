//! The contract every validation rule implements.
//!
//! The engine depends only on [`Rule`]; it never inspects which concrete rule
//! it is running. Rules report zero or more messages for one field of one
//! record and may read the surrounding [`ValidationContext`] (root, parent,
//! the owning definition's relation) but never mutate it.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use validation_rail::prelude::*;
//! use validation_rail::rule::from_fn;
//!
//! let even = from_fn("even", |_field, value, _ctx| {
//!     let odd = value.and_then(|v| v.as_i64()).is_some_and(|n| n % 2 != 0);
//!     Ok(if odd { Messages::from("must be even") } else { Messages::new() })
//! });
//!
//! let definition = ValidatorDefinition::builder("Counter")
//!     .validates("count", even)
//!     .build()
//!     .unwrap();
//!
//! let errors = definition.call(try_record(json!({"count": 3})).unwrap()).unwrap_err();
//! assert_eq!(errors.validation_errors().unwrap()["count"], ["must be even"]);
//! ```
use core::fmt;

use serde_json::Value;

use crate::context::ValidationContext;
use crate::store::StoreError;
use crate::types::Messages;

/// Outcome of evaluating one rule: messages, or a store failure.
pub type RuleResult = Result<Messages, StoreError>;

/// A single validation rule.
pub trait Rule: Send + Sync + fmt::Debug {
    /// Short name used in diagnostics and in the rule registry.
    fn name(&self) -> &str;

    /// Evaluates `value` (the content of `field`, `None` when absent).
    ///
    /// Pure rules return `Ok` always. Store-backed rules return `Err` when the
    /// store cannot answer; that error must not be turned into a message.
    fn evaluate(&self, field: &str, value: Option<&Value>, ctx: &ValidationContext<'_>)
        -> RuleResult;

    /// Whether the owning definition must declare a relation.
    fn requires_relation(&self) -> bool {
        false
    }
}

/// Rule backed by a closure. Built with [`from_fn`].
pub struct FnRule<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish()
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&str, Option<&Value>, &ValidationContext<'_>) -> RuleResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, field: &str, value: Option<&Value>, ctx: &ValidationContext<'_>) -> RuleResult {
        (self.f)(field, value, ctx)
    }
}

/// Wraps a closure as a [`Rule`].
pub fn from_fn<F>(name: impl Into<String>, f: F) -> FnRule<F>
where
    F: Fn(&str, Option<&Value>, &ValidationContext<'_>) -> RuleResult + Send + Sync,
{
    FnRule {
        name: name.into(),
        f,
    }
}
