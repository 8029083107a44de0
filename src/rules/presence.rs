use serde_json::Value;

use crate::context::ValidationContext;
use crate::rule::{Rule, RuleResult};
use crate::types::Messages;

/// Message recorded for blank values, by [`Presence`] and by the embedded
/// dispatcher when a required nested record is missing.
pub const BLANK_MESSAGE: &str = "can't be blank";

/// Returns `true` for values that count as missing.
///
/// Absent values, `null`, whitespace-only strings, empty arrays and empty
/// objects are blank. Booleans and numbers never are.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => false,
    }
}

/// Requires the field to be non-blank.
#[derive(Debug, Clone, Default)]
pub struct Presence {
    message: Option<String>,
}

impl Presence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default "can't be blank" message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl Rule for Presence {
    fn name(&self) -> &str {
        "presence"
    }

    fn evaluate(&self, _field: &str, value: Option<&Value>, _ctx: &ValidationContext<'_>) -> RuleResult {
        if is_blank(value) {
            Ok(Messages::from(self.message.as_deref().unwrap_or(BLANK_MESSAGE)))
        } else {
            Ok(Messages::new())
        }
    }
}
