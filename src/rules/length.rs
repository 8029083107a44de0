use serde_json::Value;

use crate::context::ValidationContext;
use crate::rule::{Rule, RuleResult};
use crate::types::Messages;

/// Bounds the length of strings (in characters) and arrays (in elements).
///
/// Values of other types, including `null`, are not measured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    is: Option<usize>,
    message: Option<String>,
}

impl Length {
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    pub fn max(max: usize) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn exactly(is: usize) -> Self {
        Self {
            is: Some(is),
            ..Self::default()
        }
    }

    /// Replaces every default message with `message`.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub(crate) fn with_bounds(min: Option<usize>, max: Option<usize>, is: Option<usize>) -> Self {
        Self {
            min,
            max,
            is,
            message: None,
        }
    }

    fn report(&self, default: String) -> Messages {
        Messages::from(self.message.clone().unwrap_or(default))
    }
}

impl Rule for Length {
    fn name(&self) -> &str {
        "length"
    }

    fn evaluate(&self, _field: &str, value: Option<&Value>, _ctx: &ValidationContext<'_>) -> RuleResult {
        let len = match value {
            Some(Value::String(s)) => s.chars().count(),
            Some(Value::Array(items)) => items.len(),
            _ => return Ok(Messages::new()),
        };

        let mut messages = Messages::new();
        if let Some(is) = self.is.filter(|&is| len != is) {
            messages.extend(self.report(format!(
                "is the wrong length (should be {is} characters)"
            )));
        }
        if let Some(min) = self.min.filter(|&min| len < min) {
            messages.extend(self.report(format!("is too short (minimum is {min} characters)")));
        }
        if let Some(max) = self.max.filter(|&max| len > max) {
            messages.extend(self.report(format!("is too long (maximum is {max} characters)")));
        }
        Ok(messages)
    }
}
