use regex::Regex;
use serde_json::Value;

use crate::context::ValidationContext;
use crate::rule::{Rule, RuleResult};
use crate::types::Messages;

pub const INVALID_MESSAGE: &str = "is invalid";

/// Requires string values to match a regular expression.
///
/// Absent and `null` values pass; pair with [`Presence`](super::Presence) to
/// require them. Non-string values are reported as invalid.
#[derive(Debug, Clone)]
pub struct Format {
    pattern: Regex,
    message: Option<String>,
}

impl Format {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(pattern: Regex) -> Self {
        Self {
            pattern,
            message: None,
        }
    }

    /// Replaces the default "is invalid" message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn failure(&self) -> Messages {
        Messages::from(self.message.as_deref().unwrap_or(INVALID_MESSAGE))
    }
}

impl Rule for Format {
    fn name(&self) -> &str {
        "format"
    }

    fn evaluate(&self, _field: &str, value: Option<&Value>, _ctx: &ValidationContext<'_>) -> RuleResult {
        match value {
            None | Some(Value::Null) => Ok(Messages::new()),
            Some(Value::String(s)) if self.pattern.is_match(s) => Ok(Messages::new()),
            Some(_) => Ok(self.failure()),
        }
    }
}
