use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::DefinitionErrorKind;
use crate::rule::Rule;
use crate::rules::{Format, Length, Presence, Uniqueness};
use crate::store::UniquenessStore;

/// Builds a rule from its JSON options, or explains why it cannot.
pub type RuleFactory = Box<dyn Fn(&Value) -> Result<Arc<dyn Rule>, String> + Send + Sync>;

/// Maps rule names to factories.
///
/// [`RuleRegistry::with_defaults`] knows `presence`, `format` and `length`;
/// [`RuleRegistry::with_store`] adds `uniqueness` backed by the given store.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validation_rail::prelude::*;
///
/// let registry = RuleRegistry::with_defaults();
/// let definition = ValidatorDefinition::builder("User")
///     .validates_with(&registry, "name", json!({"presence": true, "length": {"max": 3}}))
///     .build()
///     .unwrap();
///
/// let err = definition.call(try_record(json!({"name": "Jade"})).unwrap()).unwrap_err();
/// assert_eq!(
///     err.validation_errors().unwrap()["name"],
///     ["is too long (maximum is 3 characters)"]
/// );
/// ```
#[derive(Default)]
pub struct RuleRegistry {
    factories: BTreeMap<String, RuleFactory>,
}

impl RuleRegistry {
    /// Creates a registry with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the store-independent built-in rules.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("presence", presence);
        registry.register("format", format);
        registry.register("length", length);
        registry
    }

    /// Registers `uniqueness`, backed by `store`.
    pub fn with_store(mut self, store: Arc<dyn UniquenessStore>) -> Self {
        self.register("uniqueness", move |options| uniqueness(&store, options));
        self
    }

    /// Registers `factory` under `name`, replacing any previous factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> Result<Arc<dyn Rule>, String> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Builds the rule registered under `name` with `options`.
    pub fn build(&self, name: &str, options: &Value) -> Result<Arc<dyn Rule>, DefinitionErrorKind> {
        let factory = self.factories.get(name).ok_or_else(|| DefinitionErrorKind::UnknownRule {
            rule: name.to_owned(),
        })?;
        factory(options).map_err(|reason| DefinitionErrorKind::InvalidOptions {
            rule: name.to_owned(),
            reason,
        })
    }
}

fn message_option(options: &Value) -> Result<Option<String>, String> {
    match options.get("message") {
        None => Ok(None),
        Some(Value::String(message)) => Ok(Some(message.clone())),
        Some(_) => Err(String::from("`message` must be a string")),
    }
}

fn presence(options: &Value) -> Result<Arc<dyn Rule>, String> {
    match options {
        Value::Bool(true) => Ok(Arc::new(Presence::new())),
        Value::Object(_) => Ok(Arc::new(match message_option(options)? {
            Some(message) => Presence::with_message(message),
            None => Presence::new(),
        })),
        _ => Err(String::from("expected `true` or an options object")),
    }
}

fn format(options: &Value) -> Result<Arc<dyn Rule>, String> {
    let (pattern, message) = match options {
        Value::String(pattern) => (pattern.as_str(), None),
        Value::Object(map) => match map.get("with") {
            Some(Value::String(pattern)) => (pattern.as_str(), message_option(options)?),
            _ => return Err(String::from("`with` must be a pattern string")),
        },
        _ => return Err(String::from("expected a pattern or an options object")),
    };
    let rule = Format::new(pattern).map_err(|err| err.to_string())?;
    Ok(Arc::new(match message {
        Some(message) => rule.message(message),
        None => rule,
    }))
}

fn length(options: &Value) -> Result<Arc<dyn Rule>, String> {
    let Value::Object(map) = options else {
        return Err(String::from("expected an options object"));
    };
    let bound = |key: &str| -> Result<Option<usize>, String> {
        match map.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| format!("`{key}` must be a non-negative integer")),
        }
    };
    let (min, max, is) = (bound("min")?, bound("max")?, bound("is")?);
    if min.is_none() && max.is_none() && is.is_none() {
        return Err(String::from("one of `min`, `max` or `is` is required"));
    }
    let rule = Length::with_bounds(min, max, is);
    Ok(Arc::new(match message_option(options)? {
        Some(message) => rule.message(message),
        None => rule,
    }))
}

fn uniqueness(store: &Arc<dyn UniquenessStore>, options: &Value) -> Result<Arc<dyn Rule>, String> {
    let mut rule = Uniqueness::new(Arc::clone(store));
    match options {
        Value::Bool(true) => {},
        Value::Object(map) => {
            if let Some(message) = message_option(options)? {
                rule = rule.message(message);
            }
            match map.get("scope") {
                None => {},
                Some(Value::String(field)) => rule = rule.scope(field.as_str()),
                Some(Value::Array(fields)) => {
                    for field in fields {
                        let field = field
                            .as_str()
                            .ok_or_else(|| String::from("`scope` entries must be field names"))?;
                        rule = rule.scope(field);
                    }
                },
                Some(_) => return Err(String::from("`scope` must be a field name or a list of them")),
            }
        },
        _ => return Err(String::from("expected `true` or an options object")),
    }
    Ok(Arc::new(rule))
}
