//! Read-only lookup capability used by the uniqueness rule.
//!
//! The engine itself never talks to a store; only rules that need one hold an
//! `Arc<dyn UniquenessStore>`. Store failures are returned as [`StoreError`]
//! and propagate out of the run, never collapsing into "not unique".
use core::fmt;
use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::Attributes;

static NULL: Value = Value::Null;

/// A store could not answer a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    relation: String,
    message: String,
}

impl StoreError {
    pub fn new(relation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            message: message.into(),
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relation '{}': {}", self.relation, self.message)
    }
}

impl std::error::Error for StoreError {}

/// "Does another record with this value exist?"
#[derive(Debug, Clone, PartialEq)]
pub struct UniquenessQuery {
    pub relation: String,
    pub field: String,
    pub value: Value,
    /// Additional `(field, value)` pairs that must match as well.
    pub scope: Vec<(String, Value)>,
    /// Identity of the record under validation, excluded from the match.
    pub exclude: Option<(String, Value)>,
}

impl UniquenessQuery {
    pub fn new(relation: impl Into<String>, field: impl Into<String>, value: Value) -> Self {
        Self {
            relation: relation.into(),
            field: field.into(),
            value,
            scope: Vec::new(),
            exclude: None,
        }
    }

    pub fn scoped(mut self, field: impl Into<String>, value: Value) -> Self {
        self.scope.push((field.into(), value));
        self
    }

    pub fn excluding(mut self, field: impl Into<String>, value: Value) -> Self {
        self.exclude = Some((field.into(), value));
        self
    }

    /// Returns `true` if `record` is a conflicting match for this query.
    pub fn matches(&self, record: &Attributes) -> bool {
        let field_of = |name: &str| record.get(name).unwrap_or(&NULL);

        if field_of(self.field.as_str()) != &self.value {
            return false;
        }
        if !self.scope.iter().all(|(name, value)| field_of(name.as_str()) == value) {
            return false;
        }
        match &self.exclude {
            Some((name, identity)) => field_of(name.as_str()) != identity,
            None => true,
        }
    }
}

/// Read-only query capability over named collections.
///
/// Implementations must be safe for concurrent reads; validators running on
/// different threads may share one store.
pub trait UniquenessStore: Send + Sync {
    fn exists(&self, query: &UniquenessQuery) -> Result<bool, StoreError>;
}

/// In-memory store keyed by relation name.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validation_rail::store::{MemoryStore, UniquenessQuery, UniquenessStore};
///
/// let store = MemoryStore::new();
/// store.insert("users", json!({"id": 1, "email": "jane@doe.org"})).unwrap();
///
/// let query = UniquenessQuery::new("users", "email", json!("jane@doe.org"));
/// assert!(store.exists(&query).unwrap());
/// assert!(!store.exists(&query.excluding("id", json!(1))).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    relations: RwLock<HashMap<String, Vec<Attributes>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` to `relation`. The record must be a JSON object.
    pub fn insert(&self, relation: &str, record: Value) -> Result<(), StoreError> {
        let Value::Object(record) = record else {
            return Err(StoreError::new(relation, "only records can be stored"));
        };
        let mut relations = self
            .relations
            .write()
            .map_err(|_| StoreError::new(relation, "store lock poisoned"))?;
        relations.entry(relation.to_owned()).or_default().push(record);
        Ok(())
    }

    /// Number of records stored under `relation`.
    pub fn len(&self, relation: &str) -> usize {
        self.relations
            .read()
            .map(|relations| relations.get(relation).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut relations) = self.relations.write() {
            relations.clear();
        }
    }
}

impl UniquenessStore for MemoryStore {
    fn exists(&self, query: &UniquenessQuery) -> Result<bool, StoreError> {
        let relations = self
            .relations
            .read()
            .map_err(|_| StoreError::new(&query.relation, "store lock poisoned"))?;
        Ok(relations
            .get(&query.relation)
            .is_some_and(|records| records.iter().any(|record| query.matches(record))))
    }
}
