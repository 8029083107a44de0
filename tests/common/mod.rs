use std::sync::Arc;

use serde_json::Value;
use validation_rail::prelude::*;
use validation_rail::store::{StoreError, UniquenessQuery};

/// Fixture shorthand: the JSON object `value` as a record.
pub fn record(value: Value) -> Attributes {
    try_record(value).expect("fixture is a JSON object")
}

/// User with a required single `address` record.
pub fn user_with_address() -> Arc<ValidatorDefinition> {
    ValidatorDefinition::builder("User")
        .validates("name", Presence::new())
        .embedded(
            "address",
            Embedded::one(
                ValidatorDefinition::builder("Address")
                    .validates_all(["street", "city", "zipcode"], Presence::new()),
            ),
        )
        .build()
        .unwrap()
}

/// User with a required list of `tasks`.
pub fn user_with_tasks() -> Arc<ValidatorDefinition> {
    ValidatorDefinition::builder("User")
        .validates("name", Presence::new())
        .embedded(
            "tasks",
            Embedded::many(ValidatorDefinition::builder("Task").validates("title", Presence::new())),
        )
        .build()
        .unwrap()
}

/// Store whose every lookup fails.
pub struct UnavailableStore;

impl UniquenessStore for UnavailableStore {
    fn exists(&self, query: &UniquenessQuery) -> Result<bool, StoreError> {
        Err(StoreError::new(&query.relation, "connection refused"))
    }
}
