use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use validation_rail::prelude::*;
use validation_rail::ValidationError;

use crate::common::{record, user_with_tasks, UnavailableStore};

fn unique_email(store: Arc<dyn UniquenessStore>) -> Arc<ValidatorDefinition> {
    ValidatorDefinition::builder("User")
        .relation("users")
        .validates("email", Uniqueness::new(store))
        .build()
        .unwrap()
}

#[test]
fn call_fails_on_blank_input() {
    let user = ValidatorDefinition::builder("User")
        .validates("name", Presence::new())
        .build()
        .unwrap();

    let err = user.call(record(json!({"name": ""}))).unwrap_err();

    assert!(err.is_invalid());
    assert_eq!(err.validation_errors().unwrap()["name"], ["can't be blank"]);
}

#[test]
fn validate_records_blank_message() {
    let user = ValidatorDefinition::builder("User")
        .validates("name", Presence::new())
        .build()
        .unwrap();

    let mut validator = user.validator(record(json!({})));
    validator.validate().unwrap();

    assert_eq!(validator.errors()["name"], ["can't be blank"]);
}

#[test]
fn errors_are_empty_before_the_first_run() {
    let validator = user_with_tasks().validator(record(json!({"name": ""})));

    assert!(validator.errors().is_empty());
}

#[test]
fn call_hands_back_the_attributes() {
    let attributes = record(json!({"name": "Jade", "tasks": [{"title": "One"}]}));

    let returned = user_with_tasks().call(attributes.clone()).unwrap();

    assert_eq!(returned, attributes);
}

#[test]
fn uniqueness_uses_default_message() {
    let store = Arc::new(MemoryStore::new());
    store.insert("users", json!({"id": 1, "email": "jane@doe.org"})).unwrap();

    let mut validator = unique_email(store).validator(record(json!({"email": "jane@doe.org"})));

    assert!(!validator.is_valid().unwrap());
    assert_eq!(validator.errors()["email"], ["has already been taken"]);
}

#[test]
fn uniqueness_message_and_scope_come_from_options() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert("users", json!({"id": 1, "email": "jane@doe.org", "name": "Jane"}))
        .unwrap();
    let registry = RuleRegistry::with_defaults().with_store(store);

    let custom = ValidatorDefinition::builder("User")
        .relation("users")
        .validates_with(&registry, "email", json!({"uniqueness": {"message": "TAKEN!"}}))
        .build()
        .unwrap();
    let err = custom.call(record(json!({"email": "jane@doe.org"}))).unwrap_err();
    assert_eq!(err.validation_errors().unwrap()["email"], ["TAKEN!"]);

    let scoped = ValidatorDefinition::builder("User")
        .relation("users")
        .validates_with(&registry, "email", json!({"uniqueness": {"scope": "name"}}))
        .build()
        .unwrap();
    assert!(scoped
        .call(record(json!({"email": "jane@doe.org", "name": "Jade"})))
        .is_ok());
    assert!(scoped
        .call(record(json!({"email": "jane@doe.org", "name": "Jane"})))
        .is_err());
}

#[test]
fn uniqueness_ignores_the_record_itself() {
    let store = Arc::new(MemoryStore::new());
    store.insert("users", json!({"id": 1, "email": "jane@doe.org"})).unwrap();
    let user = unique_email(store);

    assert!(user.call(record(json!({"id": 1, "email": "jane@doe.org"}))).is_ok());
    assert!(user.call(record(json!({"id": 2, "email": "jane@doe.org"}))).is_err());
}

#[test]
fn uniqueness_skips_missing_values() {
    let user = unique_email(Arc::new(UnavailableStore));

    assert!(user.call(record(json!({"email": null}))).is_ok());
    assert!(user.call(record(json!({}))).is_ok());
}

#[test]
fn store_failure_propagates_instead_of_becoming_a_message() {
    let user = unique_email(Arc::new(UnavailableStore));
    let mut validator = user.validator(record(json!({"email": "jane@doe.org"})));

    let failure = validator.is_valid().unwrap_err();
    assert_eq!(failure.core_error().relation(), "users");
    assert_eq!(
        failure.error_chain(),
        "validating User -> uniqueness on 'email' -> relation 'users': connection refused"
    );
    assert!(validator.errors().is_empty());

    let err = user.call(record(json!({"email": "jane@doe.org"}))).unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert!(err.validation_errors().is_none());
}

#[test]
fn store_failure_in_a_nested_record_carries_its_path() {
    let store: Arc<dyn UniquenessStore> = Arc::new(UnavailableStore);
    let user = ValidatorDefinition::builder("User")
        .embedded(
            "tasks",
            Embedded::many(
                ValidatorDefinition::builder("Task")
                    .relation("tasks")
                    .validates("title", Uniqueness::new(store)),
            ),
        )
        .build()
        .unwrap();

    let failure = user
        .validator(record(json!({"tasks": [{"title": null}, {"title": "Two"}]})))
        .validate()
        .unwrap_err();

    assert_eq!(
        failure.context(),
        ["validating User", "tasks[1]", "uniqueness on 'title'"]
    );
}

#[test]
fn is_valid_matches_an_empty_tree() {
    let user = user_with_tasks();

    for input in [
        json!({"name": "Jade", "tasks": []}),
        json!({"name": "", "tasks": []}),
        json!({"name": "Jade", "tasks": [{"title": ""}]}),
    ] {
        let mut validator = user.validator(record(input));
        let valid = validator.is_valid().unwrap();
        assert_eq!(valid, validator.errors().is_empty());
    }
}

#[test]
fn validate_is_idempotent() {
    let mut validator = user_with_tasks().validator(record(json!({
        "name": "",
        "tasks": [{"title": ""}]
    })));

    validator.validate().unwrap();
    let first = validator.errors().clone();
    validator.validate().unwrap();

    assert_eq!(validator.errors(), &first);
    assert_eq!(first.error_count(), 2);
}

#[test]
fn validate_replaces_the_previous_tree() {
    let store = Arc::new(MemoryStore::new());
    let user = unique_email(Arc::clone(&store) as Arc<dyn UniquenessStore>);
    let mut validator = user.validator(record(json!({"email": "jane@doe.org"})));

    assert!(validator.is_valid().unwrap());

    store.insert("users", json!({"id": 7, "email": "jane@doe.org"})).unwrap();
    assert!(validator.is_valid().unwrap());

    validator.validate().unwrap();
    assert!(!validator.is_valid().unwrap());
    assert_eq!(validator.errors()["email"], ["has already been taken"]);

    store.clear();
    validator.validate().unwrap();
    assert!(validator.errors().is_empty());
}

#[derive(Serialize)]
struct Signup {
    name: String,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct Task {
    title: String,
}

#[test]
fn from_record_accepts_serializable_structs() {
    let signup = Signup {
        name: String::from("Jade"),
        tasks: vec![Task {
            title: String::new(),
        }],
    };

    let mut validator = Validator::from_record(user_with_tasks(), &signup).unwrap();

    assert!(!validator.is_valid().unwrap());
    assert_eq!(validator.errors().children("tasks").unwrap()[0]["title"], ["can't be blank"]);
}

#[test]
fn from_record_rejects_non_records() {
    let err = Validator::from_record(user_with_tasks(), &vec![1, 2]).unwrap_err();

    assert!(matches!(err, Error::NotARecord { found: "array" }));
    assert_eq!(err.to_string(), "expected a record, found array");
}

#[test]
fn validation_error_display_lists_paths() {
    let err = user_with_tasks()
        .call(record(json!({"name": "", "tasks": [{"title": "One"}, {"title": ""}]})))
        .unwrap_err();

    let Error::Invalid(invalid) = err else {
        panic!("expected a validation failure");
    };
    assert_eq!(invalid.model_name(), "User");
    assert_eq!(
        invalid.to_string(),
        "User is invalid: name can't be blank; tasks[1].title can't be blank"
    );

    let tree = ValidationError::into_errors(invalid);
    assert_eq!(tree.error_count(), 2);
}

#[test]
fn try_record_accepts_objects_only() {
    let attributes = try_record(json!({"name": "Jade"})).unwrap();
    assert_eq!(attributes.get("name"), Some(&json!("Jade")));

    let err = try_record(json!("Jade")).unwrap_err();
    assert!(matches!(err, Error::NotARecord { found: "string" }));
    assert!(matches!(try_record(json!(null)), Err(Error::NotARecord { found: "null" })));
}
