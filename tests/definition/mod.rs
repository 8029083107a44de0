use std::sync::Arc;
use std::thread;

use serde_json::json;
use validation_rail::prelude::*;
use validation_rail::{DefinitionErrorKind, DefinitionErrors};

use crate::common::{record, user_with_tasks};

fn kinds(errors: &DefinitionErrors) -> Vec<(&str, &str, &DefinitionErrorKind)> {
    errors
        .iter()
        .map(|err| (err.model(), err.field(), err.kind()))
        .collect()
}

#[test]
fn rule_and_embed_on_the_same_field_is_rejected() {
    let errors = ValidatorDefinition::builder("User")
        .validates("tasks", Presence::new())
        .embedded("tasks", Embedded::many(ValidatorDefinition::builder("Task")))
        .build()
        .unwrap_err();

    assert_eq!(
        kinds(&errors),
        [("User", "tasks", &DefinitionErrorKind::RuleAndEmbedOverlap)]
    );
    assert_eq!(
        errors.to_string(),
        "User.tasks is declared both as a rule target and as an embedded validator"
    );
}

#[test]
fn embedding_a_field_twice_is_rejected() {
    let errors = ValidatorDefinition::builder("User")
        .embedded("address", Embedded::one(ValidatorDefinition::builder("Address")))
        .embedded("address", Embedded::many(ValidatorDefinition::builder("Address")))
        .build()
        .unwrap_err();

    assert_eq!(
        kinds(&errors),
        [("User", "address", &DefinitionErrorKind::DuplicateEmbedded)]
    );
}

#[test]
fn store_backed_rule_needs_a_relation() {
    let store: Arc<dyn UniquenessStore> = Arc::new(MemoryStore::new());
    let errors = ValidatorDefinition::builder("User")
        .validates("email", Uniqueness::new(store))
        .build()
        .unwrap_err();

    assert_eq!(
        kinds(&errors),
        [(
            "User",
            "email",
            &DefinitionErrorKind::MissingRelation {
                rule: String::from("uniqueness")
            }
        )]
    );
}

#[test]
fn registry_problems_surface_at_build() {
    let registry = RuleRegistry::with_defaults();
    let errors = ValidatorDefinition::builder("User")
        .validates_with(&registry, "email", json!({"uniqueness": true}))
        .validates_with(&registry, "name", json!({"length": {}}))
        .build()
        .unwrap_err();

    let found = kinds(&errors);
    assert_eq!(found.len(), 2);
    assert_eq!(
        found[0],
        (
            "User",
            "email",
            &DefinitionErrorKind::UnknownRule {
                rule: String::from("uniqueness")
            }
        )
    );
    assert!(matches!(
        found[1],
        ("User", "name", DefinitionErrorKind::InvalidOptions { rule, .. }) if rule == "length"
    ));
}

#[test]
fn options_that_are_not_an_object_are_rejected() {
    let errors = ValidatorDefinition::builder("User")
        .validates_with(&RuleRegistry::with_defaults(), "name", json!(true))
        .build()
        .unwrap_err();

    assert!(matches!(
        errors.iter().next().unwrap().kind(),
        DefinitionErrorKind::InvalidOptions { .. }
    ));
}

#[test]
fn problems_across_the_tree_are_reported_together() {
    let store: Arc<dyn UniquenessStore> = Arc::new(MemoryStore::new());
    let errors = ValidatorDefinition::builder("User")
        .validates("tasks", Presence::new())
        .embedded(
            "tasks",
            Embedded::many(
                ValidatorDefinition::builder("Task")
                    .validates("title", Uniqueness::new(store))
                    .validates_with(&RuleRegistry::new(), "body", json!({"presence": true})),
            ),
        )
        .build()
        .unwrap_err();

    let found: Vec<(&str, &str)> = errors.iter().map(|err| (err.model(), err.field())).collect();
    assert_eq!(found.len(), 3);
    assert!(found.contains(&("User", "tasks")));
    assert!(found.contains(&("Task", "title")));
    assert!(found.contains(&("Task", "body")));
}

#[test]
fn false_options_skip_the_rule() {
    let registry = RuleRegistry::with_defaults();
    let user = ValidatorDefinition::builder("User")
        .validates_with(&registry, "name", json!({"presence": false, "length": {"max": 10}}))
        .build()
        .unwrap();

    let names: Vec<&str> = user.field_rules().map(|(_, rule)| rule.name()).collect();
    assert_eq!(names, ["length"]);
    assert!(user.call(record(json!({}))).is_ok());
}

#[test]
fn introspection_reports_declarations() {
    let user = ValidatorDefinition::builder("User")
        .relation("users")
        .primary_key("uuid")
        .validates_all(["name", "email"], Presence::new())
        .build()
        .unwrap();

    assert_eq!(user.model_name(), "User");
    assert_eq!(user.relation(), Some("users"));
    assert_eq!(user.primary_key(), "uuid");

    let fields: Vec<&str> = user.field_rules().map(|(field, _)| field).collect();
    assert_eq!(fields, ["name", "email"]);
    assert_eq!(user.embedded_validators().count(), 0);

    let defaults = user_with_tasks();
    assert_eq!(defaults.relation(), None);
    assert_eq!(defaults.primary_key(), "id");
    assert!(defaults.embedded_validator("address").is_none());
}

#[test]
fn definitions_are_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ValidatorDefinition>();
    assert_send_sync::<Validator>();

    let user = user_with_tasks();
    let inputs = [
        json!({"name": "Jade", "tasks": [{"title": "One"}]}),
        json!({"name": "", "tasks": [{"title": ""}]}),
        json!({"name": "Jane"}),
    ];

    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let user = Arc::clone(&user);
                scope.spawn(move || {
                    let mut validator = user.validator(record(input.clone()));
                    validator.validate().unwrap();
                    validator.errors().error_count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, [0, 2, 1]);
}
