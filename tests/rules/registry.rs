use std::sync::Arc;

use serde_json::json;
use validation_rail::prelude::*;
use validation_rail::rule::from_fn;
use validation_rail::DefinitionErrorKind;

use crate::common::record;

#[test]
fn defaults_do_not_include_store_backed_rules() {
    let registry = RuleRegistry::with_defaults();

    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, ["format", "length", "presence"]);
    assert!(!registry.contains("uniqueness"));

    let registry = registry.with_store(Arc::new(MemoryStore::new()));
    assert!(registry.contains("uniqueness"));
}

#[test]
fn rules_are_added_in_option_key_order() {
    let registry = RuleRegistry::with_defaults();
    let user = ValidatorDefinition::builder("User")
        .validates_with(
            &registry,
            "email",
            json!({"presence": true, "format": {"with": "@", "message": "needs an @"}}),
        )
        .build()
        .unwrap();

    let err = user.call(record(json!({"email": " "}))).unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap()["email"],
        ["needs an @", "can't be blank"]
    );
}

#[test]
fn format_accepts_a_bare_pattern() {
    let rule = RuleRegistry::with_defaults().build("format", &json!("^\\d+$")).unwrap();

    assert_eq!(rule.name(), "format");
}

#[test]
fn invalid_options_explain_themselves() {
    let registry = RuleRegistry::with_defaults();

    let err = registry.build("format", &json!("(")).unwrap_err();
    assert!(matches!(err, DefinitionErrorKind::InvalidOptions { ref rule, .. } if rule == "format"));

    let err = registry.build("length", &json!({"min": -1})).unwrap_err();
    assert_eq!(
        err,
        DefinitionErrorKind::InvalidOptions {
            rule: String::from("length"),
            reason: String::from("`min` must be a non-negative integer"),
        }
    );

    let err = registry.build("presence", &json!({"message": 3})).unwrap_err();
    assert!(matches!(err, DefinitionErrorKind::InvalidOptions { .. }));

    let err = registry.build("missing", &json!(true)).unwrap_err();
    assert_eq!(
        err,
        DefinitionErrorKind::UnknownRule {
            rule: String::from("missing")
        }
    );
}

#[test]
fn uniqueness_scope_accepts_a_list() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert("users", json!({"email": "jane@doe.org", "org": 1, "team": 2}))
        .unwrap();
    let registry = RuleRegistry::new().with_store(store);

    let user = ValidatorDefinition::builder("User")
        .relation("users")
        .validates_with(&registry, "email", json!({"uniqueness": {"scope": ["org", "team"]}}))
        .build()
        .unwrap();

    assert!(user
        .call(record(json!({"email": "jane@doe.org", "org": 1, "team": 3})))
        .is_ok());
    assert!(user
        .call(record(json!({"email": "jane@doe.org", "org": 1, "team": 2})))
        .is_err());
}

#[test]
fn custom_rules_can_be_registered() {
    let mut registry = RuleRegistry::new();
    registry.register("shout", |options| {
        let suffix = options.as_str().unwrap_or("!").to_owned();
        Ok(Arc::new(from_fn("shout", move |_, value, _| {
            let loud = value
                .and_then(|v| v.as_str())
                .is_some_and(|s| s.ends_with(suffix.as_str()));
            Ok(if loud { Messages::new() } else { Messages::from("must shout") })
        })) as Arc<dyn Rule>)
    });

    let user = ValidatorDefinition::builder("User")
        .validates_with(&registry, "greeting", json!({"shout": "!!"}))
        .build()
        .unwrap();

    assert!(user.call(record(json!({"greeting": "hey!!"}))).is_ok());
    assert_eq!(
        user.call(record(json!({"greeting": "hey"})))
            .unwrap_err()
            .validation_errors()
            .unwrap()["greeting"],
        ["must shout"]
    );
}
