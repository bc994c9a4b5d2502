//! End-to-end tests for record normalization
//!
//! These tests run complete rule sets, built both in code and from rule
//! documents, over realistic records.

use normalize_core::{
    built_in, normalize, Error, Normalizer, Record, Rule, RuleBuilder, RuleDocument,
    Transform, TransformRegistry,
};
use serde_json::{json, Value};

fn profile() -> Value {
    json!({
        "name": "Mario Rossi",
        "info": {
            "email": "mariorossi@email.com",
            "twitter": "@mariorossitweeter"
        },
        "tags": "Javascript, CSS, HTML",
        "age": 30,
        "description": "This is a description where some words will be filtered.",
        "hobbies": ["Golf", "Football", "Tennis"]
    })
}

fn profile_rules() -> Vec<Rule> {
    vec![
        Rule::rename("fullName", "name").unwrap(),
        Rule::rename("email", "info.email").unwrap(),
        Rule::map("tags", "tags", built_in::split_list()).unwrap(),
        RuleBuilder::new("firstHobby")
            .source("hobbies")
            .transform(built_in::take_first_n())
            .arg(1)
            .build()
            .unwrap(),
        RuleBuilder::new("filteredDescription")
            .source("description")
            .transform(built_in::filter_words())
            .arg(json!(["description", "filtered"]))
            .arg("***")
            .build()
            .unwrap(),
    ]
}

fn as_record(value: &Value) -> &Record {
    value.as_object().expect("fixture is an object")
}

#[test]
fn test_profile_without_preserve() {
    let output = normalize(as_record(&profile()), &profile_rules(), false).unwrap();
    assert_eq!(
        Value::Object(output),
        json!({
            "fullName": "Mario Rossi",
            "email": "mariorossi@email.com",
            "tags": ["Javascript", "CSS", "HTML"],
            "firstHobby": "Golf",
            "filteredDescription": "This is a *** where some words will be ***."
        })
    );
}

#[test]
fn test_profile_with_preserve() {
    let output = normalize(as_record(&profile()), &profile_rules(), true).unwrap();
    assert_eq!(
        Value::Object(output),
        json!({
            "fullName": "Mario Rossi",
            "email": "mariorossi@email.com",
            "info": {"twitter": "@mariorossitweeter"},
            "tags": ["Javascript", "CSS", "HTML"],
            "age": 30,
            "filteredDescription": "This is a *** where some words will be ***.",
            "firstHobby": "Golf"
        })
    );
}

#[test]
fn test_profile_from_rule_document() {
    let document = RuleDocument::from_json_str(
        r#"[
            ["fullName", "name"],
            ["email", "info.email"],
            ["tags", "tags", "split_list"],
            ["firstHobby", "hobbies", "take_first_n", 1],
            ["filteredDescription", "description", "filter_words", [["description", "filtered"], "***"]]
        ]"#,
    )
    .unwrap();
    let rules = document.resolve(&TransformRegistry::with_builtins()).unwrap();

    let from_document = normalize(as_record(&profile()), &rules, true).unwrap();
    let from_code = normalize(as_record(&profile()), &profile_rules(), true).unwrap();
    assert_eq!(from_document, from_code);
}

#[test]
fn test_rename_keeps_other_fields() {
    let source = json!({"name": "Mario", "surname": "Rossi", "years": 30});
    let output = normalize(as_record(&source), &[Rule::rename("age", "years").unwrap()], true).unwrap();
    assert_eq!(
        Value::Object(output),
        json!({"name": "Mario", "surname": "Rossi", "age": 30})
    );
}

#[test]
fn test_capitalize_in_place() {
    let source = json!({"name": "mario"});
    let output = normalize(
        as_record(&source),
        &[Rule::map("name", "name", built_in::capitalize()).unwrap()],
        false,
    )
    .unwrap();
    assert_eq!(Value::Object(output), json!({"name": "Mario"}));
}

#[test]
fn test_take_first_hobby() {
    let source = json!({"hobbies": ["Golf", "Football", "Tennis"]});
    let rule = RuleBuilder::new("firstHobby")
        .source("hobbies")
        .transform(built_in::take_first_n())
        .arg(1)
        .build()
        .unwrap();
    let output = normalize(as_record(&source), &[rule], false).unwrap();
    assert_eq!(Value::Object(output), json!({"firstHobby": "Golf"}));
}

#[test]
fn test_absent_source_path() {
    let source = json!({"a": 1});
    let output = normalize(as_record(&source), &[Rule::rename("b", "missing").unwrap()], false).unwrap();
    assert!(output.is_empty());
}

#[test]
fn test_group_address_fields() {
    let document = RuleDocument::from_value(json!({
        "preserve": true,
        "rules": [
            ["address.street", "street"],
            ["address.state", "state"],
            ["address.postalCode", "postalCode"]
        ]
    }))
    .unwrap();
    let normalizer = document
        .into_normalizer(&TransformRegistry::with_builtins(), None)
        .unwrap();

    let output = normalizer
        .normalize_value(&json!({
            "name": "Mario",
            "surname": "Rossi",
            "street": "803 11th Avenue",
            "state": "California",
            "postalCode": "94089"
        }))
        .unwrap();
    assert_eq!(
        output,
        json!({
            "name": "Mario",
            "surname": "Rossi",
            "address": {
                "street": "803 11th Avenue",
                "state": "California",
                "postalCode": "94089"
            }
        })
    );
}

#[test]
fn test_collect_hobbies_both_ways() {
    let source = json!({
        "name": "Mario",
        "surname": "Rossi",
        "hobby1": "Golf",
        "hobby2": "Football",
        "hobby3": "Tennis"
    });
    let expected = json!({
        "name": "Mario",
        "surname": "Rossi",
        "hobbies": ["Golf", "Football", "Tennis"]
    });
    let registry = TransformRegistry::with_builtins();

    let grouped = RuleDocument::from_value(json!([["hobbies", ["hobby1", "hobby2", "hobby3"]]]))
        .unwrap()
        .into_normalizer(&registry, Some(true))
        .unwrap();
    assert_eq!(grouped.normalize_value(&source).unwrap(), expected);

    let indexed = RuleDocument::from_value(json!([
        ["hobbies.0", "hobby1"],
        ["hobbies.1", "hobby2"],
        ["hobbies.2", "hobby3"]
    ]))
    .unwrap()
    .into_normalizer(&registry, Some(true))
    .unwrap();
    assert_eq!(indexed.normalize_value(&source).unwrap(), expected);
}

#[test]
fn test_keep_first_two_hobbies_in_place() {
    let source = json!({"name": "Mario", "surname": "Rossi", "hobbies": ["Golf", "Football", "Tennis"]});
    let rule = RuleBuilder::new("hobbies")
        .source("hobbies")
        .transform(built_in::take_first_n())
        .arg(2)
        .build()
        .unwrap();
    let output = Normalizer::with_rules(vec![rule])
        .preserve(true)
        .normalize_value(&source)
        .unwrap();
    assert_eq!(
        output,
        json!({"name": "Mario", "surname": "Rossi", "hobbies": ["Golf", "Football"]})
    );
}

#[test]
fn test_custom_transform_in_registry() {
    let mut registry = TransformRegistry::with_builtins();
    registry.register(
        Transform::fallible("initials", |args| {
            let initials: String = args
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|part| part.chars().next())
                .collect();
            Ok((!initials.is_empty()).then(|| Value::String(initials)))
        }),
        "first letter of each string argument",
    );

    let rules = RuleDocument::from_value(json!([
        {"target": "profile.initials", "source": ["name", "surname"], "transform": "initials"},
        {"target": "profile.fullName", "source": ["name", "surname"], "transform": "concat"}
    ]))
    .unwrap()
    .resolve(&registry)
    .unwrap();

    let source = json!({"name": "Mario", "surname": "Rossi"});
    let output = normalize(as_record(&source), &rules, false).unwrap();
    assert_eq!(
        Value::Object(output),
        json!({"profile": {"initials": "MR", "fullName": "Mario Rossi"}})
    );
}

#[test]
fn test_bad_rule_is_rejected_before_any_output() {
    let document = RuleDocument::from_value(json!([
        ["ok", "a"],
        ["broken", "b", "does_not_exist"]
    ]))
    .unwrap();
    let err = document
        .into_normalizer(&TransformRegistry::with_builtins(), None)
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(err, Error::Configuration { rule_index: Some(1), .. }));
}

#[test]
fn test_concat_separator_from_rule_document() {
    let registry = TransformRegistry::with_builtins();
    let source = json!({"n": "Mario", "s": "Rossi"});

    let dashed = RuleDocument::from_value(json!([["full", ["n", "s"], "concat_with", "-"]]))
        .unwrap()
        .into_normalizer(&registry, None)
        .unwrap();
    assert_eq!(dashed.normalize_value(&source).unwrap(), json!({"full": "Mario-Rossi"}));

    let spaced = RuleDocument::from_value(json!([["full", ["n", "s"], "concat"]]))
        .unwrap()
        .into_normalizer(&registry, None)
        .unwrap();
    assert_eq!(spaced.normalize_value(&source).unwrap(), json!({"full": "Mario Rossi"}));
}

#[test]
fn test_oversized_target_index_is_a_rule_error() {
    let document = RuleDocument::from_value(json!([
        ["name", "name"],
        ["list.18446744073709551615", "a"]
    ]))
    .unwrap();
    let err = document
        .into_normalizer(&TransformRegistry::with_builtins(), None)
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { rule_index: Some(1), .. }));
    assert!(err.to_string().contains("rule #2"));
}

#[test]
fn test_transform_failure_surfaces_rule_target() {
    let document = RuleDocument::from_value(json!([["age", "age", "to_number"]])).unwrap();
    let normalizer = document
        .into_normalizer(&TransformRegistry::with_builtins(), None)
        .unwrap();
    let err = normalizer.normalize_value(&json!({"age": "thirty"})).unwrap_err();
    assert!(matches!(err, Error::Transform { ref name, ref target, .. } if name == "to_number" && target == "age"));
}
