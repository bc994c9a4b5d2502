// Transforming values on the way through, in code and from a rule document
// Usage: cargo run --example transforms

use normalize_core::{built_in, Normalizer, Rule, RuleBuilder, RuleDocument, TransformRegistry};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Capitalize the first letter of the name
    let capitalize = Normalizer::new()
        .add_rule(Rule::map("name", "name", built_in::capitalize())?)
        .preserve(true);
    let output = capitalize.normalize_value(&json!({"name": "mario", "surname": "Rossi"}))?;
    println!("capitalize:\n{}\n", serde_json::to_string_pretty(&output)?);

    // Keep only the first two hobbies
    let first_two = Normalizer::new()
        .add_rule(
            RuleBuilder::new("hobbies")
                .source("hobbies")
                .transform(built_in::take_first_n())
                .arg(2)
                .build()?,
        )
        .preserve(true);
    let output = first_two.normalize_value(&json!({
        "name": "Mario",
        "surname": "Rossi",
        "hobbies": ["Golf", "Football", "Tennis"]
    }))?;
    println!("take_first_n:\n{}\n", serde_json::to_string_pretty(&output)?);

    // The same kind of rules, declared as data
    let document = RuleDocument::from_json_str(
        r#"{
            "preserve": false,
            "rules": [
                ["fullName", ["name", "surname"], "concat"],
                ["email", "info.email"],
                ["tags", "tags", "split_list"],
                ["firstHobby", "hobbies", "take_first_n", 1],
                ["filteredDescription", "description", "filter_words", [["description", "filtered"], "***"]]
            ]
        }"#,
    )?;
    let normalizer = document.into_normalizer(&TransformRegistry::with_builtins(), None)?;
    let output = normalizer.normalize_value(&json!({
        "name": "Mario",
        "surname": "Rossi",
        "info": {"email": "mariorossi@email.com", "twitter": "@mariorossitweeter"},
        "tags": "Javascript, CSS, HTML",
        "description": "This is a description where some words will be filtered.",
        "hobbies": ["Golf", "Football", "Tennis"]
    }))?;
    println!("rule document:\n{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
