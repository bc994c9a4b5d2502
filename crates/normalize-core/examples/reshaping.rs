// Renaming, grouping and collecting fields while preserving the rest
// Usage: cargo run --example reshaping

use normalize_core::{normalize, Record, Rule, RuleBuilder};
use serde_json::{json, Value};

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

fn print(title: &str, output: Record) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}:\n{}\n", title, serde_json::to_string_pretty(&Value::Object(output))?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // "years" is renamed to "age"; name and surname are kept
    let person = record(json!({"name": "Mario", "surname": "Rossi", "years": 30}));
    let output = normalize(&person, &[Rule::rename("age", "years")?], true)?;
    print("rename", output)?;

    // Flat address fields move under a nested "address" object
    let flat = record(json!({
        "name": "Mario",
        "surname": "Rossi",
        "street": "803 11th Avenue",
        "state": "California",
        "postalCode": "94089"
    }));
    let rules = vec![
        Rule::rename("address.street", "street")?,
        Rule::rename("address.state", "state")?,
        Rule::rename("address.postalCode", "postalCode")?,
    ];
    print("group", normalize(&flat, &rules, true)?)?;

    // Numbered fields collected into one list, either from several sources...
    let numbered = record(json!({
        "name": "Mario",
        "surname": "Rossi",
        "hobby1": "Golf",
        "hobby2": "Football",
        "hobby3": "Tennis"
    }));
    let collect = RuleBuilder::new("hobbies")
        .sources(["hobby1", "hobby2", "hobby3"])
        .build()?;
    print("collect (multi-source)", normalize(&numbered, &[collect], true)?)?;

    // ...or by writing each one at an index
    let indexed = vec![
        Rule::rename("hobbies.0", "hobby1")?,
        Rule::rename("hobbies.1", "hobby2")?,
        Rule::rename("hobbies.2", "hobby3")?,
    ];
    print("collect (indexed)", normalize(&numbered, &indexed, true)?)?;

    Ok(())
}
