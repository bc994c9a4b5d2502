//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random records,
//! values and dot paths for property testing.

#![cfg(test)]

use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for generating object keys that never parse as indices
pub fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,8}"
}

/// Strategy for generating simple JSON values with controlled depth
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        16, // max size
        4,  // items per collection
        |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(Value::Array),
                hash_map(key_strategy(), inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for generating top-level records
pub fn object_strategy() -> impl Strategy<Value = Value> {
    hash_map(key_strategy(), json_value_strategy(), 0..6)
        .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>()))
}

/// Strategy for generating dot paths, with small index segments mixed in
pub fn path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        3 => key_strategy(),
        1 => (0usize..4).prop_map(|i| i.to_string()),
    ];

    vec(segment, 1..4).prop_map(|segments| segments.join("."))
}
