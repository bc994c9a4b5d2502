//! Property-based tests for dot-path access
//!
//! These tests verify that writes are observable through reads and that
//! deletes undo writes into empty records.

use super::{delete, get, set, FieldPath};
use crate::proptest_strategies::{json_value_strategy, object_strategy, path_strategy};
use proptest::prelude::*;
use serde_json::{json, Value};

proptest! {
    #[test]
    fn prop_set_then_get_round_trips(path in path_strategy(), value in json_value_strategy()) {
        let mut data = json!({});
        set(&mut data, &path, value.clone()).unwrap();
        prop_assert_eq!(get(&data, &path), Some(&value));
    }

    #[test]
    fn prop_set_into_existing_record_round_trips(
        base in object_strategy(),
        path in path_strategy(),
        value in json_value_strategy(),
    ) {
        let mut data = base;
        set(&mut data, &path, value.clone()).unwrap();
        prop_assert_eq!(get(&data, &path), Some(&value));
    }

    #[test]
    fn prop_delete_after_set_leaves_path_absent(path in path_strategy(), value in json_value_strategy()) {
        let parsed = FieldPath::parse(&path).unwrap();
        let mut data = json!({});
        parsed.set(&mut data, value.clone()).unwrap();
        prop_assert_eq!(delete(&mut data, &path).unwrap(), Some(value));
        // Trailing array slots shift, so only object keys are guaranteed absent
        if matches!(parsed.segments().last(), Some(super::Segment::Key(_))) {
            prop_assert!(!parsed.exists(&data));
        }
    }

    #[test]
    fn prop_get_never_panics(data in json_value_strategy(), path in "[a-z0-9.]{0,20}") {
        let _ = get(&data, &path);
    }

    #[test]
    fn prop_parse_display_round_trips(path in path_strategy()) {
        let parsed = FieldPath::parse(&path).unwrap();
        prop_assert_eq!(parsed.to_string(), path);
    }
}

#[test]
fn test_set_root_scalar_is_replaced() {
    let mut data = Value::Null;
    set(&mut data, "a", json!(1)).unwrap();
    assert_eq!(data, json!({"a": 1}));
}
