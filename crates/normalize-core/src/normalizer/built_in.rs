//! Built-in transforms for common reshaping operations
//!
//! Each function returns a ready-to-use [`Transform`]. The first argument is
//! always the resolved source value; later arguments come from the rule.
//!
//! Copyright (c) 2025 Normalize Data Team
//! Licensed under the Apache-2.0 license

use super::types::{Transform, TransformError, ValueType};
use regex::RegexBuilder;
use serde_json::{Number, Value};

fn arg<'a>(args: &'a [Value], position: usize, name: &str) -> Result<&'a Value, TransformError> {
    args.get(position).ok_or_else(|| TransformError::MissingArgument {
        position,
        name: name.to_string(),
    })
}

fn str_arg<'a>(args: &'a [Value], position: usize, name: &str) -> Result<&'a str, TransformError> {
    let value = arg(args, position, name)?;
    value.as_str().ok_or(TransformError::TypeMismatch {
        position,
        expected: ValueType::String,
        found: ValueType::of(value),
    })
}

fn array_arg<'a>(
    args: &'a [Value],
    position: usize,
    name: &str,
) -> Result<&'a Vec<Value>, TransformError> {
    let value = arg(args, position, name)?;
    value.as_array().ok_or(TransformError::TypeMismatch {
        position,
        expected: ValueType::Array,
        found: ValueType::of(value),
    })
}

/// Optional string argument with a default
fn str_arg_or<'a>(
    args: &'a [Value],
    position: usize,
    name: &str,
    default: &'a str,
) -> Result<&'a str, TransformError> {
    match args.get(position) {
        None | Some(Value::Null) => Ok(default),
        Some(_) => str_arg(args, position, name),
    }
}

/// Text form of a value: strings as-is, null as empty, anything else as JSON
pub fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn map_str<F>(name: &'static str, f: F) -> Transform
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    Transform::fallible(name, move |args| {
        let text = str_arg(args, 0, "value")?;
        Ok(Some(Value::String(f(text))))
    })
}

/// Upper-case the first character of a string
pub fn capitalize() -> Transform {
    map_str("capitalize", |text| {
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    })
}

/// Lower-case a string
pub fn lowercase() -> Transform {
    map_str("lowercase", str::to_lowercase)
}

/// Upper-case a string
pub fn uppercase() -> Transform {
    map_str("uppercase", str::to_uppercase)
}

/// Strip leading and trailing whitespace
pub fn trim() -> Transform {
    map_str("trim", |text| text.trim().to_string())
}

/// Split a delimited string into a list of trimmed items
///
/// Arguments: `(text, separator = ",")`. Empty items are dropped.
pub fn split_list() -> Transform {
    Transform::fallible("split_list", |args| {
        let text = str_arg(args, 0, "value")?;
        let separator = str_arg_or(args, 1, "separator", ",")?;
        if separator.is_empty() {
            return Err(TransformError::InvalidArgument {
                position: 1,
                message: "separator must not be empty".to_string(),
            });
        }

        let items = text
            .split(separator)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect();
        Ok(Some(Value::Array(items)))
    })
}

/// Keep the first N items of a list
///
/// Arguments: `(list, n = 1)`. When at most one item is kept the result
/// collapses to that item's text form (an empty string for none).
pub fn take_first_n() -> Transform {
    Transform::fallible("take_first_n", |args| {
        let items = array_arg(args, 0, "value")?;
        let count = match args.get(1) {
            None | Some(Value::Null) => 1,
            Some(value) => value
                .as_u64()
                .and_then(|count| usize::try_from(count).ok())
                .ok_or_else(|| TransformError::InvalidArgument {
                    position: 1,
                    message: format!("count must be a non-negative integer, got {}", value),
                })?,
        };

        let kept = &items[..count.min(items.len())];
        let result = match kept {
            [] => Value::String(String::new()),
            [single] => Value::String(string_form(single)),
            many => Value::Array(many.to_vec()),
        };
        Ok(Some(result))
    })
}

/// Replace every occurrence of a list of words, ignoring case
///
/// Arguments: `(text, words, replacement = "***")`.
pub fn filter_words() -> Transform {
    Transform::fallible("filter_words", |args| {
        let text = str_arg(args, 0, "value")?;
        let words = array_arg(args, 1, "words")?;
        let replacement = str_arg_or(args, 2, "replacement", "***")?;

        let mut escaped = Vec::with_capacity(words.len());
        for word in words {
            let word = word.as_str().ok_or(TransformError::TypeMismatch {
                position: 1,
                expected: ValueType::String,
                found: ValueType::of(word),
            })?;
            if !word.is_empty() {
                escaped.push(regex::escape(word));
            }
        }
        if escaped.is_empty() {
            return Ok(Some(Value::String(text.to_string())));
        }

        let pattern = RegexBuilder::new(&escaped.join("|"))
            .case_insensitive(true)
            .build()
            .map_err(|e| TransformError::InvalidArgument {
                position: 1,
                message: e.to_string(),
            })?;
        let filtered = pattern.replace_all(text, regex::NoExpand(replacement));
        Ok(Some(Value::String(filtered.into_owned())))
    })
}

/// Join a list into a string
///
/// Arguments: `(list, separator = ",")`.
pub fn join() -> Transform {
    Transform::fallible("join", |args| {
        let items = array_arg(args, 0, "value")?;
        let separator = str_arg_or(args, 1, "separator", ",")?;
        let parts: Vec<String> = items.iter().map(string_form).collect();
        Ok(Some(Value::String(parts.join(separator))))
    })
}

fn join_present(values: &[Value], separator: &str) -> Option<Value> {
    let parts: Vec<String> = values
        .iter()
        .filter(|value| !value.is_null())
        .map(string_form)
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(Value::String(parts.join(separator)))
}

/// Join every non-null argument's text form with single spaces
///
/// Meant for multi-source rules such as `fullName <- [name, surname]`.
/// Takes no extra arguments: anything the rule adds is joined like a value.
/// Produces no value when every argument is null. Use [`concat_with`] for
/// another separator.
pub fn concat() -> Transform {
    Transform::fallible("concat", |args| Ok(join_present(args, " ")))
}

/// Join every non-null value with the separator given as the last argument
///
/// Arguments: `(values..., separator)`, so a rule
/// `fullName <- [name, surname] | concat_with("-")` yields `"Mario-Rossi"`.
/// Produces no value when every value is null.
pub fn concat_with() -> Transform {
    Transform::fallible("concat_with", |args| {
        let Some((separator, values)) = args.split_last() else {
            return Err(TransformError::MissingArgument {
                position: 0,
                name: "separator".to_string(),
            });
        };
        let separator = separator.as_str().ok_or(TransformError::TypeMismatch {
            position: values.len(),
            expected: ValueType::String,
            found: ValueType::of(separator),
        })?;
        Ok(join_present(values, separator))
    })
}

/// Parse a numeric string; numbers pass through unchanged
pub fn to_number() -> Transform {
    Transform::fallible("to_number", |args| {
        let value = arg(args, 0, "value")?;
        let text = match value {
            Value::Number(_) => return Ok(Some(value.clone())),
            Value::String(s) => s.trim(),
            other => {
                return Err(TransformError::TypeMismatch {
                    position: 0,
                    expected: ValueType::String,
                    found: ValueType::of(other),
                })
            }
        };

        if let Ok(integer) = text.parse::<i64>() {
            return Ok(Some(Value::Number(integer.into())));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(|number| Some(Value::Number(number)))
            .ok_or_else(|| TransformError::InvalidArgument {
                position: 0,
                message: format!("'{}' is not a finite number", text),
            })
    })
}

/// Text form of any value
pub fn to_string() -> Transform {
    Transform::fallible("to_string", |args| {
        let value = arg(args, 0, "value")?;
        Ok(Some(Value::String(string_form(value))))
    })
}

/// Substitute a fallback for null
///
/// Arguments: `(value, fallback)`.
pub fn default_value() -> Transform {
    Transform::fallible("default", |args| {
        let value = arg(args, 0, "value")?;
        let fallback = arg(args, 1, "fallback")?;
        Ok(Some(if value.is_null() {
            fallback.clone()
        } else {
            value.clone()
        }))
    })
}

/// Every built-in transform with a one-line description
pub fn all() -> Vec<(Transform, &'static str)> {
    vec![
        (capitalize(), "upper-case the first character of a string"),
        (lowercase(), "lower-case a string"),
        (uppercase(), "upper-case a string"),
        (trim(), "strip surrounding whitespace"),
        (split_list(), "split a delimited string into trimmed items (separator = \",\")"),
        (take_first_n(), "keep the first N list items; one item collapses to text (n = 1)"),
        (filter_words(), "replace listed words, ignoring case (words, replacement = \"***\")"),
        (join(), "join a list into a string (separator = \",\")"),
        (concat(), "join every non-null value with single spaces (no arguments)"),
        (concat_with(), "join every non-null value with the last argument as separator"),
        (to_number(), "parse a numeric string"),
        (to_string(), "text form of any value"),
        (default_value(), "substitute a fallback for null (fallback)"),
    ]
}
