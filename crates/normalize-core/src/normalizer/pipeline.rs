//! Normalization engine
//!
//! This module applies an ordered list of rules to a source record and builds
//! the output record, optionally starting from a copy of the source.
//!
//! Copyright (c) 2025 Normalize Data Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::types::{Record, Rule, Source, ValueType};
use serde_json::Value;

/// Values resolved for one rule
#[derive(Debug)]
enum Resolved {
    Single(Value),
    Multi(Vec<Value>),
}

impl Resolved {
    /// Transform argument list: the resolved value(s) followed by the rule's extras
    fn into_args(self, extra: &[Value]) -> Vec<Value> {
        let mut args = match self {
            Resolved::Single(value) => vec![value],
            Resolved::Multi(values) => values,
        };
        args.extend_from_slice(extra);
        args
    }

    /// Value written when the rule has no transform
    fn into_value(self) -> Value {
        match self {
            Resolved::Single(value) => value,
            Resolved::Multi(values) => Value::Array(values),
        }
    }
}

/// Resolve a rule's source against the original record
///
/// A single path that is absent yields `None`. For several paths, `None` is
/// returned only when every one of them is absent; individual gaps become null.
fn resolve(source: &Source, record: &Record) -> Option<Resolved> {
    match source {
        Source::Single(path) => path.lookup(record).cloned().map(Resolved::Single),
        Source::Multi(paths) => {
            let found: Vec<Option<&Value>> = paths.iter().map(|path| path.lookup(record)).collect();
            if found.iter().all(Option::is_none) {
                return None;
            }
            Some(Resolved::Multi(
                found
                    .into_iter()
                    .map(|value| value.cloned().unwrap_or(Value::Null))
                    .collect(),
            ))
        }
    }
}

/// Apply `rules` in order to `source` and return the new record
///
/// With `preserve`, the output starts as a deep copy of `source` and each
/// applied rule removes the source paths it read (other than its own target)
/// after writing. Without it, the output holds only what the rules wrote.
/// `source` is never modified.
pub fn normalize(source: &Record, rules: &[Rule], preserve: bool) -> Result<Record> {
    let seed = if preserve { source.clone() } else { Record::new() };
    let mut output = Value::Object(seed);

    for (index, rule) in rules.iter().enumerate() {
        let Some(resolved) = resolve(&rule.source, source) else {
            tracing::debug!(rule = index, target_path = %rule.target, source = %rule.source, "source absent, rule skipped");
            continue;
        };

        let value = match &rule.transform {
            None => resolved.into_value(),
            Some(transform) => {
                let args = resolved.into_args(&rule.args);
                tracing::trace!(rule = index, transform = transform.name(), args = ?args, "invoking transform");
                match transform.apply(&args) {
                    Ok(Some(value)) => value,
                    Ok(None) => {
                        tracing::debug!(rule = index, target_path = %rule.target, transform = transform.name(), "transform produced no value, rule skipped");
                        continue;
                    }
                    Err(e) => {
                        return Err(Error::Transform {
                            name: transform.name().to_string(),
                            target: rule.target.to_string(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        };

        rule.target
            .set(&mut output, value)
            .map_err(|e| e.at_rule(index))?;

        if preserve {
            for consumed in rule.consumed_paths() {
                consumed.delete(&mut output);
            }
        }

        tracing::debug!(rule = index, applied = %rule, "rule applied");
    }

    match output {
        Value::Object(record) => Ok(record),
        other => Err(Error::Internal {
            message: "normalized output is not an object".to_string(),
            source: anyhow::anyhow!("unexpected output {}", other),
        }),
    }
}

/// An ordered rule set ready to be applied to many records
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    /// Rules in application order
    rules: Vec<Rule>,
    /// Whether untouched source fields are carried into the output
    preserve: bool,
}

impl Normalizer {
    /// Create an empty normalizer that discards unmapped fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer over `rules`
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            preserve: false,
        }
    }

    /// Keep unmapped source fields in the output
    pub fn preserve(mut self, preserve: bool) -> Self {
        self.preserve = preserve;
        self
    }

    /// Append a rule
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules, keeping their order
    pub fn add_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.rules.extend(rules);
        self
    }

    /// Get the number of rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn preserves(&self) -> bool {
        self.preserve
    }

    /// Normalize a record
    pub fn normalize(&self, source: &Record) -> Result<Record> {
        normalize(source, &self.rules, self.preserve)
    }

    /// Normalize an arbitrary JSON value, which must be an object
    pub fn normalize_value(&self, source: &Value) -> Result<Value> {
        let record = source.as_object().ok_or_else(|| Error::InvalidInput {
            message: format!(
                "source must be an object, got {}",
                ValueType::of(source)
            ),
        })?;
        self.normalize(record).map(Value::Object)
    }
}
