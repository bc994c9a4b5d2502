//! Rules declared as data
//!
//! A rule document is either a bare list of rules or an object with a `rules`
//! list and an optional `preserve` flag. Each rule is written in one of two
//! forms:
//!
//! ```text
//! ["age", "years"]
//! ["hobbies", ["hobby1", "hobby2"]]
//! ["name", "name", "capitalize"]
//! ["firstHobby", "hobbies", "take_first_n", 1]
//! ["clean", "text", "filter_words", [["bad", "worse"], "***"]]
//! {"target": "age", "source": "years", "transform": "to_number", "args": []}
//! ```
//!
//! In the list form, an array in fourth position is spread into separate
//! transform arguments and any other value becomes a single argument.
//! Transform names are resolved against a [`TransformRegistry`].
//!
//! Copyright (c) 2025 Normalize Data Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::builder::RuleBuilder;
use super::pipeline::Normalizer;
use super::registry::TransformRegistry;
use super::types::Rule;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One or several source paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    Single(String),
    Multi(Vec<String>),
}

/// A rule as written in a document, before transform names are resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub target: String,
    pub source: SourceSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
}

impl RuleSpec {
    /// Read one rule entry in either form
    pub fn from_value(entry: Value) -> Result<Self> {
        match entry {
            Value::Array(items) => Self::from_list(items),
            Value::Object(_) => serde_json::from_value(entry)
                .map_err(|e| Error::configuration(format!("malformed rule: {}", e))),
            other => Err(Error::configuration(format!(
                "a rule must be a list or an object, got {}",
                other
            ))),
        }
    }

    fn from_list(items: Vec<Value>) -> Result<Self> {
        if !(2..=4).contains(&items.len()) {
            return Err(Error::configuration(format!(
                "a rule list needs 2 to 4 entries (target, source, transform, args), got {}",
                items.len()
            )));
        }

        let mut items = items.into_iter();
        let target = match items.next() {
            Some(Value::String(target)) => target,
            other => {
                return Err(Error::configuration(format!(
                    "target must be a path string, got {}",
                    other.unwrap_or(Value::Null)
                )))
            }
        };

        let source = match items.next() {
            Some(Value::String(path)) => SourceSpec::Single(path),
            Some(Value::Array(paths)) => SourceSpec::Multi(
                paths
                    .into_iter()
                    .map(|path| match path {
                        Value::String(path) => Ok(path),
                        other => Err(Error::configuration(format!(
                            "source paths must be strings, got {}",
                            other
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            other => {
                return Err(Error::configuration(format!(
                    "source must be a path string or a list of paths, got {}",
                    other.unwrap_or(Value::Null)
                )))
            }
        };

        let transform = match items.next() {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(other) => {
                return Err(Error::configuration(format!(
                    "transform must be a transform name, got {}",
                    other
                )))
            }
        };

        let args = match items.next() {
            None => Vec::new(),
            Some(Value::Array(spread)) => spread,
            Some(single) => vec![single],
        };

        Ok(Self {
            target,
            source,
            transform,
            args,
        })
    }

    /// Build the rule, resolving the transform name
    pub fn resolve(&self, registry: &TransformRegistry) -> Result<Rule> {
        let mut builder = RuleBuilder::new(self.target.clone());
        builder = match &self.source {
            SourceSpec::Single(path) => builder.source(path.clone()),
            SourceSpec::Multi(paths) => builder.sources(paths.iter().cloned()),
        };
        if let Some(name) = &self.transform {
            builder = builder.transform(registry.resolve(name)?);
        }
        builder.args(self.args.iter().cloned()).build()
    }
}

/// A parsed rule document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleDocument {
    /// Preserve flag declared by the document, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve: Option<bool>,
    pub rules: Vec<RuleSpec>,
}

impl RuleDocument {
    /// Read a document from a JSON value
    ///
    /// Errors name the position of the offending rule.
    pub fn from_value(document: Value) -> Result<Self> {
        let (preserve, entries) = match document {
            Value::Array(entries) => (None, entries),
            Value::Object(mut fields) => {
                let preserve = match fields.shift_remove("preserve") {
                    None | Some(Value::Null) => None,
                    Some(Value::Bool(flag)) => Some(flag),
                    Some(other) => {
                        return Err(Error::configuration(format!(
                            "'preserve' must be a boolean, got {}",
                            other
                        )))
                    }
                };
                let entries = match fields.shift_remove("rules") {
                    Some(Value::Array(entries)) => entries,
                    Some(other) => {
                        return Err(Error::configuration(format!(
                            "'rules' must be a list, got {}",
                            other
                        )))
                    }
                    None => return Err(Error::configuration("document has no 'rules' list")),
                };
                if let Some(unknown) = fields.keys().next() {
                    return Err(Error::configuration(format!(
                        "unknown document field '{}'",
                        unknown
                    )));
                }
                (preserve, entries)
            }
            other => {
                return Err(Error::configuration(format!(
                    "a rule document must be a list or an object, got {}",
                    other
                )))
            }
        };

        let rules = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| RuleSpec::from_value(entry).map_err(|e| e.at_rule(index)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { preserve, rules })
    }

    /// Parse a JSON document
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Resolve every rule, in order
    pub fn resolve(&self, registry: &TransformRegistry) -> Result<Vec<Rule>> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.resolve(registry).map_err(|e| e.at_rule(index)))
            .collect()
    }

    /// Resolve into a normalizer; `preserve` overrides the document's own flag
    pub fn into_normalizer(
        &self,
        registry: &TransformRegistry,
        preserve: Option<bool>,
    ) -> Result<Normalizer> {
        let rules = self.resolve(registry)?;
        let preserve = preserve.or(self.preserve).unwrap_or(false);
        Ok(Normalizer::with_rules(rules).preserve(preserve))
    }
}
