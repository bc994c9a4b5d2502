//! Builder for creating normalization rules
//!
//! This module provides a fluent builder API for constructing rules. Paths are
//! parsed and the rule's shape is validated once, in [`RuleBuilder::build`].
//!
//! Copyright (c) 2025 Normalize Data Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::path::FieldPath;
use super::types::{Rule, Source, Transform};
use serde_json::Value;

#[derive(Debug, Clone)]
enum PendingSource {
    Unset,
    Single(String),
    Multi(Vec<String>),
}

/// Builder for creating rules
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    target: String,
    source: PendingSource,
    transform: Option<Transform>,
    args: Vec<Value>,
}

impl RuleBuilder {
    /// Create a new rule builder writing to `target`
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            source: PendingSource::Unset,
            transform: None,
            args: Vec::new(),
        }
    }

    /// Read from a single source path
    pub fn source(mut self, path: impl Into<String>) -> Self {
        self.source = PendingSource::Single(path.into());
        self
    }

    /// Read from several source paths, passed to the transform in order
    pub fn sources<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = PendingSource::Multi(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Set the transform
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Append one extra transform argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append several extra transform arguments
    pub fn args<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.args.extend(values);
        self
    }

    /// Build the rule
    pub fn build(self) -> Result<Rule> {
        let target = FieldPath::parse(&self.target).map_err(|e| match e {
            Error::InvalidPath { message, .. } if self.target.is_empty() => {
                Error::configuration(format!("target path is required ({})", message))
            }
            other => other,
        })?;
        target.check_writable()?;

        let source = match self.source {
            PendingSource::Unset => {
                return Err(Error::configuration(format!(
                    "source path is required for target '{}'",
                    target
                )));
            }
            PendingSource::Single(path) => Source::Single(FieldPath::parse(&path)?),
            PendingSource::Multi(paths) => {
                if paths.is_empty() {
                    return Err(Error::configuration(format!(
                        "source path list for target '{}' is empty",
                        target
                    )));
                }
                Source::Multi(
                    paths
                        .iter()
                        .map(|path| FieldPath::parse(path))
                        .collect::<Result<Vec<_>>>()?,
                )
            }
        };

        if self.transform.is_none() && !self.args.is_empty() {
            return Err(Error::configuration(format!(
                "extra arguments given for target '{}' without a transform",
                target
            )));
        }

        Ok(Rule {
            target,
            source,
            transform: self.transform,
            args: self.args,
        })
    }
}

impl Rule {
    /// Start building a rule that writes to `target`
    pub fn builder(target: impl Into<String>) -> RuleBuilder {
        RuleBuilder::new(target)
    }

    /// A plain move from `source` to `target`
    pub fn rename(target: impl Into<String>, source: impl Into<String>) -> Result<Rule> {
        RuleBuilder::new(target).source(source).build()
    }

    /// Move from `source` to `target`, passing the value through `transform`
    pub fn map(
        target: impl Into<String>,
        source: impl Into<String>,
        transform: Transform,
    ) -> Result<Rule> {
        RuleBuilder::new(target)
            .source(source)
            .transform(transform)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_single_source() {
        let rule = RuleBuilder::new("age").source("years").build().unwrap();
        assert_eq!(rule.target.as_str(), "age");
        assert_eq!(rule.source, Source::Single(FieldPath::parse("years").unwrap()));
        assert!(rule.transform.is_none());
        assert!(rule.args.is_empty());
    }

    #[test]
    fn test_build_multi_source_with_args() {
        let join = Transform::new("join", |args| json!(args.len()));
        let rule = RuleBuilder::new("hobbies")
            .sources(["hobby1", "hobby2"])
            .transform(join)
            .arg(", ")
            .build()
            .unwrap();
        assert_eq!(rule.source.paths().len(), 2);
        assert_eq!(rule.args, vec![json!(", ")]);
        assert_eq!(rule.to_string(), "hobbies <- [hobby1, hobby2] | join(\", \")");
    }

    #[test]
    fn test_missing_target_is_configuration_error() {
        let err = RuleBuilder::new("").source("a").build().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("target path is required"));
    }

    #[test]
    fn test_missing_source_is_configuration_error() {
        let err = RuleBuilder::new("a").build().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_empty_source_list_is_rejected() {
        let err = RuleBuilder::new("a")
            .sources(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_malformed_source_path_is_rejected() {
        let err = RuleBuilder::new("a").source("b..c").build().unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_oversized_target_index_is_rejected() {
        let err = Rule::rename("list.18446744073709551615", "a").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("largest writable index"));
        assert!(Rule::rename("list.70000", "a").is_err());
        // Reading from a large index is fine
        assert!(Rule::rename("first", "list.4000000000").is_ok());
    }

    #[test]
    fn test_args_without_transform_are_rejected() {
        let err = RuleBuilder::new("a").source("b").arg(1).build().unwrap_err();
        assert!(err.to_string().contains("without a transform"));
    }

    #[test]
    fn test_consumed_paths_skip_target() {
        let rule = RuleBuilder::new("name")
            .sources(["name", "surname"])
            .transform(Transform::new("first", |args| args[0].clone()))
            .build()
            .unwrap();
        let consumed: Vec<&str> = rule.consumed_paths().map(FieldPath::as_str).collect();
        assert_eq!(consumed, vec!["surname"]);
    }

    #[test]
    fn test_shorthand_constructors() {
        let rule = Rule::rename("email", "info.email").unwrap();
        assert_eq!(rule.to_string(), "email <- info.email");

        let upper = Transform::new("upper", |args| args[0].clone());
        let rule = Rule::map("name", "name", upper).unwrap();
        assert_eq!(rule.transform.as_ref().map(Transform::name), Some("upper"));
    }
}
