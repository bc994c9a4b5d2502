//! Core types for the normalization engine
//!
//! This module defines rules, their source specifiers, transforms and the
//! errors transforms report.
//!
//! Copyright (c) 2025 Normalize Data Team
//! Licensed under the Apache-2.0 license

use crate::path::FieldPath;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// An ordered mapping from string keys to values
pub type Record = Map<String, Value>;

/// Errors a transform can report about its arguments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// An argument had the wrong JSON type
    #[error("argument {position} must be {expected}, got {found}")]
    TypeMismatch {
        position: usize,
        expected: ValueType,
        found: ValueType,
    },

    /// A required argument was not supplied
    #[error("missing argument {position} ({name})")]
    MissingArgument { position: usize, name: String },

    /// An argument had the right type but an unusable value
    #[error("invalid argument {position}: {message}")]
    InvalidArgument { position: usize, message: String },

    /// Any other failure
    #[error("{0}")]
    Failed(String),
}

/// What a transform produces: a value, or `None` to leave the target untouched
pub type TransformResult = std::result::Result<Option<Value>, TransformError>;

/// Signature shared by all transforms
pub type TransformFn = dyn Fn(&[Value]) -> TransformResult + Send + Sync;

/// JSON value kinds, used in transform error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

impl ValueType {
    /// Kind of the given value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::Bool(_) => ValueType::Boolean,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
            Value::Null => ValueType::Null,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "a string",
            ValueType::Number => "a number",
            ValueType::Boolean => "a boolean",
            ValueType::Array => "an array",
            ValueType::Object => "an object",
            ValueType::Null => "null",
        };
        f.write_str(name)
    }
}

/// A named, shareable, pure function over resolved values
///
/// Arguments are the resolved source value (or values, for multi-source
/// rules) followed by the rule's extra arguments.
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    /// Wrap an infallible function that always produces a value
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(move |args: &[Value]| Ok(Some(func(args)))),
        }
    }

    /// Wrap a function that may fail or decline to produce a value
    pub fn fallible<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> TransformResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the transform
    pub fn apply(&self, args: &[Value]) -> TransformResult {
        (self.func)(args)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").field("name", &self.name).finish()
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        // Functions are compared by name only
        self.name == other.name
    }
}

/// Where a rule reads its input from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// One path; the rule is skipped when it is absent
    Single(FieldPath),
    /// Several paths resolved independently, in order
    Multi(Vec<FieldPath>),
}

impl Source {
    /// Every path this source reads
    pub fn paths(&self) -> &[FieldPath] {
        match self {
            Source::Single(path) => std::slice::from_ref(path),
            Source::Multi(paths) => paths,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Single(path) => write!(f, "{}", path),
            Source::Multi(paths) => {
                let joined: Vec<&str> = paths.iter().map(FieldPath::as_str).collect();
                write!(f, "[{}]", joined.join(", "))
            }
        }
    }
}

/// A single mapping rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Where the result is written in the output record
    pub target: FieldPath,
    /// Where the input is read from in the source record
    pub source: Source,
    /// Optional function applied to the resolved value(s)
    pub transform: Option<Transform>,
    /// Fixed arguments appended after the resolved value(s)
    pub args: Vec<Value>,
}

impl Rule {
    /// Source paths that preserve mode removes after this rule writes its target
    pub fn consumed_paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.source
            .paths()
            .iter()
            .filter(move |path| *path != &self.target)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.target, self.source)?;
        if let Some(transform) = &self.transform {
            write!(f, " | {}", transform.name())?;
            if !self.args.is_empty() {
                let args: Vec<String> = self.args.iter().map(Value::to_string).collect();
                write!(f, "({})", args.join(", "))?;
            }
        }
        Ok(())
    }
}
