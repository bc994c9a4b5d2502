//! Declarative record normalization
//!
//! This module reshapes JSON records according to an ordered list of rules.
//! Each rule reads one or more source paths, optionally passes the values
//! through a transform, and writes the result at a target path.
//!
//! # Module Organization
//!
//! - [`types`] - Rules, sources, transforms and transform errors
//! - [`pipeline`] - The normalization engine
//! - [`builder`] - Fluent builder API for creating rules
//! - [`built_in`] - Ready-made transforms
//! - [`registry`] - Transforms addressable by name
//! - [`document`] - Rules declared as JSON or YAML data
//!
//! # Examples
//!
//! ## Renaming while keeping other fields
//!
//! ```
//! use normalize_core::{normalize, Rule};
//! use serde_json::json;
//!
//! let source = json!({"name": "Mario", "surname": "Rossi", "years": 30});
//! let rules = vec![Rule::rename("age", "years").unwrap()];
//!
//! let output = normalize(source.as_object().unwrap(), &rules, true).unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(output),
//!     json!({"name": "Mario", "surname": "Rossi", "age": 30})
//! );
//! ```
//!
//! ## Transform with extra arguments
//!
//! ```
//! use normalize_core::{built_in, Normalizer, RuleBuilder};
//! use serde_json::json;
//!
//! let normalizer = Normalizer::new().add_rule(
//!     RuleBuilder::new("firstHobby")
//!         .source("hobbies")
//!         .transform(built_in::take_first_n())
//!         .arg(1)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let output = normalizer
//!     .normalize_value(&json!({"hobbies": ["Golf", "Football", "Tennis"]}))
//!     .unwrap();
//! assert_eq!(output, json!({"firstHobby": "Golf"}));
//! ```
//!
//! Copyright (c) 2025 Normalize Data Team
//! Licensed under the Apache-2.0 license

// Core types and error definitions
pub mod types;

// Normalization engine
pub mod pipeline;

// Rule builder API
pub mod builder;

// Pre-configured transforms
pub mod built_in;

// Name-based transform lookup
pub mod registry;

// Data-declared rules
pub mod document;


pub use types::{Record, Rule, Source, Transform, TransformError, TransformFn, TransformResult, ValueType};
pub use pipeline::{normalize, Normalizer};
pub use builder::RuleBuilder;
pub use registry::TransformRegistry;
pub use document::{RuleDocument, RuleSpec, SourceSpec};
