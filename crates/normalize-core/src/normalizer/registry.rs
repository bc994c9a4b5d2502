//! Named transform lookup for rules declared as data
//!
//! Copyright (c) 2025 Normalize Data Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::built_in;
use super::types::Transform;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Entry {
    transform: Transform,
    description: String,
}

/// Transforms addressable by name
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    entries: BTreeMap<String, Entry>,
}

impl TransformRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in transform
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (transform, description) in built_in::all() {
            registry.register(transform, description);
        }
        registry
    }

    /// Add a transform under its own name, replacing any previous entry
    pub fn register(&mut self, transform: Transform, description: impl Into<String>) -> &mut Self {
        let name = transform.name().to_string();
        if self.entries.contains_key(&name) {
            tracing::debug!(name = %name, "replacing registered transform");
        }
        self.entries.insert(
            name,
            Entry {
                transform,
                description: description.into(),
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&Transform> {
        self.entries.get(name).map(|entry| &entry.transform)
    }

    /// Look up a transform, failing with a configuration error when unknown
    pub fn resolve(&self, name: &str) -> Result<Transform> {
        self.get(name).cloned().ok_or_else(|| {
            let known: Vec<&str> = self.entries.keys().map(String::as_str).collect();
            Error::configuration(format!(
                "unknown transform '{}' (known: {})",
                name,
                known.join(", ")
            ))
        })
    }

    /// Names and descriptions, sorted by name
    pub fn describe(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
