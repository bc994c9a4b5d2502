//! Shared utilities for command handlers

use crate::error::{Error, Result};
use anyhow::Context;
use normalize_core::RuleDocument;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Whether a path argument stands for standard input
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Read a file, or standard input for `-`
pub fn read_source(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("reading standard input")?;
        return Ok(content);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "File read");
    Ok(content)
}

/// Parse a JSON or YAML document into a value
///
/// The extension picks the format. Standard input is tried as JSON first,
/// then as YAML.
pub fn parse_value(path: &Path, content: &str) -> Result<Value> {
    let invalid = |expected: &str, reason: String| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: expected.to_string(),
        reason,
    };

    if is_yaml(path) {
        serde_yaml::from_str(content).map_err(|e| invalid("YAML", e.to_string()))
    } else if is_stdin(path) {
        serde_json::from_str(content).or_else(|json_err| {
            serde_yaml::from_str(content)
                .map_err(|_| invalid("JSON or YAML", json_err.to_string()))
        })
    } else {
        serde_json::from_str(content).map_err(|e| invalid("JSON", e.to_string()))
    }
}

/// Load a JSON or YAML document from a file or standard input
pub fn load_value(path: &Path) -> Result<Value> {
    let content = read_source(path)?;
    parse_value(path, &content)
}

/// Load a rule document
pub fn load_rules(path: &Path) -> Result<RuleDocument> {
    let value = load_value(path)?;
    Ok(RuleDocument::from_value(value)?)
}

/// Display name for a path argument
pub fn display_name(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}
