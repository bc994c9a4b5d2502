//! Error types for the normalize core library
//!
//! This module defines the error handling system for rule construction and
//! normalization, using thiserror for ergonomic error definitions and anyhow
//! for flexible error contexts.

use thiserror::Error;

/// Main error type for normalize operations
#[derive(Error, Debug)]
pub enum Error {
    /// A rule is structurally invalid
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        /// 0-based position of the offending rule in its rule set, when known
        rule_index: Option<usize>,
    },

    /// A path string could not be parsed
    #[error("Invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    /// Input data that cannot be normalized, such as a non-object source
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A transform reported a failure while producing its value
    #[error("Transform '{name}' failed at '{target}': {message}")]
    Transform {
        name: String,
        target: String,
        message: String,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error that is not tied to a rule position
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            rule_index: None,
        }
    }

    /// Attach a 0-based rule position to a configuration error
    ///
    /// The message names the rule 1-based, the way users count rules.
    /// Errors that already carry a position, and non-configuration errors,
    /// are returned unchanged.
    pub fn at_rule(self, index: usize) -> Self {
        match self {
            Error::Configuration {
                message,
                rule_index: None,
            } => Error::Configuration {
                message: format!("rule #{}: {}", index + 1, message),
                rule_index: Some(index),
            },
            Error::InvalidPath { path, message } => Error::Configuration {
                message: format!("rule #{}: invalid path '{}': {}", index + 1, path, message),
                rule_index: Some(index),
            },
            other => other,
        }
    }

    /// Whether this error describes a malformed rule rather than a runtime failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. } | Error::InvalidPath { .. })
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
