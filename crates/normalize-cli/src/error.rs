//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from normalize-core library
    #[error("{0}")]
    Core(#[from] normalize_core::Error),

    /// A record of a batch could not be normalized
    #[error("Record #{position}: {source}")]
    Record {
        /// 1-based position in the batch
        position: usize,
        #[source]
        source: normalize_core::Error,
    },

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {} ({})", path.display(), expected, reason)]
    InvalidFormat {
        path: PathBuf,
        expected: String,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(core) if core.is_configuration() => 2,
            Self::Core(_) => 3,
            Self::Record { source, .. } if source.is_configuration() => 2,
            Self::Record { .. } => 3,
            Self::FileNotFound { .. } => 4,
            Self::InvalidFormat { .. } => 5,
            Self::Config(_) => 6,
            Self::InvalidArgs(_) => 7,
            Self::Json(_) => 8,
            Self::Yaml(_) => 9,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::other(format!("{:#}", err))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let config = Error::from(normalize_core::Error::configuration("bad rule"));
        let input = Error::from(normalize_core::Error::InvalidInput {
            message: "not an object".to_string(),
        });
        assert_eq!(config.exit_code(), 2);
        assert_eq!(input.exit_code(), 3);
        assert_eq!(
            Error::FileNotFound {
                path: PathBuf::from("x.json")
            }
            .exit_code(),
            4
        );
        assert_eq!(Error::other("boom").exit_code(), 99);
    }

    #[test]
    fn test_only_argument_errors_show_help() {
        assert!(Error::invalid_args("both inputs on stdin").should_show_help());
        assert!(!Error::config("bad").should_show_help());
    }

    #[test]
    fn test_format_error_names_rule_position() {
        let err = Error::from(normalize_core::Error::configuration("unknown transform 'x'").at_rule(2));
        let formatted = format_error(&err, false);
        assert_eq!(
            formatted,
            "Error: Configuration error: rule #3: unknown transform 'x'"
        );
        assert_eq!(formatted.matches("rule #").count(), 1);
    }

    #[test]
    fn test_anyhow_context_is_kept() {
        let err: Error = anyhow::anyhow!("inner").context("outer").into();
        assert_eq!(err.to_string(), "outer: inner");
    }
}
