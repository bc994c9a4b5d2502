//! Normalize Core - declarative reshaping of JSON records
//!
//! This crate turns a source record into a new record by applying an ordered
//! list of mapping rules. Each rule moves a value from one dot path to
//! another, optionally passing it through a transform, and can either start
//! from an empty record or preserve the fields no rule consumed.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror` and `anyhow`
//! - **Path Access**: Dot-notation get/set/delete over nested values
//! - **Normalizer**: Rule application with optional preservation
//! - **Rule Documents**: Rules declared as data, with named transforms
//!
//! # Example
//!
//! ```
//! use normalize_core::{normalize, Result, Rule};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let source = json!({"info": {"email": "mario@example.com"}});
//!     let rules = vec![Rule::rename("email", "info.email")?];
//!     let output = normalize(source.as_object().unwrap(), &rules, false)?;
//!     assert_eq!(output["email"], "mario@example.com");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod normalizer;
pub mod path;

mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use path::FieldPath;
pub use normalizer::{
    // Engine
    normalize, Normalizer,

    // Rules
    Record, Rule, RuleBuilder, Source,

    // Transforms
    built_in, Transform, TransformError, TransformRegistry, TransformResult, ValueType,

    // Data-declared rules
    RuleDocument, RuleSpec, SourceSpec,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
