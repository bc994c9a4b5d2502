//! Transforms command handler

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::{OutputWriter, TransformInfo};
use normalize_core::TransformRegistry;

/// Handle the transforms command
pub fn handle_transforms(output: &mut OutputWriter) -> Result<()> {
    let registry = TransformRegistry::with_builtins();
    let transforms: Vec<TransformInfo> = registry
        .describe()
        .map(|(name, description)| TransformInfo {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect();

    if output.format() == OutputFormat::Human {
        output.table(
            &["Name", "Description"],
            transforms
                .into_iter()
                .map(|t| vec![t.name, t.description])
                .collect(),
        )
    } else {
        output.data(&transforms)
    }
}
