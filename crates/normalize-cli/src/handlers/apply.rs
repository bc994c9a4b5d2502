//! Apply command handler

use super::utils;
use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputFormatter, OutputWriter};
use normalize_core::{Normalizer, TransformRegistry};
use serde_json::Value;
use std::fs;
use tracing::{debug, info, instrument, warn};

/// Handle the apply command
#[instrument(skip(args, config, output), fields(input = %args.input.display(), rules = %args.rules.display()))]
pub fn handle_apply(args: ApplyArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("apply_command", &utils::display_name(&args.input));

    if utils::is_stdin(&args.input) && utils::is_stdin(&args.rules) {
        return Err(Error::invalid_args(
            "INPUT and --rules cannot both read from standard input",
        ));
    }

    let document = utils::load_rules(&args.rules)?;
    let preserve = args
        .preserve_flag()
        .or(document.preserve)
        .unwrap_or(config.defaults.preserve);
    let normalizer = document.into_normalizer(&TransformRegistry::with_builtins(), Some(preserve))?;
    info!(rules = normalizer.rule_count(), preserve, "Rule document loaded");

    let input = utils::load_value(&args.input)?;
    output.info(&format!(
        "Applying {} rule(s) from {} to {}",
        normalizer.rule_count(),
        utils::display_name(&args.rules),
        utils::display_name(&args.input)
    ))?;

    let normalize_timer = Timer::new("normalization");
    let result = normalize_input(&normalizer, &input, output)?;
    debug!(
        elapsed_ms = normalize_timer.elapsed().as_millis() as u64,
        "Normalization finished"
    );

    match args.save_to {
        Some(path) => {
            let mut content = output.format().format(&result)?;
            if !content.ends_with('\n') {
                content.push('\n');
            }
            debug!(path = %path.display(), "Writing output file");
            fs::write(&path, content)?;
            output.success(&format!("✓ Output saved to {}", path.display()))?;
        }
        None => {
            output.section("Result")?;
            output.data(&result)?;
        }
    }

    Ok(())
}

/// Normalize a single record, or each record of a list
fn normalize_input(normalizer: &Normalizer, input: &Value, output: &OutputWriter) -> Result<Value> {
    let Value::Array(records) = input else {
        return Ok(normalizer.normalize_value(input)?);
    };

    debug!(records = records.len(), "Normalizing batch");
    let progress = output.progress_bar(records.len() as u64, "records");
    let mut normalized = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let value = normalizer.normalize_value(record).map_err(|source| {
            warn!(record = index + 1, error = %source, "Record failed");
            Error::Record {
                position: index + 1,
                source,
            }
        })?;
        normalized.push(value);
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    Ok(Value::Array(normalized))
}
