//! Check command handler

use super::utils;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, RuleLine, RuleReport};
use normalize_core::TransformRegistry;
use tracing::{info, instrument};

/// Handle the check command
#[instrument(skip(args, config, output), fields(rules = %args.rules.display()))]
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("check_command", &utils::display_name(&args.rules));

    let document = utils::load_rules(&args.rules)?;
    let rules = document.resolve(&TransformRegistry::with_builtins())?;
    info!(rules = rules.len(), "Rule document resolved");

    let report = RuleReport {
        document: utils::display_name(&args.rules),
        preserve: document.preserve,
        effective_preserve: document.preserve.unwrap_or(config.defaults.preserve),
        rules: rules
            .iter()
            .zip(document.rules.iter())
            .enumerate()
            .map(|(index, (rule, spec))| RuleLine {
                index: index + 1,
                summary: rule.to_string(),
                spec: spec.clone(),
            })
            .collect(),
    };

    output.rule_report(&report)?;
    if report.rules.is_empty() {
        let effect = if report.effective_preserve {
            "apply would return copies of the input records"
        } else {
            "apply would produce empty records"
        };
        output.warning(&format!("The document has no rules; {}", effect))?;
    } else {
        output.success(&format!("✓ {} rule(s) resolved", report.rules.len()))?;
    }

    Ok(())
}
