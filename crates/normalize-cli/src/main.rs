//! Normalize CLI - reshape JSON and YAML records with declarative rules
//!
//! This is the main entry point for the normalize CLI application, providing
//! commands for applying rule documents to records, checking rule documents
//! and listing the available transforms.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Configuration decides color and logging, so it loads first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, cli.use_color()),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, &config) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e, control::SHOULD_COLORIZE.should_colorize()),
    }
}

/// Print an error and exit with its code
fn exit_with(error: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(error, use_color));

    if error.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(error.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = match cli.output {
        Some(format) => format,
        None => config.output_format()?,
    };
    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        format = ?format,
        "Executing command"
    );

    match cli.command {
        Commands::Apply(args) => handlers::handle_apply(args, config, &mut output),
        Commands::Check(args) => handlers::handle_check(args, config, &mut output),
        Commands::Transforms => handlers::handle_transforms(&mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
