//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Normalize CLI - reshape JSON and YAML records with declarative rules
///
/// Reads a record (or a list of records), applies an ordered rule document
/// that moves, renames and transforms fields, and prints the result.
#[derive(Parser, Debug)]
#[command(
    name = "normalize",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "NORMALIZE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format, then human)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a rule document to a record or a list of records
    Apply(ApplyArgs),

    /// Check that a rule document resolves and show its rules
    Check(CheckArgs),

    /// List the built-in transforms
    Transforms,

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the apply command
#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// Input record file (JSON or YAML), or '-' for stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Rule document file (JSON or YAML), or '-' for stdin
    #[arg(short, long, value_name = "RULES")]
    pub rules: PathBuf,

    /// Keep fields no rule consumed
    #[arg(long, conflicts_with = "no_preserve")]
    pub preserve: bool,

    /// Start every output from an empty record
    #[arg(long)]
    pub no_preserve: bool,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

impl ApplyArgs {
    /// Preservation requested on the command line, if any
    pub fn preserve_flag(&self) -> Option<bool> {
        if self.preserve {
            Some(true)
        } else if self.no_preserve {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Rule document file (JSON or YAML), or '-' for stdin
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl OutputFormat {
    /// Parse a format name as written in a configuration file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
