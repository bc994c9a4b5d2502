//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output in
//! various formats (JSON, YAML, human-readable), including reports on rule
//! documents and the transform catalogue, plus progress indicators for
//! record batches.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use normalize_core::RuleSpec;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use tracing::trace;

/// A resolved rule document, as reported by `check`
#[derive(Debug, Clone, Serialize)]
pub struct RuleReport {
    /// Where the document was read from
    pub document: String,
    /// The document's own preserve flag, if it sets one
    pub preserve: Option<bool>,
    /// The preserve mode `apply` would use without command-line flags
    pub effective_preserve: bool,
    pub rules: Vec<RuleLine>,
}

/// One rule of a [`RuleReport`]
#[derive(Debug, Clone, Serialize)]
pub struct RuleLine {
    /// 1-based position in the document
    pub index: usize,
    /// One-line rendering of the resolved rule
    pub summary: String,
    #[serde(flatten)]
    pub spec: RuleSpec,
}

/// A transform available to rule documents
#[derive(Debug, Clone, Serialize)]
pub struct TransformInfo {
    pub name: String,
    pub description: String,
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a rule document report
    fn format_rule_report(&self, report: &RuleReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Records read best as pretty JSON
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_rule_report(&self, report: &RuleReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_rule_report_human(report)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), format = ?self.format, "Writing data");

        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a rule document report
    pub fn rule_report(&mut self, report: &RuleReport) -> Result<()> {
        let formatted = self.format.format_rule_report(report)?;
        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");
        let header_row = header_row.trim_end();

        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }

    /// Create a progress bar for record batches
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .map(|style| style.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Format a rule report for human reading
fn format_rule_report_human(report: &RuleReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("═══ Rules: {} ═══\n", report.document));
    let origin = match report.preserve {
        Some(_) => "set by the document",
        None => "default",
    };
    output.push_str(&format!(
        "Preserve: {} ({})\n",
        report.effective_preserve, origin
    ));
    output.push_str(&format!("Rules: {}\n", report.rules.len()));

    for line in &report.rules {
        output.push_str(&format!("  {:>3}. {}\n", line.index, line.summary));
    }

    output
}

/// In-memory writer shared between an [`OutputWriter`] and a test
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
