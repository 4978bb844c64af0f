//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use std::io::{self, Write};

/// Output format for `get`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of metric families (default)
    #[default]
    Json,
    /// Text exposition body as served
    Raw,
    /// One table line per sample
    Table,
}

/// Print a rendered report to stdout
pub fn print_report(report: &str, format: Option<OutputFormat>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format)?;
    out.flush()
}

/// Raw bodies are written byte for byte; anything else ends in exactly one newline.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &str,
    format: Option<OutputFormat>,
) -> io::Result<()> {
    if format == Some(OutputFormat::Raw) {
        return out.write_all(report.as_bytes());
    }
    writeln!(out, "{}", report.trim_end_matches('\n'))
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}
