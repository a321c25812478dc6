//! Shared helper functions for CLI commands.

use std::path::Path;

use chrono::{DateTime, TimeZone};
use console::style;

use crate::ocr::Provenance;

/// Width of the separator lines in console and file output.
const SEPARATOR_WIDTH: usize = 50;

/// Render the result file: header block, separator, then the raw text.
pub fn format_result_file<Tz>(provenance: &Provenance, text: &str, at: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "=== Vision OCR Result ===\nStrategy: {}\nExtracted at: {}\n\n{}\n\n{}",
        provenance,
        at.format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(SEPARATOR_WIDTH),
        text
    )
}

/// Write the result file, creating parent directories as needed.
pub fn write_result_file<Tz>(
    path: &Path,
    provenance: &Provenance,
    text: &str,
    at: DateTime<Tz>,
) -> std::io::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format_result_file(provenance, text, at))
}

/// Print the accepted extraction to stdout.
pub fn print_result(provenance: &Provenance, text: &str) {
    let rule = "=".repeat(SEPARATOR_WIDTH);
    println!("\n{}", rule);
    println!(
        "{} {}",
        style("Final result via").bold(),
        style(provenance).cyan()
    );
    println!("{}", rule);
    println!("{}", text);
    println!("{}", rule);
}
