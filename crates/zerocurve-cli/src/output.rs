//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Prints rows in the given format. `Minimal` falls back to CSV without
/// headers.
pub fn print_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Json => print_json(rows),
        OutputFormat::Csv => print_csv(rows, true),
        OutputFormat::Minimal => print_csv(rows, false),
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(rows: &[T]) -> anyhow::Result<()> {
    if rows.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn print_csv<T: Serialize>(rows: &[T], headers: bool) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(headers)
        .from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a rate as a percentage with four decimals.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn percent(value: &f64) -> String {
    format!("{:.4}", value * 100.0)
}

/// Formats a rate derivative in basis points.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn bps(value: &f64) -> String {
    format!("{:.3}", value * 10_000.0)
}

/// Formats a discount factor.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn discount(value: &f64) -> String {
    format!("{value:.8}")
}

/// Formats a tenor in years.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn tenor(value: &f64) -> String {
    format!("{value:.2}Y")
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a status line.
pub fn print_status(passed: bool, message: &str) {
    if passed {
        println!("{} {}", "✓".green(), message);
    } else {
        println!("{} {}", "✗".red(), message);
    }
}
