//! Output rendering
//!
//! Turns a [`LogView`] into text: fixed-width tables for people, JSON and
//! CSV for scripts.

use std::fmt::Write as _;

use crate::client::LogView;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Errors while rendering output
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render `view` in the requested format
pub fn render(view: &LogView, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Table => Ok(render_table(view)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)? + "\n"),
        OutputFormat::Csv => render_csv(view),
    }
}

/// Entry table followed by the monthly totals table
pub fn render_table(view: &LogView) -> String {
    let mut out = String::new();

    if view.entries.is_empty() {
        out.push_str("No log entries yet.\n");
    } else {
        let _ = writeln!(
            out,
            "{:>4}  {:<10}  {:>10}  {:>10}  {:>10}  {}",
            "#", "Date", "Start Km", "End Km", "Running Km", "Purpose"
        );
        let _ = writeln!(out, "{}", "-".repeat(66));
        for row in &view.entries {
            let _ = writeln!(
                out,
                "{:>4}  {:<10}  {:>10}  {:>10}  {:>10}  {}",
                row.index, row.date, row.starting_km, row.end_km, row.running_km, row.purpose
            );
        }
    }

    out.push('\n');

    if view.monthly_totals.is_empty() {
        out.push_str("No monthly totals.\n");
    } else {
        let _ = writeln!(out, "{:<10}  {:>16}", "Month", "Total Running Km");
        let _ = writeln!(out, "{}", "-".repeat(28));
        for row in &view.monthly_totals {
            let _ = writeln!(out, "{:<10}  {:>16}", row.month, row.total);
        }
    }

    if let Some(error) = view.error() {
        let _ = writeln!(out, "\nError: {}", error);
    }

    out
}

/// Entry rows, then monthly totals, each section with its own header
pub fn render_csv(view: &LogView) -> Result<String, OutputError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(["index", "date", "starting_km", "end_km", "running_km", "purpose"])?;
    for row in &view.entries {
        writer.write_record([
            row.index.to_string(),
            row.date.clone(),
            row.starting_km.to_string(),
            row.end_km.to_string(),
            row.running_km.to_string(),
            row.purpose.clone(),
        ])?;
    }

    writer.write_record(["month", "total_running_km"])?;
    for row in &view.monthly_totals {
        writer.write_record([row.month.clone(), row.total.to_string()])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
