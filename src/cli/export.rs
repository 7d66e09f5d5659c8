//! CLI command for data export

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml};
use crate::tracker::Tracker;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expenses only)
    Csv,
    /// JSON format (full state)
    Json,
    /// YAML format (full state, human-readable)
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,

    /// Export format (default: from the file extension, else json)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle `export`
pub fn handle_export_command(tracker: &Tracker, args: ExportArgs) -> ExpenseResult<()> {
    let format = args
        .format
        .or_else(|| ExportFormat::from_path(&args.output))
        .unwrap_or(ExportFormat::Json);

    let file = File::create(&args.output).map_err(|e| {
        ExpenseError::Export(format!(
            "Failed to create file {}: {}",
            args.output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => {
            let sorted = tracker.expenses().sorted_by_date_desc();
            let count = export_expenses_csv(sorted, &mut writer)?;
            println!("Exported {} expenses to: {}", count, args.output.display());
        }
        ExportFormat::Json => {
            export_full_json(tracker, &mut writer, args.pretty)?;
            println!("Full state exported to: {}", args.output.display());
        }
        ExportFormat::Yaml => {
            export_full_yaml(tracker, &mut writer)?;
            println!("Full state exported to: {}", args.output.display());
        }
    }

    writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}
