//! Output formatters for duplicate scan results.
//!
//! This module provides different output formats for scan results:
//! - Plain text in the report layout, for people
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use dupecheck::output::{write_report, OutputFormat};
//! use std::path::Path;
//!
//! let report = dupecheck::scan(Path::new("."));
//! write_report(&report, OutputFormat::Json, None).unwrap();
//! ```

pub mod csv;
pub mod json;
pub mod text;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::report::Report;

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::text::TextOutput;

/// Report output format.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text report
    #[default]
    Text,
    /// JSON document
    Json,
    /// CSV, one row per file
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Errors that can occur while writing a report.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    /// The destination file could not be created.
    #[error("Failed to create output file {path}: {source}")]
    Create {
        /// Destination path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O error during writing
    #[error("I/O error while writing report: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Write `report` in `format` to `destination`, or to stdout when `None`.
///
/// # Errors
///
/// Returns `OutputError` if the destination cannot be created or written.
pub fn write_report(
    report: &Report,
    format: OutputFormat,
    destination: Option<&Path>,
) -> Result<(), OutputError> {
    match destination {
        Some(path) => {
            let file = File::create(path).map_err(|source| OutputError::Create {
                path: path.to_path_buf(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            write_report_to(report, format, &mut writer)?;
            writer.flush()?;
            log::info!("Report written to {}", path.display());
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_report_to(report, format, &mut handle)?;
            handle.flush()?;
            Ok(())
        }
    }
}

/// Write `report` in `format` to any writer.
///
/// # Errors
///
/// Returns `OutputError` if serialization or writing fails.
pub fn write_report_to<W: Write>(
    report: &Report,
    format: OutputFormat,
    writer: &mut W,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Text => TextOutput::new(report).write_to(writer)?,
        OutputFormat::Json => JsonOutput::new(report).write_to(writer, true)?,
        OutputFormat::Csv => CsvOutput::new(report.groups()).write_to(writer)?,
    }
    Ok(())
}
