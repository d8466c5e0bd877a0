//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/photos",
//!   "generated_at": "2024-05-01T12:00:00Z",
//!   "duplicates": [
//!     {
//!       "size": 1024,
//!       "files": ["/photos/a/x.jpg", "/photos/b/x.jpg"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 100,
//!     "total_size": 1048576,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 10,
//!     "reclaimable_space": 51200,
//!     "comparisons": 42,
//!     "unreadable_pairs": 0,
//!     "directories_skipped": 0,
//!     "files_skipped": 0,
//!     "scan_duration_ms": 1234
//!   }
//! }
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::duplicates::DuplicateGroup;
use crate::report::{Report, ScanSummary};

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// File size in bytes
    pub size: u64,
    /// Paths of every member, first-discovered first
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a DuplicateGroup.
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup) -> Self {
        Self {
            size: group.size(),
            files: group
                .files()
                .iter()
                .map(|f| f.path.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Total number of files scanned
    pub total_files: usize,
    /// Total size of all scanned files in bytes
    pub total_size: u64,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding originals)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates (bytes)
    pub reclaimable_space: u64,
    /// Content comparisons performed
    pub comparisons: usize,
    /// Pairs treated as different because they could not be read
    pub unreadable_pairs: usize,
    /// Directories that could not be listed
    pub directories_skipped: usize,
    /// Files whose metadata could not be read
    pub files_skipped: usize,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary) -> Self {
        Self {
            total_files: summary.total_files,
            total_size: summary.total_size,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            comparisons: summary.comparisons,
            unreadable_pairs: summary.unreadable_pairs,
            directories_skipped: summary.directories_skipped,
            files_skipped: summary.files_skipped,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Root directory that was scanned
    pub root: String,
    /// When this document was produced
    pub generated_at: DateTime<Utc>,
    /// List of duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from a report, stamped with the current time.
    ///
    /// # Example
    ///
    /// ```
    /// use dupecheck::output::json::JsonOutput;
    /// use dupecheck::report::{ReportBuilder, ScanSummary};
    ///
    /// let report = ReportBuilder::new().finish(ScanSummary::default());
    /// let output = JsonOutput::new(&report);
    /// assert!(output.duplicates.is_empty());
    /// ```
    #[must_use]
    pub fn new(report: &Report) -> Self {
        Self::with_timestamp(report, Utc::now())
    }

    /// Create a JSON output with an explicit generation time.
    #[must_use]
    pub fn with_timestamp(report: &Report, generated_at: DateTime<Utc>) -> Self {
        Self {
            root: report.summary().root.to_string_lossy().into_owned(),
            generated_at,
            duplicates: report
                .groups()
                .iter()
                .map(JsonDuplicateGroup::from_duplicate_group)
                .collect(),
            summary: JsonSummary::from_scan_summary(report.summary()),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The writer to output to (e.g., stdout)
    /// * `pretty` - Whether to pretty-print the output
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JsonOutputError> for super::OutputError {
    fn from(err: JsonOutputError) -> Self {
        match err {
            JsonOutputError::Serialization(e) => Self::Json(e),
            JsonOutputError::Io(e) => Self::Io(e),
        }
    }
}
