//! Scan reports.
//!
//! Duplicate groups are pushed into a [`ReportBuilder`] as the elimination
//! engine discovers them; [`ReportBuilder::finish`] attaches the
//! [`ScanSummary`] and freezes the result into a [`Report`].
//!
//! # Text layout
//!
//! ```text
//! DUPLICATES:
//!
//! /photos/a/x.jpg
//! /photos/b/x.jpg
//!
//! /docs/one.txt
//! /docs/copy/one.txt
//! ```
//!
//! A scan without duplicates renders the explicit line
//! `No duplicates located.` instead of an empty report.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use bytesize::ByteSize;

use crate::duplicates::DuplicateGroup;

/// Header line of a text report that contains groups.
pub const REPORT_HEADER: &str = "DUPLICATES:";

/// Text of a report without any duplicate group.
pub const NO_DUPLICATES_MESSAGE: &str = "No duplicates located.";

/// Summary statistics from a duplicate scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Root directory that was scanned
    pub root: PathBuf,
    /// Total number of files found by the walk
    pub total_files: usize,
    /// Total size of all files found, in bytes
    pub total_size: u64,
    /// Directories skipped because they could not be listed
    pub directories_skipped: usize,
    /// Files skipped because their metadata could not be read
    pub files_skipped: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Number of duplicate files (excluding the first of each group)
    pub duplicate_files: usize,
    /// Bytes that removing the duplicates would free
    pub reclaimable_space: u64,
    /// Content comparisons performed
    pub comparisons: usize,
    /// Pairs that could not be read and were treated as different
    pub unreadable_pairs: usize,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Whether part of the tree or some files were not covered.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.directories_skipped > 0 || self.files_skipped > 0 || self.unreadable_pairs > 0
    }

    /// Percentage of the scanned bytes that duplicates occupy.
    #[must_use]
    pub fn wasted_percentage(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (self.reclaimable_space as f64 / self.total_size as f64) * 100.0
        }
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize(self.reclaimable_space).to_string()
    }

    /// Format total size as human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize(self.total_size).to_string()
    }
}

/// Accumulates duplicate groups in discovery order.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    groups: Vec<DuplicateGroup>,
}

impl ReportBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly discovered group.
    pub fn push(&mut self, group: DuplicateGroup) {
        self.groups.push(group);
    }

    /// Number of groups collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no group has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups collected so far.
    #[must_use]
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Take the collected groups without building a report.
    #[must_use]
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        self.groups
    }

    /// Freeze the collected groups into a report.
    ///
    /// Group and duplicate counts in `summary` are overwritten from the
    /// groups themselves so the two can never disagree.
    #[must_use]
    pub fn finish(self, mut summary: ScanSummary) -> Report {
        summary.duplicate_groups = self.groups.len();
        summary.duplicate_files = self.groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.reclaimable_space = self.groups.iter().map(DuplicateGroup::wasted_space).sum();
        Report {
            groups: self.groups,
            summary,
        }
    }
}

/// Final result of one scan.
#[derive(Debug, Clone)]
pub struct Report {
    groups: Vec<DuplicateGroup>,
    summary: ScanSummary,
}

impl Report {
    /// Duplicate groups in discovery order.
    #[must_use]
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Scan statistics.
    #[must_use]
    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    /// Whether at least one duplicate group was found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Render the plain-text report.
    ///
    /// # Example
    ///
    /// ```
    /// use dupecheck::report::{ReportBuilder, ScanSummary, NO_DUPLICATES_MESSAGE};
    ///
    /// let report = ReportBuilder::new().finish(ScanSummary::default());
    /// assert_eq!(report.render_text().trim_end(), NO_DUPLICATES_MESSAGE);
    /// ```
    #[must_use]
    pub fn render_text(&self) -> String {
        if self.groups.is_empty() {
            return format!("{NO_DUPLICATES_MESSAGE}\n");
        }

        let mut out = String::from(REPORT_HEADER);
        out.push('\n');
        for group in &self.groups {
            out.push('\n');
            for file in group.files() {
                let _ = writeln!(out, "{}", file.path.display());
            }
        }
        out
    }
}
