//! Duplicate finder: pivot-based elimination over a shrinking working set.
//!
//! # Overview
//!
//! The finder runs the whole detection pipeline:
//! 1. **Walk** - collect every file below the root (see [`crate::scanner::Walker`])
//! 2. **Eliminate** - repeatedly take a pivot from the working set and scan
//!    the rest of the set once:
//!    - cheap attribute filters first (extension, name, then size),
//!      see [`FilterCascade`]
//!    - a byte-for-byte [`ContentComparator`] check only for survivors
//!    - confirmed matches leave the working set together with the pivot
//! 3. **Report** - every pivot with at least one match becomes a
//!    [`DuplicateGroup`], pushed into a [`ReportBuilder`] in discovery order
//!
//! Because pivots and matches are removed as they are classified, every
//! unordered pair is examined at most once and the set shrinks
//! monotonically.
//!
//! # Example
//!
//! ```no_run
//! use dupecheck::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_match_names(false));
//! let report = finder.scan(Path::new("/some/path"));
//!
//! println!("Found {} duplicate groups", report.summary().duplicate_groups);
//! print!("{}", report.render_text());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use super::compare::{Comparison, ContentComparator, DEFAULT_CHUNK_SIZE};
use super::filters::{CandidateFilter, FilterCascade};
use super::groups::{DuplicateGroup, FileSet};
use crate::progress::{ProgressCallback, PHASE_COMPARING, PHASE_WALKING};
use crate::report::{Report, ReportBuilder, ScanSummary};
use crate::scanner::{FileDescriptor, Walker, WalkerConfig};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Require identical file names (without extension) before comparing.
    pub match_names: bool,
    /// Require identical extensions before comparing.
    pub match_extensions: bool,
    /// Bytes read per lockstep step by the comparator.
    pub chunk_size: usize,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("match_names", &self.match_names)
            .field("match_extensions", &self.match_extensions)
            .field("chunk_size", &self.chunk_size)
            .field("walker_config", &self.walker_config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            match_names: true,
            match_extensions: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            walker_config: WalkerConfig::default(),
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Require identical file names.
    #[must_use]
    pub fn with_match_names(mut self, enabled: bool) -> Self {
        self.match_names = enabled;
        self
    }

    /// Require identical extensions.
    #[must_use]
    pub fn with_match_extensions(mut self, enabled: bool) -> Self {
        self.match_extensions = enabled;
        self
    }

    /// Set the comparator chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Statistics from the elimination phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EliminationStats {
    /// Files that entered the working set
    pub input_files: usize,
    /// Pivots taken from the working set
    pub pivots: usize,
    /// Pairs rejected because extensions differ
    pub rejected_by_extension: usize,
    /// Pairs rejected because names differ
    pub rejected_by_name: usize,
    /// Pairs rejected because sizes differ
    pub rejected_by_size: usize,
    /// Content comparisons performed
    pub comparisons: usize,
    /// Comparisons that confirmed identical content
    pub identical: usize,
    /// Comparisons that found different content
    pub different: usize,
    /// Comparisons that failed on I/O and counted as different
    pub unreadable: usize,
    /// Duplicate groups emitted
    pub duplicate_groups: usize,
    /// Duplicate files emitted (excluding each group's pivot)
    pub duplicate_files: usize,
}

impl EliminationStats {
    fn record_rejection(&mut self, filter: CandidateFilter) {
        match filter {
            CandidateFilter::Extension => self.rejected_by_extension += 1,
            CandidateFilter::Name => self.rejected_by_name += 1,
            CandidateFilter::Size => self.rejected_by_size += 1,
        }
    }

    fn record_comparison(&mut self, outcome: Comparison) {
        self.comparisons += 1;
        match outcome {
            Comparison::Identical => self.identical += 1,
            Comparison::Different => self.different += 1,
            Comparison::Unreadable => self.unreadable += 1,
        }
    }

    /// Pairs rejected by attribute filters without any I/O.
    #[must_use]
    pub fn pruned_pairs(&self) -> usize {
        self.rejected_by_extension + self.rejected_by_name + self.rejected_by_size
    }

    /// Pairs examined in total (pruned or compared).
    #[must_use]
    pub fn pairs_examined(&self) -> usize {
        self.pruned_pairs() + self.comparisons
    }

    /// Percentage of examined pairs settled without reading content.
    #[must_use]
    pub fn pruning_rate(&self) -> f64 {
        let examined = self.pairs_examined();
        if examined == 0 {
            0.0
        } else {
            (self.pruned_pairs() as f64 / examined as f64) * 100.0
        }
    }
}

/// Errors that can occur before a scan starts.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Duplicate finder that runs the walk, elimination and report phases.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    cascade: FilterCascade,
    comparator: ContentComparator,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let cascade = FilterCascade::new(config.match_names, config.match_extensions);
        let comparator = ContentComparator::new(config.chunk_size);
        Self {
            config,
            cascade,
            comparator,
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// The filter cascade applied before content comparison.
    #[must_use]
    pub fn cascade(&self) -> &FilterCascade {
        &self.cascade
    }

    /// Scan a directory tree and report its duplicates.
    ///
    /// `root` is assumed to be an existing directory; it is not validated.
    /// Unreadable subdirectories and files reduce coverage but never fail
    /// the scan. Use [`DuplicateFinder::scan_checked`] to validate first.
    #[must_use]
    pub fn scan(&self, root: &Path) -> Report {
        let start_time = Instant::now();
        log::debug!("Starting duplicate scan of {}", root.display());

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_WALKING, 0);
            callback.on_message(&format!("Walking {}", root.display()));
        }

        let mut walker = Walker::new(root, self.config.walker_config.clone());
        if let Some(ref callback) = self.config.progress_callback {
            walker = walker.with_progress_callback(callback.clone());
        }
        let (files, walk_stats) = walker.walk_with_stats();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_WALKING);
        }

        let mut summary = ScanSummary {
            root: walker.root().to_path_buf(),
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            directories_skipped: walk_stats.directories_skipped,
            files_skipped: walk_stats.files_skipped,
            ..Default::default()
        };

        log::debug!(
            "Found {} files ({} total)",
            summary.total_files,
            summary.total_size_display()
        );
        if walk_stats.directories_skipped > 0 {
            log::warn!(
                "{} directories could not be read; results are partial",
                walk_stats.directories_skipped
            );
        }

        let mut builder = ReportBuilder::new();
        let stats = self.find_duplicates_into(files, &mut builder);

        summary.comparisons = stats.comparisons;
        summary.unreadable_pairs = stats.unreadable;
        summary.scan_duration = start_time.elapsed();

        let report = builder.finish(summary);
        log::debug!(
            "Scan complete: {} duplicate groups, {} duplicate files, {} reclaimable",
            report.summary().duplicate_groups,
            report.summary().duplicate_files,
            report.summary().reclaimable_display()
        );
        report
    }

    /// Validate `root` and scan it.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if the path does not exist or is not a
    /// directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupecheck::duplicates::DuplicateFinder;
    /// use std::path::Path;
    ///
    /// let finder = DuplicateFinder::with_defaults();
    /// match finder.scan_checked(Path::new(".")) {
    ///     Ok(report) => println!("Found {} duplicate groups", report.groups().len()),
    ///     Err(e) => eprintln!("Scan failed: {}", e),
    /// }
    /// ```
    pub fn scan_checked(&self, root: &Path) -> Result<Report, FinderError> {
        if !root.exists() {
            return Err(FinderError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }
        Ok(self.scan(root))
    }

    /// Find duplicates among a pre-collected list of files.
    ///
    /// # Returns
    ///
    /// A tuple of:
    /// - `Vec<DuplicateGroup>` - Confirmed duplicate groups in discovery order
    /// - `EliminationStats` - Statistics about the elimination
    #[must_use]
    pub fn find_duplicates(
        &self,
        files: Vec<FileDescriptor>,
    ) -> (Vec<DuplicateGroup>, EliminationStats) {
        let mut builder = ReportBuilder::new();
        let stats = self.find_duplicates_into(files, &mut builder);
        (builder.into_groups(), stats)
    }

    /// Find duplicates among `files`, pushing each group into `builder`.
    pub fn find_duplicates_into(
        &self,
        files: Vec<FileDescriptor>,
        builder: &mut ReportBuilder,
    ) -> EliminationStats {
        let total = files.len();
        let mut stats = EliminationStats {
            input_files: total,
            ..Default::default()
        };
        let mut working_set = FileSet::new(files);

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_COMPARING, total);
        }
        log::debug!("Comparing {} files", total);

        while let Some(pivot) = working_set.next_pivot() {
            stats.pivots += 1;

            let matches = working_set.take_matching(|candidate| {
                if let Some(filter) = self.cascade.first_rejection(&pivot, candidate) {
                    stats.record_rejection(filter);
                    log::trace!(
                        "{} rejected against {} by {}",
                        candidate.path.display(),
                        pivot.path.display(),
                        filter.label()
                    );
                    return false;
                }
                let outcome = self.comparator.compare(&pivot, candidate);
                stats.record_comparison(outcome);
                outcome.is_identical()
            });

            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(total - working_set.len(), &pivot.path.to_string_lossy());
            }

            if let Some(group) = DuplicateGroup::new(pivot, matches) {
                log::debug!(
                    "Duplicate group: {} files, {} bytes each, first {}",
                    group.len(),
                    group.size(),
                    group.files()[0].path.display()
                );
                stats.duplicate_groups += 1;
                stats.duplicate_files += group.duplicate_count();
                builder.push(group);
            }
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_COMPARING);
        }

        log::debug!(
            "Elimination complete: {} pairs examined, {} compared ({:.1}% pruned), {} unreadable",
            stats.pairs_examined(),
            stats.comparisons,
            stats.pruning_rate(),
            stats.unreadable
        );

        stats
    }
}
