//! Iterative directory walker.
//!
//! # Overview
//!
//! [`Walker`] traverses a directory tree with an explicit stack of pending
//! directories instead of call-stack recursion, so arbitrarily deep trees
//! cannot overflow the stack.
//!
//! # Partial results
//!
//! A directory that cannot be listed (permission denied, I/O error, removed
//! while the walk is running) is skipped together with everything beneath
//! it. The walk never fails; it only loses coverage. Skips are counted in
//! [`WalkStats`] and logged.
//!
//! Traversal order is depth-first and unsorted. Callers must not depend on
//! it.

use std::fs::{self, DirEntry, Metadata};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{FileDescriptor, ScanError, WalkerConfig};
use crate::progress::ProgressCallback;

/// Counters describing one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Directories listed successfully
    pub directories_visited: usize,
    /// Directories skipped because they could not be listed
    pub directories_skipped: usize,
    /// Files skipped because their metadata could not be read
    pub files_skipped: usize,
}

/// Stack-based directory walker.
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional progress callback
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field("config", &self.config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Walker {
    /// Create a new walker for the given root.
    ///
    /// The root is made absolute so every descriptor carries a full path.
    /// It is assumed to be an existing directory; a root that cannot be
    /// listed simply produces an empty walk.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        let root = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Self {
            root,
            config,
            progress_callback: None,
        }
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Root directory of this walk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and return every file found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupecheck::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let files = Walker::new(Path::new("."), WalkerConfig::default()).walk();
    /// println!("Found {} files", files.len());
    /// ```
    #[must_use]
    pub fn walk(&self) -> Vec<FileDescriptor> {
        self.walk_with_stats().0
    }

    /// Walk the tree, returning the files found and the walk counters.
    #[must_use]
    pub fn walk_with_stats(&self) -> (Vec<FileDescriptor>, WalkStats) {
        let mut files = Vec::new();
        let mut stats = WalkStats::default();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let entries = match list_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    stats.directories_skipped += 1;
                    match ScanError::from_io(&dir, e) {
                        err @ ScanError::PermissionDenied(_) => {
                            log::warn!("Skipping directory: {}", err);
                        }
                        err => log::debug!("Skipping directory: {}", err),
                    }
                    continue;
                }
            };
            stats.directories_visited += 1;

            for entry in entries {
                let path = entry.path();

                if self.config.skip_hidden && is_hidden(&entry) {
                    log::trace!("Skipping hidden entry: {}", path.display());
                    continue;
                }

                let metadata = match self.entry_metadata(&entry) {
                    Ok(Some(m)) => m,
                    Ok(None) => continue,
                    Err(e) => {
                        stats.files_skipped += 1;
                        log::debug!("Skipping entry: {}", ScanError::from_io(&path, e));
                        continue;
                    }
                };

                if metadata.is_dir() {
                    pending.push(path);
                } else if metadata.is_file() {
                    let size = metadata.len();
                    if !self.passes_size_filter(size) {
                        log::trace!(
                            "Skipping file due to size filter ({}): {}",
                            size,
                            path.display()
                        );
                        continue;
                    }
                    files.push(FileDescriptor::new(path, size));
                    if let Some(ref callback) = self.progress_callback {
                        callback.on_progress(files.len(), &dir.to_string_lossy());
                    }
                }
            }
        }

        log::debug!(
            "Walk of {} complete: {} files, {} directories, {} skipped",
            self.root.display(),
            files.len(),
            stats.directories_visited,
            stats.directories_skipped
        );

        (files, stats)
    }

    /// Resolve the metadata used to classify an entry.
    ///
    /// Returns `Ok(None)` for symlinks when links are not followed.
    fn entry_metadata(&self, entry: &DirEntry) -> std::io::Result<Option<Metadata>> {
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            if !self.config.follow_symlinks {
                log::trace!("Skipping symlink: {}", entry.path().display());
                return Ok(None);
            }
            return fs::metadata(entry.path()).map(Some);
        }
        entry.metadata().map(Some)
    }

    /// Check if a file passes size filters.
    fn passes_size_filter(&self, size: u64) -> bool {
        if let Some(min) = self.config.min_size {
            if size < min {
                return false;
            }
        }
        if let Some(max) = self.config.max_size {
            if size > max {
                return false;
            }
        }
        true
    }
}

/// List a directory completely, failing if any entry cannot be read.
fn list_dir(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    fs::read_dir(dir)?.collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
