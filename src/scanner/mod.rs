//! Scanner module for directory traversal.
//!
//! This module provides:
//! - [`FileDescriptor`], the immutable record every later phase works on
//! - [`Walker`], an iterative stack-based directory walker
//!
//! # Example
//!
//! ```no_run
//! use dupecheck::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for file in walker.walk() {
//!     println!("{}: {} bytes", file.path.display(), file.size);
//! }
//! ```

pub mod walker;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use walker::{WalkStats, Walker};

/// Immutable description of a discovered file.
///
/// Created once during traversal and never mutated afterwards. Two
/// descriptors sharing name, extension and size are *candidates* for
/// duplication; only a content comparison can confirm it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File name without its final extension
    pub name: String,
    /// Final extension without the leading dot (empty when absent)
    pub extension: String,
    /// File size in bytes
    pub size: u64,
}

impl FileDescriptor {
    /// Create a descriptor, deriving name and extension from the path.
    ///
    /// # Example
    ///
    /// ```
    /// use dupecheck::scanner::FileDescriptor;
    /// use std::path::PathBuf;
    ///
    /// let file = FileDescriptor::new(PathBuf::from("/data/report.final.pdf"), 42);
    /// assert_eq!(file.name, "report.final");
    /// assert_eq!(file.extension, "pdf");
    /// ```
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            extension,
            size,
        }
    }

    /// Describe an existing file by reading its metadata.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if the metadata cannot be read or the path
    /// is not a regular file.
    pub fn from_path(path: &Path) -> Result<Self, ScanError> {
        let metadata = std::fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;
        if !metadata.is_file() {
            return Err(ScanError::NotAFile(path.to_path_buf()));
        }
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Ok(Self::new(path, metadata.len()))
    }
}

/// Configuration for directory walking.
///
/// Every filter is off by default, so a default walk reports every
/// regular file, zero-length files included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// Warning: symlink cycles are not detected.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Minimum file size to include (in bytes).
    pub min_size: Option<u64>,

    /// Maximum file size to include (in bytes).
    pub max_size: Option<u64>,
}

impl WalkerConfig {
    /// Create a new configuration from CLI/config values.
    #[must_use]
    pub fn new(
        follow_symlinks: bool,
        skip_hidden: bool,
        min_size: Option<u64>,
        max_size: Option<u64>,
    ) -> Self {
        Self {
            follow_symlinks,
            skip_hidden,
            min_size,
            max_size,
        }
    }
}

/// Errors observed while scanning.
///
/// The walker never returns these; they classify a skipped directory or
/// file for logging.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a regular file.
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// An I/O error occurred while accessing a path.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error for the given path.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
