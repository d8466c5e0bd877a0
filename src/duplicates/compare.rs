//! Byte-for-byte content comparison.
//!
//! # Overview
//!
//! [`ContentComparator`] decides whether two files hold identical bytes by
//! reading both in lockstep, one fixed-size chunk at a time, and stopping at
//! the first chunk that differs. No hashing is involved; a positive answer is
//! exact.
//!
//! The comparison is cheap to reject:
//! 1. The same path is identical without any I/O.
//! 2. Different recorded sizes are different without opening either file.
//! 3. The opened handles' metadata must agree with the recorded sizes, so a
//!    descriptor that went stale during the scan is never read past its end.
//!
//! # Failure policy
//!
//! An I/O error on either file yields [`Comparison::Unreadable`], which
//! [`ContentComparator::equal`] reports as `false`. Errors are logged, never
//! propagated. Handles are owned locals and are closed on every return path.
//!
//! # Example
//!
//! ```no_run
//! use dupecheck::duplicates::ContentComparator;
//! use dupecheck::scanner::FileDescriptor;
//! use std::path::Path;
//!
//! let a = FileDescriptor::from_path(Path::new("a.bin")).unwrap();
//! let b = FileDescriptor::from_path(Path::new("b.bin")).unwrap();
//!
//! let comparator = ContentComparator::default();
//! println!("identical: {}", comparator.equal(&a, &b));
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::scanner::FileDescriptor;

/// Default chunk size for lockstep reads (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Smallest chunk the comparator will use: one machine word.
pub const MIN_CHUNK_SIZE: usize = std::mem::size_of::<u64>();

/// Largest chunk the comparator will allocate per file (16 MiB).
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Outcome of comparing two files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Both files hold exactly the same bytes.
    Identical,
    /// The files differ in size or content.
    Different,
    /// One of the files could not be opened or read.
    Unreadable,
}

impl Comparison {
    /// Whether the files were confirmed identical.
    #[must_use]
    pub fn is_identical(self) -> bool {
        self == Self::Identical
    }

    /// Short lowercase label, as printed by the `compare` command.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Identical => "identical",
            Self::Different => "different",
            Self::Unreadable => "unreadable",
        }
    }
}

/// Errors that can occur while comparing file contents.
///
/// These never leave the comparator; they are logged and folded into
/// [`Comparison::Unreadable`].
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// A file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file could not be read after opening.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Chunked byte-for-byte file comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentComparator {
    chunk_size: usize,
}

impl Default for ContentComparator {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ContentComparator {
    /// Create a comparator reading `chunk_size` bytes per step.
    ///
    /// Sizes are clamped to [`MIN_CHUNK_SIZE`]..=[`MAX_CHUNK_SIZE`].
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        let clamped = chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);
        if clamped != chunk_size {
            log::debug!("Chunk size {} clamped to {}", chunk_size, clamped);
        }
        Self {
            chunk_size: clamped,
        }
    }

    /// Chunk size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Whether the two files are byte-for-byte identical.
    ///
    /// Unreadable files are reported as not identical.
    #[must_use]
    pub fn equal(&self, a: &FileDescriptor, b: &FileDescriptor) -> bool {
        self.compare(a, b).is_identical()
    }

    /// Compare two files and report the detailed outcome.
    #[must_use]
    pub fn compare(&self, a: &FileDescriptor, b: &FileDescriptor) -> Comparison {
        if a.path == b.path {
            return Comparison::Identical;
        }
        if a.size != b.size {
            return Comparison::Different;
        }

        match self.compare_contents(a, b) {
            Ok(true) => Comparison::Identical,
            Ok(false) => Comparison::Different,
            Err(e) => {
                log::debug!("Treating pair as different: {}", e);
                Comparison::Unreadable
            }
        }
    }

    /// Compare two files given only their paths.
    ///
    /// A path that cannot be described (missing, not a regular file,
    /// unreadable metadata) makes the pair [`Comparison::Unreadable`].
    #[must_use]
    pub fn compare_paths(&self, a: &Path, b: &Path) -> Comparison {
        let described =
            FileDescriptor::from_path(a).and_then(|a| FileDescriptor::from_path(b).map(|b| (a, b)));
        match described {
            Ok((a, b)) => self.compare(&a, &b),
            Err(e) => {
                log::warn!("{}", e);
                Comparison::Unreadable
            }
        }
    }

    fn compare_contents(&self, a: &FileDescriptor, b: &FileDescriptor) -> Result<bool, CompareError> {
        let mut left = open(&a.path)?;
        let mut right = open(&b.path)?;

        let left_len = current_len(&left, &a.path)?;
        let right_len = current_len(&right, &b.path)?;
        if left_len != a.size || right_len != b.size {
            log::debug!(
                "Size changed since scan: {} ({} -> {}), {} ({} -> {})",
                a.path.display(),
                a.size,
                left_len,
                b.path.display(),
                b.size,
                right_len
            );
            return Ok(false);
        }

        let buf_len = self.buffer_len(a.size);
        let mut left_buf = vec![0u8; buf_len];
        let mut right_buf = vec![0u8; buf_len];

        loop {
            let left_read = fill_chunk(&mut left, &mut left_buf).map_err(|source| {
                CompareError::Read {
                    path: a.path.clone(),
                    source,
                }
            })?;
            let right_read = fill_chunk(&mut right, &mut right_buf).map_err(|source| {
                CompareError::Read {
                    path: b.path.clone(),
                    source,
                }
            })?;

            if left_read != right_read || left_buf[..left_read] != right_buf[..right_read] {
                return Ok(false);
            }
            if left_read == 0 {
                return Ok(true);
            }
        }
    }
}

impl ContentComparator {
    /// Buffer length for a file of `size` bytes: never more than the file
    /// needs, never below [`MIN_CHUNK_SIZE`].
    fn buffer_len(&self, size: u64) -> usize {
        usize::try_from(size).map_or(self.chunk_size, |size| {
            size.clamp(MIN_CHUNK_SIZE, self.chunk_size)
        })
    }
}

fn open(path: &Path) -> Result<File, CompareError> {
    File::open(path).map_err(|source| CompareError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn current_len(file: &File, path: &Path) -> Result<u64, CompareError> {
    file.metadata()
        .map(|m| m.len())
        .map_err(|source| CompareError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Read until `buf` is full or the reader is exhausted.
///
/// Returns the number of bytes placed in `buf`; less than `buf.len()` only
/// at end of file.
fn fill_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
