//! Duplicate groups and the working set they are carved out of.
//!
//! # Overview
//!
//! - [`FileSet`] is the pool of not-yet-classified files. The elimination
//!   engine pops a pivot from its front and pulls confirmed matches out of
//!   the rest, so the pool only ever shrinks.
//! - [`DuplicateGroup`] is one confirmed cluster: the pivot first, then its
//!   matches in the order they were found.
//!
//! # Example
//!
//! ```
//! use dupecheck::duplicates::FileSet;
//! use dupecheck::scanner::FileDescriptor;
//! use std::path::PathBuf;
//!
//! let mut set = FileSet::new(vec![
//!     FileDescriptor::new(PathBuf::from("/a.txt"), 3),
//!     FileDescriptor::new(PathBuf::from("/b.txt"), 3),
//!     FileDescriptor::new(PathBuf::from("/c.txt"), 9),
//! ]);
//!
//! let pivot = set.next_pivot().unwrap();
//! let taken = set.take_matching(|candidate| candidate.size == pivot.size);
//! assert_eq!(taken.len(), 1);
//! assert_eq!(set.len(), 1);
//! ```

use std::collections::VecDeque;
use std::path::PathBuf;

use serde::Serialize;

use crate::scanner::FileDescriptor;

/// Confirmed group of byte-identical files.
///
/// Every member is content-equal to the first member. Exact byte equality
/// is an equivalence relation, so every member is also equal to every
/// other member; no all-pairs re-check is needed.
///
/// Groups are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    size: u64,
    files: Vec<FileDescriptor>,
}

impl DuplicateGroup {
    /// Build a group from its pivot and the matches found for it.
    ///
    /// Returns `None` when there are no matches: a lone pivot is unique,
    /// not a duplicate.
    #[must_use]
    pub fn new(pivot: FileDescriptor, matches: Vec<FileDescriptor>) -> Option<Self> {
        if matches.is_empty() {
            return None;
        }
        debug_assert!(
            matches.iter().all(|m| m.size == pivot.size),
            "group members must share the pivot's size"
        );
        let size = pivot.size;
        let mut files = Vec::with_capacity(matches.len() + 1);
        files.push(pivot);
        files.extend(matches);
        Some(Self { size, files })
    }

    /// Size in bytes shared by every member.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Members in discovery order, pivot first.
    #[must_use]
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false; a group holds at least two files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes that removing every copy but one would free.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Get just the paths of files in this group.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Working set of files still waiting to be classified.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    remaining: VecDeque<FileDescriptor>,
}

impl FileSet {
    /// Create a working set holding every file from one traversal.
    #[must_use]
    pub fn new(files: Vec<FileDescriptor>) -> Self {
        Self {
            remaining: files.into(),
        }
    }

    /// Number of files still unclassified.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Check if every file has been classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remove and return the next pivot.
    pub fn next_pivot(&mut self) -> Option<FileDescriptor> {
        self.remaining.pop_front()
    }

    /// Remove every file for which `is_match` returns true.
    ///
    /// Each remaining file is offered to `is_match` exactly once, in order.
    /// Removed files are returned in that order; the others keep theirs.
    pub fn take_matching<F>(&mut self, mut is_match: F) -> Vec<FileDescriptor>
    where
        F: FnMut(&FileDescriptor) -> bool,
    {
        let capacity = self.remaining.len();
        let pending = std::mem::replace(&mut self.remaining, VecDeque::with_capacity(capacity));
        let mut taken = Vec::new();
        for candidate in pending {
            if is_match(&candidate) {
                taken.push(candidate);
            } else {
                self.remaining.push_back(candidate);
            }
        }
        taken
    }
}
