//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Attribute filters that prune candidate pairs without I/O
//! - Chunked byte-for-byte content comparison
//! - Pivot-based elimination over a shrinking working set
//! - Duplicate group management

pub mod compare;
pub mod filters;
pub mod finder;
pub mod groups;

pub use compare::{
    CompareError, Comparison, ContentComparator, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE,
};
pub use filters::{CandidateFilter, FilterCascade};
pub use finder::{DuplicateFinder, EliminationStats, FinderConfig, FinderError};
pub use groups::{DuplicateGroup, FileSet};
