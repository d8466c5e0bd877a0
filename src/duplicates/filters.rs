//! Cheap candidate filters applied before any content comparison.
//!
//! A [`FilterCascade`] is an ordered list of [`CandidateFilter`] predicates.
//! They run cheapest first and stop at the first rejection, so a pair only
//! reaches the comparator once every attribute agrees. None of them touch
//! the disk.

use crate::scanner::FileDescriptor;

/// A single attribute check between a pivot and a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateFilter {
    /// Extensions must match exactly.
    Extension,
    /// File names (without extension) must match exactly.
    Name,
    /// Sizes must match.
    Size,
}

impl CandidateFilter {
    /// Whether the candidate passes this filter against the pivot.
    #[must_use]
    pub fn admits(self, pivot: &FileDescriptor, candidate: &FileDescriptor) -> bool {
        match self {
            Self::Extension => pivot.extension == candidate.extension,
            Self::Name => pivot.name == candidate.name,
            Self::Size => pivot.size == candidate.size,
        }
    }

    /// Label used in logs and statistics.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Extension => "extension",
            Self::Name => "name",
            Self::Size => "size",
        }
    }
}

/// Ordered, short-circuiting set of candidate filters.
///
/// The size check is always present and always last among the attribute
/// filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCascade {
    filters: Vec<CandidateFilter>,
}

impl Default for FilterCascade {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl FilterCascade {
    /// Build a cascade.
    ///
    /// # Arguments
    ///
    /// * `match_names` - Require identical file names
    /// * `match_extensions` - Require identical extensions
    ///
    /// # Example
    ///
    /// ```
    /// use dupecheck::duplicates::{CandidateFilter, FilterCascade};
    ///
    /// let cascade = FilterCascade::new(true, true);
    /// assert_eq!(
    ///     cascade.filters(),
    ///     &[CandidateFilter::Extension, CandidateFilter::Name, CandidateFilter::Size]
    /// );
    /// ```
    #[must_use]
    pub fn new(match_names: bool, match_extensions: bool) -> Self {
        let mut filters = Vec::with_capacity(3);
        if match_extensions {
            filters.push(CandidateFilter::Extension);
        }
        if match_names {
            filters.push(CandidateFilter::Name);
        }
        filters.push(CandidateFilter::Size);
        Self { filters }
    }

    /// Filters in evaluation order.
    #[must_use]
    pub fn filters(&self) -> &[CandidateFilter] {
        &self.filters
    }

    /// The first filter that rejects the candidate, if any.
    #[must_use]
    pub fn first_rejection(
        &self,
        pivot: &FileDescriptor,
        candidate: &FileDescriptor,
    ) -> Option<CandidateFilter> {
        self.filters
            .iter()
            .copied()
            .find(|filter| !filter.admits(pivot, candidate))
    }

    /// Whether the pair survives every filter and needs a content check.
    #[must_use]
    pub fn admits(&self, pivot: &FileDescriptor, candidate: &FileDescriptor) -> bool {
        self.first_rejection(pivot, candidate).is_none()
    }
}
