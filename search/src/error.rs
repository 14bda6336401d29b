//! Typed search errors.
//!
//! "No solution" is never an error: a run that exhausts its open list or
//! whose bound never admits a goal returns a result with no solutions.
//! `SearchError` covers pre-flight policy failures, open-list misuse, and
//! domain failures propagated unchanged from the domain.

use waymark_kernel::error::DomainError;

/// Typed failure for search configuration and execution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// A policy value is outside its legal range.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// A rank does not fit the bucket heap's configured capacity.
    #[error("rank {rank} at level {level} outside bucket capacity {capacity}")]
    RankOutOfRange {
        level: usize,
        rank: f64,
        capacity: usize,
    },

    /// `update` was called for an element the open list does not hold.
    #[error("element {handle} is not in the open list")]
    NotQueued { handle: usize },

    /// The domain failed while applying, packing, or unpacking.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
