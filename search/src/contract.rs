//! Search algorithm contract.

use waymark_kernel::contract::SearchDomain;
use waymark_kernel::result::SearchResult;

use crate::error::SearchError;

/// A configured search algorithm.
///
/// # Contract
///
/// - `search` starts from `domain.initial_state()` and owns all of its
///   working memory for the duration of the call; an algorithm value can be
///   reused for any number of sequential runs.
/// - Running out of search space returns `Ok` with no solutions.
/// - A domain error aborts the run and is returned unchanged.
pub trait SearchAlgorithm {
    /// Short stable name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Run one search over `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the domain fails or the configuration
    /// cannot accommodate the search.
    fn search<D: SearchDomain>(&self, domain: &D)
        -> Result<SearchResult<D::Operator>, SearchError>;
}

impl SearchAlgorithm for crate::astar::Astar {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn search<D: SearchDomain>(
        &self,
        domain: &D,
    ) -> Result<SearchResult<D::Operator>, SearchError> {
        crate::astar::Astar::search(self, domain)
    }
}

impl SearchAlgorithm for crate::idastar::IdaStar {
    fn name(&self) -> &'static str {
        "idastar"
    }

    fn search<D: SearchDomain>(
        &self,
        domain: &D,
    ) -> Result<SearchResult<D::Operator>, SearchError> {
        crate::idastar::IdaStar::search(self, domain)
    }
}
