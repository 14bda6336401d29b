//! Policy-driven search entry point.

use waymark_kernel::contract::SearchDomain;
use waymark_kernel::result::SearchResult;

use crate::astar::Astar;
use crate::contract::SearchAlgorithm;
use crate::error::SearchError;
use crate::idastar::IdaStar;
use crate::policy::{Algorithm, SearchPolicy};

/// Validate `policy`, then run the algorithm it selects over `domain`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] before any search work if the
/// policy is invalid; otherwise whatever the selected algorithm returns.
pub fn search<D: SearchDomain>(
    domain: &D,
    policy: &SearchPolicy,
) -> Result<SearchResult<D::Operator>, SearchError> {
    policy.validate()?;
    match policy.algorithm {
        Algorithm::Astar => run(&Astar::from_policy(policy), domain),
        Algorithm::IdaStar => run(&IdaStar::from_policy(policy), domain),
    }
}

fn run<A: SearchAlgorithm, D: SearchDomain>(
    algorithm: &A,
    domain: &D,
) -> Result<SearchResult<D::Operator>, SearchError> {
    let result = SearchAlgorithm::search(algorithm, domain);
    if let Err(err) = &result {
        tracing::debug!(algorithm = algorithm.name(), error = %err, "search aborted");
    }
    result
}
