//! Harness runner: one policy-driven search, summarised as a report.
//!
//! # Pipeline
//!
//! ```text
//! load_policy() → waymark_search::search() → SearchResult::digest()
//!   → SearchReport (JSON or text summary)
//! ```
//!
//! The runner owns no search logic; it only wires a domain and a policy to
//! the search crate and flattens the result into serializable form.

use std::fmt;
use std::path::{Path, PathBuf};

use waymark_kernel::contract::{DomainOperator, SearchDomain};
use waymark_kernel::proof::canon::CanonError;
use waymark_kernel::result::SearchResult;
use waymark_search::{Algorithm, HeapKind, SearchError, SearchPolicy};

use crate::instance::InstanceError;

/// Error during a harness run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Instance(#[from] InstanceError),

    #[error("cannot read policy {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("cannot digest run: {0}")]
    Canon(#[from] CanonError),
}

/// Load and validate a TOML search policy.
///
/// # Errors
///
/// [`RunError::Config`] if the file cannot be read, and
/// [`RunError::Search`] wrapping [`SearchError::InvalidPolicy`] if it is not
/// a valid policy document.
pub fn load_policy(path: &Path) -> Result<SearchPolicy, RunError> {
    let text = std::fs::read_to_string(path).map_err(|source| RunError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SearchPolicy::from_toml_str(&text)?)
}

/// One IDA* pass.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IterationReport {
    pub bound: f64,
    pub expanded: u64,
    pub generated: u64,
}

/// A solution with its operators rendered as labels.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SolutionReport {
    pub cost: f64,
    /// States on the path, including the initial state.
    pub length: usize,
    pub operators: Vec<String>,
}

/// Serializable summary of one search run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchReport {
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_function: Option<String>,
    pub algorithm: Algorithm,
    pub weight: f64,
    /// Open list used; absent for IDA*.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heap: Option<HeapKind>,
    pub expanded: u64,
    pub generated: u64,
    pub duplicates: u64,
    pub reopened: u64,
    pub wall_time_ms: u64,
    pub cpu_time_ms: Option<u64>,
    pub iterations: Vec<IterationReport>,
    pub solutions: Vec<SolutionReport>,
    /// `sha256:<hex>` over the deterministic part of the run.
    pub digest: String,
}

impl SearchReport {
    /// Flatten `result` into a report.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] from the run digest.
    pub fn from_result<O>(
        domain: &str,
        policy: &SearchPolicy,
        result: &SearchResult<O>,
        label: impl Fn(&O) -> String,
    ) -> Result<Self, CanonError> {
        let digest = result.digest(&label)?;
        Ok(Self {
            domain: domain.to_string(),
            cost_function: None,
            algorithm: policy.algorithm,
            weight: policy.weight,
            heap: (policy.algorithm == Algorithm::Astar).then_some(policy.heap),
            expanded: result.expanded(),
            generated: result.generated(),
            duplicates: result.duplicates(),
            reopened: result.reopened(),
            wall_time_ms: clamp_millis(result.wall_time_millis()),
            cpu_time_ms: result.cpu_time_millis().map(clamp_millis),
            iterations: result
                .iterations()
                .iter()
                .map(|it| IterationReport {
                    bound: it.bound,
                    expanded: it.expanded,
                    generated: it.generated,
                })
                .collect(),
            solutions: result
                .solutions()
                .iter()
                .map(|s| SolutionReport {
                    cost: s.cost(),
                    length: s.length(),
                    operators: s.operators().iter().map(&label).collect(),
                })
                .collect(),
            digest: digest.as_str().to_string(),
        })
    }

    /// Record the domain's cost function.
    #[must_use]
    pub fn with_cost_function(mut self, name: impl Into<String>) -> Self {
        self.cost_function = Some(name.into());
        self
    }

    /// Pretty JSON rendering.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Report`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RunError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn clamp_millis(ms: u128) -> u64 {
    u64::try_from(ms).unwrap_or(u64::MAX)
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain: {}", self.domain)?;
        if let Some(cost) = &self.cost_function {
            write!(f, " ({cost})")?;
        }
        writeln!(f)?;
        write!(f, "Algorithm: {} (weight {})", self.algorithm, self.weight)?;
        if let Some(heap) = self.heap {
            write!(f, ", {heap} heap")?;
        }
        writeln!(f)?;
        writeln!(f, "Nodes Generated: {}", self.generated)?;
        writeln!(f, "Nodes Expanded: {}", self.expanded)?;
        writeln!(f, "Duplicates: {}", self.duplicates)?;
        writeln!(f, "Reopened: {}", self.reopened)?;
        if !self.iterations.is_empty() {
            writeln!(f, "Iterations: {}", self.iterations.len())?;
        }
        writeln!(f, "Total Wall Time: {}", self.wall_time_ms)?;
        match self.cpu_time_ms {
            Some(ms) => writeln!(f, "Total CPU Time: {ms}")?,
            None => writeln!(f, "Total CPU Time: unavailable")?,
        }
        if self.solutions.is_empty() {
            writeln!(f, "No solution")?;
        }
        for solution in &self.solutions {
            writeln!(f, "Cost: {}", solution.cost)?;
            writeln!(f, "Length: {}", solution.length)?;
        }
        write!(f, "Digest: {}", self.digest)
    }
}

/// Run the search `policy` selects over `domain`.
///
/// `domain_id` names the domain in the report.
///
/// # Errors
///
/// [`RunError::Search`] for an invalid policy or an aborted search;
/// [`RunError::Canon`] if the run cannot be digested.
pub fn run_search<D: SearchDomain>(
    domain: &D,
    domain_id: &str,
    policy: &SearchPolicy,
) -> Result<SearchReport, RunError> {
    tracing::debug!(domain = domain_id, algorithm = %policy.algorithm, "running search");
    let result = waymark_search::search(domain, policy)?;
    let report = SearchReport::from_result(domain_id, policy, &result, |op: &D::Operator| {
        op.label()
    })?;
    Ok(report)
}
