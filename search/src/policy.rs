//! Search policy: which algorithm to run and how to configure it.

use crate::error::SearchError;
use crate::frontier::HeapKind;

/// Bucket count per rank level when none is configured.
pub const DEFAULT_BUCKET_CAPACITY: usize = 100;

/// Initial closed-set and node-arena size when none is configured.
pub const DEFAULT_CLOSED_CAPACITY: usize = 4096;

/// IDA* recursion depth limit when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 1_000;

/// Search algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Best-first search with a closed set (A* / Weighted A*).
    #[default]
    Astar,
    /// Iterative-deepening depth-first search.
    IdaStar,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Astar => f.write_str("astar"),
            Self::IdaStar => f.write_str("idastar"),
        }
    }
}

/// Search configuration loaded from TOML.
///
/// Every field has a default, so a partial (or empty) document is valid.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchPolicy {
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Heuristic weight; 1.0 is plain A* / IDA*.
    #[serde(default = "default_weight")]
    pub weight: f64,

    /// Open-list flavour for best-first search.
    #[serde(default)]
    pub heap: HeapKind,

    /// Bucket count per rank level for [`HeapKind::Bucket`].
    #[serde(default = "default_bucket_capacity")]
    pub bucket_capacity: usize,

    /// Initial closed-set capacity. A sizing hint, never a limit.
    #[serde(default = "default_closed_capacity")]
    pub closed_capacity: usize,

    /// IDA* only: stop without a solution after this many passes.
    #[serde(default)]
    pub max_iterations: Option<u64>,

    /// IDA* only: stop without a solution when a path grows deeper than
    /// this. Zero-cost cycles inside the bound would otherwise recurse
    /// forever.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_weight() -> f64 {
    1.0
}
fn default_bucket_capacity() -> usize {
    DEFAULT_BUCKET_CAPACITY
}
fn default_closed_capacity() -> usize {
    DEFAULT_CLOSED_CAPACITY
}
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            weight: default_weight(),
            heap: HeapKind::default(),
            bucket_capacity: default_bucket_capacity(),
            closed_capacity: default_closed_capacity(),
            max_iterations: None,
            max_depth: default_max_depth(),
        }
    }
}

/// Check a heuristic weight: finite and at least 1.
pub(crate) fn validate_weight(weight: f64) -> Result<f64, SearchError> {
    if weight.is_finite() && weight >= 1.0 {
        Ok(weight)
    } else {
        Err(SearchError::InvalidPolicy {
            detail: format!("weight must be finite and >= 1, got {weight}"),
        })
    }
}

impl SearchPolicy {
    /// Parse and validate a TOML policy document.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the document is malformed
    /// or names an out-of-range value.
    pub fn from_toml_str(text: &str) -> Result<Self, SearchError> {
        let policy: Self = toml::from_str(text).map_err(|e| SearchError::InvalidPolicy {
            detail: e.to_string(),
        })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Reject values no search can run with; warn about legal but lossy ones.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a weight below 1 or not
    /// finite, a zero bucket capacity, a zero iteration limit, or a zero
    /// depth limit.
    pub fn validate(&self) -> Result<(), SearchError> {
        validate_weight(self.weight)?;
        if self.bucket_capacity == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "bucket_capacity must be at least 1".into(),
            });
        }
        if self.max_iterations == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_iterations must be at least 1 when set".into(),
            });
        }
        if self.max_depth == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_depth must be at least 1".into(),
            });
        }
        if self.algorithm == Algorithm::Astar
            && self.heap == HeapKind::Bucket
            && self.weight.fract() != 0.0
        {
            tracing::warn!(
                weight = self.weight,
                "fractional weight with the bucket heap; f ranks are truncated"
            );
        }
        if self.algorithm == Algorithm::IdaStar && self.heap != HeapKind::default() {
            tracing::warn!(heap = %self.heap, "heap setting is ignored by IDA*");
        }
        Ok(())
    }
}
