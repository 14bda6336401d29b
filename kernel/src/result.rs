//! Search result and statistics recorder.
//!
//! A passive accumulator written by an algorithm during a run and handed to
//! the caller afterwards. Counters only ever increase; iterations and
//! solutions are kept in the order they were recorded.

use std::fmt;
use std::time::Duration;

use crate::clock::Stopwatch;
use crate::proof::canon::{canonical_json_bytes, f64_bits_hex, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_RUN};

/// One completed IDA* pass.
///
/// `expanded` and `generated` count only the work done during this pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iteration {
    /// Cost bound used for the pass.
    pub bound: f64,
    /// Nodes expanded during the pass.
    pub expanded: u64,
    /// Nodes generated during the pass.
    pub generated: u64,
}

/// A path from the initial state to a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<O> {
    operators: Vec<O>,
    cost: f64,
}

impl<O> Solution<O> {
    /// Build a solution from its root-to-goal operator sequence.
    #[must_use]
    pub fn new(operators: Vec<O>, cost: f64) -> Self {
        Self { operators, cost }
    }

    /// Operators in application order, initial state first.
    #[must_use]
    pub fn operators(&self) -> &[O] {
        &self.operators
    }

    /// Total path cost.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of states on the path (operators + 1).
    #[must_use]
    pub fn length(&self) -> usize {
        self.operators.len() + 1
    }
}

/// Statistics and solutions of one search run.
#[derive(Debug, Clone)]
pub struct SearchResult<O> {
    expanded: u64,
    generated: u64,
    duplicates: u64,
    reopened: u64,
    stopwatch: Stopwatch,
    iterations: Vec<Iteration>,
    solutions: Vec<Solution<O>>,
}

impl<O> Default for SearchResult<O> {
    fn default() -> Self {
        Self {
            expanded: 0,
            generated: 0,
            duplicates: 0,
            reopened: 0,
            stopwatch: Stopwatch::default(),
            iterations: Vec::new(),
            solutions: Vec::new(),
        }
    }
}

impl<O> SearchResult<O> {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- recording ----------------------------------------------------------

    pub fn start_timer(&mut self) {
        self.stopwatch.start();
    }

    pub fn stop_timer(&mut self) {
        self.stopwatch.stop();
    }

    pub fn add_expanded(&mut self, n: u64) {
        self.expanded += n;
    }

    pub fn add_generated(&mut self, n: u64) {
        self.generated += n;
    }

    pub fn add_duplicates(&mut self, n: u64) {
        self.duplicates += n;
    }

    pub fn add_reopened(&mut self, n: u64) {
        self.reopened += n;
    }

    pub fn add_iteration(&mut self, iteration: Iteration) {
        self.iterations.push(iteration);
    }

    pub fn add_solution(&mut self, solution: Solution<O>) {
        self.solutions.push(solution);
    }

    // -- reading ------------------------------------------------------------

    #[must_use]
    pub fn expanded(&self) -> u64 {
        self.expanded
    }

    #[must_use]
    pub fn generated(&self) -> u64 {
        self.generated
    }

    #[must_use]
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    #[must_use]
    pub fn reopened(&self) -> u64 {
        self.reopened
    }

    /// Recorded IDA* passes (empty for best-first search).
    #[must_use]
    pub fn iterations(&self) -> &[Iteration] {
        &self.iterations
    }

    /// Solutions found. Empty when the search proved no goal is reachable
    /// (or gave up); that is a normal outcome, not an error.
    #[must_use]
    pub fn solutions(&self) -> &[Solution<O>] {
        &self.solutions
    }

    /// The first recorded solution, if any.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution<O>> {
        self.solutions.first()
    }

    #[must_use]
    pub fn wall_time(&self) -> Duration {
        self.stopwatch.wall()
    }

    /// Thread CPU time, or `None` where the platform cannot measure it.
    #[must_use]
    pub fn cpu_time(&self) -> Option<Duration> {
        self.stopwatch.cpu()
    }

    #[must_use]
    pub fn wall_time_millis(&self) -> u128 {
        self.wall_time().as_millis()
    }

    #[must_use]
    pub fn cpu_time_millis(&self) -> Option<u128> {
        self.cpu_time().map(|d| d.as_millis())
    }
}

impl<O> SearchResult<O> {
    /// Canonical JSON of the deterministic portion of this run.
    ///
    /// Timing is excluded; floating-point values are carried as bit patterns.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] only if the payload contains a non-integer
    /// number, which this builder never produces.
    pub fn fingerprint<F>(&self, label: F) -> Result<Vec<u8>, CanonError>
    where
        F: Fn(&O) -> String,
    {
        let iterations: Vec<serde_json::Value> = self
            .iterations
            .iter()
            .map(|it| {
                serde_json::json!({
                    "bound": f64_bits_hex(it.bound),
                    "expanded": it.expanded,
                    "generated": it.generated,
                })
            })
            .collect();
        let solutions: Vec<serde_json::Value> = self
            .solutions
            .iter()
            .map(|s| {
                let ops: Vec<String> = s.operators.iter().map(&label).collect();
                serde_json::json!({
                    "cost": f64_bits_hex(s.cost),
                    "length": s.length(),
                    "operators": ops,
                })
            })
            .collect();
        let payload = serde_json::json!({
            "duplicates": self.duplicates,
            "expanded": self.expanded,
            "generated": self.generated,
            "iterations": iterations,
            "reopened": self.reopened,
            "solutions": solutions,
        });
        canonical_json_bytes(&payload)
    }

    /// Content hash of [`SearchResult::fingerprint`].
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] from the fingerprint.
    pub fn digest<F>(&self, label: F) -> Result<ContentHash, CanonError>
    where
        F: Fn(&O) -> String,
    {
        let bytes = self.fingerprint(label)?;
        Ok(canonical_hash(DOMAIN_SEARCH_RUN, &bytes))
    }
}

impl<O> fmt::Display for SearchResult<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes Generated: {}", self.generated)?;
        writeln!(f, "Nodes Expanded: {}", self.expanded)?;
        writeln!(f, "Duplicates: {}", self.duplicates)?;
        writeln!(f, "Reopened: {}", self.reopened)?;
        writeln!(f, "Total Wall Time: {}", self.wall_time_millis())?;
        match self.cpu_time_millis() {
            Some(ms) => writeln!(f, "Total CPU Time: {ms}")?,
            None => writeln!(f, "Total CPU Time: unavailable")?,
        }
        if self.solutions.is_empty() {
            writeln!(f, "No solution")?;
        }
        for solution in &self.solutions {
            writeln!(f, "Cost: {}", solution.cost)?;
            writeln!(f, "Length: {}", solution.length())?;
        }
        Ok(())
    }
}
