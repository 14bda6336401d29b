//! Iterative-deepening A*.
//!
//! Repeated depth-first passes, each bounded by a cost threshold. A pass
//! either reaches a goal within the bound or reports the smallest `f` it saw
//! beyond the bound, which becomes the next threshold. No open list and no
//! closed set: memory is the recursion stack.

use waymark_kernel::contract::{DomainOperator, DomainState, SearchDomain};
use waymark_kernel::result::{Iteration, SearchResult, Solution};

use crate::error::SearchError;
use crate::policy::{validate_weight, SearchPolicy, DEFAULT_MAX_DEPTH};

/// IDA* configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct IdaStar {
    weight: f64,
    max_iterations: Option<u64>,
    max_depth: usize,
}

impl Default for IdaStar {
    fn default() -> Self {
        Self {
            weight: 1.0,
            max_iterations: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl IdaStar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// IDA* with `f = g + weight * h`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `weight` is below 1 or not
    /// finite.
    pub fn weighted(weight: f64) -> Result<Self, SearchError> {
        Ok(Self {
            weight: validate_weight(weight)?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn from_policy(policy: &SearchPolicy) -> Self {
        Self {
            weight: policy.weight,
            max_iterations: policy.max_iterations,
            max_depth: policy.max_depth,
        }
    }

    /// Give up (with no solution) after this many passes.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Give up (with no solution) when a path has more than `max_depth`
    /// operators. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn max_iterations(&self) -> Option<u64> {
        self.max_iterations
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Search `domain` from its initial state.
    ///
    /// The search ends without a solution when a pass sees no state beyond
    /// its bound (the reachable space is exhausted), when a path exceeds the
    /// depth limit, or when the configured iteration limit is reached.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Domain`] if the domain fails to apply an
    /// operator; the run is abandoned.
    pub fn search<D: SearchDomain>(
        &self,
        domain: &D,
    ) -> Result<SearchResult<D::Operator>, SearchError> {
        let mut result = SearchResult::new();
        result.start_timer();
        let outcome = self.iterate(domain, &mut result);
        result.stop_timer();
        outcome?;

        match result.solution() {
            Some(solution) => tracing::info!(
                iterations = result.iterations().len(),
                expanded = result.expanded(),
                generated = result.generated(),
                cost = solution.cost(),
                "IDA* search finished"
            ),
            None => tracing::info!(
                iterations = result.iterations().len(),
                expanded = result.expanded(),
                generated = result.generated(),
                "IDA* search finished: no solution"
            ),
        }
        Ok(result)
    }

    fn iterate<D: SearchDomain>(
        &self,
        domain: &D,
        result: &mut SearchResult<D::Operator>,
    ) -> Result<(), SearchError> {
        let root = domain.initial_state();
        let mut bound = self.weight * root.h();
        let mut passes: u64 = 0;
        loop {
            let mut pass = Pass {
                domain,
                weight: self.weight,
                bound,
                max_depth: self.max_depth,
                minoob: None,
                expanded: 0,
                generated: 0,
                path: Vec::new(),
            };
            let outcome = pass.dfs(&root, 0.0, None, 0)?;
            passes += 1;

            result.add_iteration(Iteration {
                bound,
                expanded: pass.expanded,
                generated: pass.generated,
            });
            result.add_expanded(pass.expanded);
            result.add_generated(pass.generated);
            tracing::debug!(
                iteration = passes,
                bound,
                expanded = pass.expanded,
                generated = pass.generated,
                "IDA* iteration complete"
            );

            match outcome {
                Outcome::Found(cost) => {
                    let mut path = pass.path;
                    path.reverse();
                    result.add_solution(Solution::new(path, cost));
                    return Ok(());
                }
                Outcome::TooDeep => {
                    tracing::warn!(
                        iteration = passes,
                        bound,
                        max_depth = self.max_depth,
                        "IDA* depth limit reached; stopping without a solution"
                    );
                    return Ok(());
                }
                Outcome::Exhausted => {}
            }
            let Some(next) = pass.minoob else {
                return Ok(());
            };
            if self.max_iterations.is_some_and(|max| passes >= max) {
                tracing::warn!(
                    iterations = passes,
                    bound,
                    next,
                    "IDA* iteration limit reached; stopping without a solution"
                );
                return Ok(());
            }
            bound = next;
        }
    }
}

/// How a subtree of a pass ended.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    /// A goal within the bound, at this cost.
    Found(f64),
    /// No goal within the bound.
    Exhausted,
    /// A path outgrew the depth limit; the whole pass is abandoned.
    TooDeep,
}

/// One bounded depth-first pass.
struct Pass<'a, D: SearchDomain> {
    domain: &'a D,
    weight: f64,
    bound: f64,
    max_depth: usize,
    /// Smallest `f` seen beyond the bound; always greater than `bound`, so
    /// bounds strictly increase from pass to pass.
    minoob: Option<f64>,
    expanded: u64,
    generated: u64,
    /// Goal-to-root operators, filled while unwinding from a goal.
    path: Vec<D::Operator>,
}

impl<D: SearchDomain> Pass<'_, D> {
    /// Search below `state`, which sits `depth` operators from the root.
    fn dfs(
        &mut self,
        state: &D::State,
        cost: f64,
        pop: Option<&D::Operator>,
        depth: usize,
    ) -> Result<Outcome, SearchError> {
        let f = cost + self.weight * state.h();

        if f <= self.bound && self.domain.is_goal(state) {
            return Ok(Outcome::Found(f));
        }
        if f > self.bound {
            if !matches!(self.minoob, Some(m) if m <= f) {
                self.minoob = Some(f);
            }
            return Ok(Outcome::Exhausted);
        }
        if depth >= self.max_depth {
            return Ok(Outcome::TooDeep);
        }

        self.expanded += 1;
        for i in 0..self.domain.num_operators(state) {
            let op = self.domain.operator(state, i);
            if pop == Some(&op) {
                continue;
            }
            self.generated += 1;
            let child = self.domain.apply(state, &op)?;
            let reverse = op.reverse(state);
            match self.dfs(&child, cost + op.cost(state), Some(&reverse), depth + 1)? {
                Outcome::Exhausted => {}
                Outcome::Found(goal_cost) => {
                    self.path.push(op);
                    return Ok(Outcome::Found(goal_cost));
                }
                Outcome::TooDeep => return Ok(Outcome::TooDeep),
            }
        }
        Ok(Outcome::Exhausted)
    }
}
