//! Best-first search: A* and Weighted A*.
//!
//! Every distinct packed state gets exactly one [`SearchNode`] in an arena.
//! The closed set maps a fingerprint to that node's handle and the open list
//! queues handles, so a cheaper path found later is written into the node in
//! place and the open list is told about it (or the node is reopened).

use rustc_hash::FxHashMap;
use waymark_kernel::contract::{DomainOperator, DomainState, PackedState, SearchDomain};
use waymark_kernel::result::{SearchResult, Solution};

use crate::error::SearchError;
use crate::frontier::{build_open_list, HeapKind, OpenList};
use crate::node::{compare, reconstruct_path, SearchNode};
use crate::policy::{validate_weight, SearchPolicy, DEFAULT_BUCKET_CAPACITY, DEFAULT_CLOSED_CAPACITY};

/// A* / Weighted A* configuration.
///
/// Each call to [`Astar::search`] owns a fresh open list, closed set, and
/// node arena; nothing carries over between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Astar {
    weight: f64,
    heap: HeapKind,
    bucket_capacity: usize,
    closed_capacity: usize,
}

impl Default for Astar {
    fn default() -> Self {
        Self {
            weight: 1.0,
            heap: HeapKind::Binary,
            bucket_capacity: DEFAULT_BUCKET_CAPACITY,
            closed_capacity: DEFAULT_CLOSED_CAPACITY,
        }
    }
}

impl Astar {
    /// Plain A* over a binary heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain A* over the given open-list flavour.
    #[must_use]
    pub fn with_heap(heap: HeapKind) -> Self {
        Self {
            heap,
            ..Self::default()
        }
    }

    /// Weighted A*: `f = g + weight * h`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `weight` is below 1 or not
    /// finite.
    pub fn weighted(weight: f64, heap: HeapKind) -> Result<Self, SearchError> {
        Ok(Self {
            weight: validate_weight(weight)?,
            heap,
            ..Self::default()
        })
    }

    /// Configuration taken from a validated policy.
    #[must_use]
    pub fn from_policy(policy: &SearchPolicy) -> Self {
        Self {
            weight: policy.weight,
            heap: policy.heap,
            bucket_capacity: policy.bucket_capacity,
            closed_capacity: policy.closed_capacity,
        }
    }

    /// Number of rank buckets per level when using the bucket heap.
    #[must_use]
    pub fn with_bucket_capacity(mut self, capacity: usize) -> Self {
        self.bucket_capacity = capacity;
        self
    }

    /// Initial size of the closed set and node arena. Not a limit.
    #[must_use]
    pub fn with_closed_capacity(mut self, capacity: usize) -> Self {
        self.closed_capacity = capacity;
        self
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn heap(&self) -> HeapKind {
        self.heap
    }

    /// Search `domain` from its initial state.
    ///
    /// Exhausting the open list without reaching a goal is a normal outcome:
    /// the returned result simply has no solutions.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Domain`] if the domain fails to apply, pack, or
    /// unpack, and [`SearchError::RankOutOfRange`] if a node does not fit the
    /// bucket heap. The run is abandoned in both cases.
    pub fn search<D: SearchDomain>(
        &self,
        domain: &D,
    ) -> Result<SearchResult<D::Operator>, SearchError> {
        tracing::debug!(
            weight = self.weight,
            heap = %self.heap,
            bucket_capacity = self.bucket_capacity,
            closed_capacity = self.closed_capacity,
            "A* search started"
        );
        let mut result = SearchResult::new();
        result.start_timer();
        let mut run = BestFirstRun::new(domain, self);
        let outcome = run.execute(&mut result);
        result.stop_timer();
        outcome?;

        match result.solution() {
            Some(solution) => tracing::info!(
                expanded = result.expanded(),
                generated = result.generated(),
                duplicates = result.duplicates(),
                reopened = result.reopened(),
                cost = solution.cost(),
                length = solution.length(),
                "A* search finished"
            ),
            None => tracing::info!(
                expanded = result.expanded(),
                generated = result.generated(),
                duplicates = result.duplicates(),
                reopened = result.reopened(),
                "A* search finished: no solution"
            ),
        }
        Ok(result)
    }
}

/// Mutable state of one best-first run.
struct BestFirstRun<'a, D>
where
    D: SearchDomain,
    D::Operator: 'a,
{
    domain: &'a D,
    weight: f64,
    open: Box<dyn OpenList<SearchNode<D::Operator>> + 'a>,
    closed: FxHashMap<PackedState, usize>,
    nodes: Vec<SearchNode<D::Operator>>,
}

impl<'a, D> BestFirstRun<'a, D>
where
    D: SearchDomain,
    D::Operator: 'a,
{
    fn new(domain: &'a D, config: &Astar) -> Self {
        Self {
            domain,
            weight: config.weight,
            open: build_open_list(
                config.heap,
                compare::<D::Operator>,
                config.bucket_capacity,
                config.closed_capacity,
            ),
            closed: FxHashMap::with_capacity_and_hasher(config.closed_capacity, Default::default()),
            nodes: Vec::with_capacity(config.closed_capacity),
        }
    }

    fn execute(&mut self, result: &mut SearchResult<D::Operator>) -> Result<(), SearchError> {
        let initial = self.domain.initial_state();
        let packed = self.domain.pack(&initial)?;
        self.nodes
            .push(SearchNode::root(packed, self.weight * initial.h()));
        self.open.insert(&mut self.nodes, 0)?;
        self.closed.insert(packed, 0);

        while let Some(n) = self.open.extract_min(&mut self.nodes) {
            let state = self.domain.unpack(self.nodes[n].packed)?;
            if self.domain.is_goal(&state) {
                let path = reconstruct_path(&self.nodes, n);
                result.add_solution(Solution::new(path, self.nodes[n].g));
                return Ok(());
            }
            result.add_expanded(1);
            self.expand(n, &state, result)?;
        }
        Ok(())
    }

    fn expand(
        &mut self,
        n: usize,
        state: &D::State,
        result: &mut SearchResult<D::Operator>,
    ) -> Result<(), SearchError> {
        let g = self.nodes[n].g;
        let pop = self.nodes[n].pop.clone();
        for i in 0..self.domain.num_operators(state) {
            let op = self.domain.operator(state, i);
            if pop.as_ref() == Some(&op) {
                continue;
            }
            result.add_generated(1);
            let child_state = self.domain.apply(state, &op)?;
            let packed = self.domain.pack(&child_state)?;
            let child_g = g + op.cost(state);
            let child_f = child_g + self.weight * child_state.h();
            let reverse = op.reverse(state);
            let child = SearchNode::child(packed, child_g, child_f, op, reverse, n);

            if let Some(&dup) = self.closed.get(&packed) {
                result.add_duplicates(1);
                if self.nodes[dup].g > child_g {
                    self.nodes[dup].adopt_path(child);
                    if self.open.contains(&self.nodes, dup) {
                        self.open.update(&mut self.nodes, dup)?;
                    } else {
                        result.add_reopened(1);
                        tracing::trace!(packed, g = child_g, "reopening closed node");
                        self.open.insert(&mut self.nodes, dup)?;
                    }
                }
            } else {
                let handle = self.nodes.len();
                self.nodes.push(child);
                self.open.insert(&mut self.nodes, handle)?;
                self.closed.insert(packed, handle);
            }
        }
        Ok(())
    }
}
