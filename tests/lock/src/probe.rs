//! Instrumented domain wrapper.
//!
//! `Probe` forwards every call to the wrapped domain while counting how the
//! search drives it, and can be armed to fail after a number of packs.

use std::cell::Cell;

use waymark_kernel::contract::{PackedState, SearchDomain};
use waymark_kernel::error::DomainError;

#[derive(Debug)]
pub struct Probe<D> {
    inner: D,
    expansions: Cell<u64>,
    offered: Cell<u64>,
    handed_out: Cell<u64>,
    applied: Cell<u64>,
    packs: Cell<u64>,
    fail_after_packs: Option<u64>,
}

impl<D: SearchDomain> Probe<D> {
    #[must_use]
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            expansions: Cell::new(0),
            offered: Cell::new(0),
            handed_out: Cell::new(0),
            applied: Cell::new(0),
            packs: Cell::new(0),
            fail_after_packs: None,
        }
    }

    /// Make every `pack` after the first `packs` fail.
    #[must_use]
    pub fn failing_after(mut self, packs: u64) -> Self {
        self.fail_after_packs = Some(packs);
        self
    }

    /// Calls to `num_operators`, one per expansion.
    #[must_use]
    pub fn expansions(&self) -> u64 {
        self.expansions.get()
    }

    /// Sum of `num_operators` over every expansion.
    #[must_use]
    pub fn offered(&self) -> u64 {
        self.offered.get()
    }

    /// Calls to `operator`: moves actually considered, reverse moves included.
    #[must_use]
    pub fn handed_out(&self) -> u64 {
        self.handed_out.get()
    }

    /// Calls to `apply`.
    #[must_use]
    pub fn applied(&self) -> u64 {
        self.applied.get()
    }
}

impl<D: SearchDomain> SearchDomain for Probe<D> {
    type State = D::State;
    type Operator = D::Operator;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        self.inner.is_goal(state)
    }

    fn num_operators(&self, state: &Self::State) -> usize {
        let n = self.inner.num_operators(state);
        self.expansions.set(self.expansions.get() + 1);
        self.offered.set(self.offered.get() + n as u64);
        n
    }

    fn operator(&self, state: &Self::State, index: usize) -> Self::Operator {
        self.handed_out.set(self.handed_out.get() + 1);
        self.inner.operator(state, index)
    }

    fn apply(&self, state: &Self::State, op: &Self::Operator) -> Result<Self::State, DomainError> {
        self.applied.set(self.applied.get() + 1);
        self.inner.apply(state, op)
    }

    fn pack(&self, state: &Self::State) -> Result<PackedState, DomainError> {
        let packs = self.packs.get() + 1;
        self.packs.set(packs);
        if self.fail_after_packs.is_some_and(|limit| packs > limit) {
            return Err(DomainError::Invalid {
                detail: format!("probe refused pack #{packs}"),
            });
        }
        self.inner.pack(state)
    }

    fn unpack(&self, packed: PackedState) -> Result<Self::State, DomainError> {
        self.inner.unpack(packed)
    }
}
