//! Search domain contract: the boundary the search algorithms consume.
//!
//! A domain owns its state and operator types. The core never inspects a
//! state beyond its heuristic estimates, and never mutates one in place:
//! every transition goes through [`SearchDomain::apply`], which returns a new
//! state so that parent states stay valid.

use std::fmt::Debug;

use crate::error::DomainError;

/// A 64-bit fingerprint of a state.
///
/// Used as the closed-set key and as the compact representation stored in
/// search nodes. Two distinct reachable states must never pack to the same
/// word; doing so silently merges them.
pub type PackedState = u64;

/// Heuristic estimates carried by every domain state.
pub trait DomainState {
    /// Admissible estimate of the remaining cost to a goal.
    fn h(&self) -> f64;

    /// Admissible estimate of the remaining number of steps to a goal.
    ///
    /// By convention zero exactly at goal states.
    fn d(&self) -> f64;
}

/// A domain action, relative to the state it is applied to.
pub trait DomainOperator<S>: Clone + PartialEq + Debug {
    /// Non-negative cost of applying this operator to `state`.
    fn cost(&self, state: &S) -> f64;

    /// The operator that undoes this one, given the pre-application `state`.
    #[must_use]
    fn reverse(&self, state: &S) -> Self;

    /// Stable human-readable identifier, used in reports and run digests.
    fn label(&self) -> String;
}

/// A pluggable problem description.
///
/// # Contract
///
/// - Operator enumeration (`num_operators` / `operator`) must be
///   deterministic and stable across repeated calls on equal states;
///   tie-breaking and reproducible node counts depend on it.
/// - `apply` is pure: it never mutates its input.
/// - `unpack(pack(s))` must recover everything expansion needs (goal test,
///   heuristic, operator enumeration).
///
/// Violations of this contract are undetectable by the algorithms.
pub trait SearchDomain {
    /// Concrete state type.
    type State: DomainState + Clone;
    /// Concrete operator type.
    type Operator: DomainOperator<Self::State>;

    /// The initial state of this instance.
    fn initial_state(&self) -> Self::State;

    /// Whether `state` is a goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Number of operators applicable to `state`.
    fn num_operators(&self, state: &Self::State) -> usize;

    /// The `index`-th operator applicable to `state`.
    fn operator(&self, state: &Self::State, index: usize) -> Self::Operator;

    /// Apply `op` to `state`, producing a new state.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if `op` cannot be applied to `state`.
    fn apply(&self, state: &Self::State, op: &Self::Operator) -> Result<Self::State, DomainError>;

    /// Deep, independent copy of `state`.
    fn copy(&self, state: &Self::State) -> Self::State {
        state.clone()
    }

    /// Pack `state` into its 64-bit fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the state cannot be represented.
    fn pack(&self, state: &Self::State) -> Result<PackedState, DomainError>;

    /// Recover a state from its fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPacked`] if `packed` does not decode to a
    /// valid state of this domain.
    fn unpack(&self, packed: PackedState) -> Result<Self::State, DomainError>;
}
