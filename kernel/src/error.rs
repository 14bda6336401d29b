//! Typed domain errors.
//!
//! Raised by a [`crate::contract::SearchDomain`] implementation. The search
//! algorithms never retry or suppress these: the run aborts and the error
//! reaches the caller unchanged.

use crate::contract::PackedState;

/// Failure raised by a domain while applying, packing, or unpacking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A packed word does not decode to a valid state.
    #[error("packed state {packed:#018x} is invalid: {detail}")]
    InvalidPacked { packed: PackedState, detail: String },

    /// An operator is not applicable to the given state.
    #[error("operator not applicable: {detail}")]
    InapplicableOperator { detail: String },

    /// Any other contract violation detected by the domain.
    #[error("invalid domain state: {detail}")]
    Invalid { detail: String },
}
