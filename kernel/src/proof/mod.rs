//! Run digests: canonical JSON and domain-separated hashing.
//!
//! A run digest covers only the deterministic portion of a search result
//! (counters, iterations, solutions), never timing.

pub mod canon;
pub mod hash;
