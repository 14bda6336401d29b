//! Waymark Search: A*, Weighted A* and IDA* over a pluggable domain.
//!
//! This crate depends only on `waymark_kernel`; it does NOT depend on
//! `waymark_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! waymark_kernel  ←  waymark_search  ←  waymark_harness
//! (contract,          (open lists,        (domains, loaders,
//!  result, digest)     A*, IDA*, policy)   runner, CLI)
//! ```
//!
//! # Key types
//!
//! - [`Astar`] -- best-first search with duplicate merging and reopening
//! - [`IdaStar`] -- iterative deepening with exact next-bound propagation
//! - [`frontier::OpenList`] -- index-aware open list (binary or bucket heap)
//! - [`SearchPolicy`] -- TOML-loadable algorithm configuration
//! - [`search()`] -- run whatever a policy selects

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod astar;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod idastar;
pub mod node;
pub mod policy;
pub mod search;


pub use astar::Astar;
pub use contract::SearchAlgorithm;
pub use error::SearchError;
pub use frontier::HeapKind;
pub use idastar::IdaStar;
pub use policy::{Algorithm, SearchPolicy};
pub use search::search;
