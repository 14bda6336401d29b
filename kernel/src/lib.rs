//! Waymark Kernel: the domain contract and the run recorder.
//!
//! # API Surface
//!
//! - [`contract::SearchDomain`] -- the boundary a problem domain implements
//! - [`result::SearchResult`] -- statistics and solutions of one run
//! - [`proof::hash::canonical_hash`] -- domain-separated run digests
//!
//! # Module Dependency Direction
//!
//! `error` ← `contract`; `clock` ← `result` → `proof`
//!
//! The kernel knows nothing about search algorithms or open lists.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod contract;
pub mod error;
pub mod proof;
pub mod result;
