//! Waymark Harness: concrete domains and run orchestration.
//!
//! The harness supplies the sliding-tile and pancake domains, loads their
//! instance files, and runs a policy-selected search to produce a
//! [`runner::SearchReport`].
//!
//! The harness does NOT implement search logic; it delegates to
//! `waymark_search`. Domains implement the kernel contract only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod instance;
pub mod runner;
pub mod worlds;
