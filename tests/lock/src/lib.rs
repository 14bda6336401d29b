//! Shared fixtures, instrumented domains, and a brute-force oracle for the
//! cross-crate lock tests.
//!
//! Helpers here panic on misuse; they are test-only.

pub mod fixtures;
pub mod probe;
