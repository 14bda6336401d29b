//! Problem domains implementing the kernel's search domain contract.

pub mod fifteen_puzzle;
pub mod pancakes;
