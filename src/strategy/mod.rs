//! Evaluation strategies over a parsed document
//!
//! - Parallel: batch path evaluation with Rayon

pub mod parallel;

pub use parallel::{find_nodes_parallel, values_parallel, xmap};
