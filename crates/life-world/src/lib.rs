//! Game of Life simulation engine.
//!
//! This module implements the bounded 2D grid simulation: sparse
//! neighbor-voting transitions, the potential dissimilarity measure, and the
//! run loop with its stagnation-based shutdown rule.

pub mod simulation;

pub use simulation::{potential, GameOfLife, RunResults, RunSummary};
