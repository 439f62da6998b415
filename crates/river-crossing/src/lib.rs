//! River-crossing puzzle solver library.
//!
//! This crate models two-bank transport puzzles (a farmer ferrying items
//! that must not be left together unsupervised) and solves them with
//! uninformed search: breadth-first search and iterative deepening.
//! The `river-crossing` binary renders the results.

pub mod bfs;
pub mod error;
pub mod ids;
pub mod instance;
pub mod report;
pub mod solver;
pub mod state;

#[cfg(test)]
mod test_utils;

// Re-export main types
pub use bfs::solve_bfs;
pub use error::ConfigError;
pub use ids::solve_ids;
pub use instance::{
    Bank, ForbiddenPair, Instance, InstanceConfig, ItemId, ItemSet, BUILTIN_INSTANCES, MAX_ITEMS,
};
pub use report::{move_label, render_text, RunReport};
pub use solver::{
    solve, Algorithm, FrontierMeasure, Metrics, PathStep, SearchResult, SolverConfig,
    DEFAULT_MAX_DEPTH_CAP, NO_SOLUTION,
};
pub use state::{is_goal, is_safe, successors, Move, State};
