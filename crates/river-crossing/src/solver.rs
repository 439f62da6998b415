//! Solver entry points, configuration and result types.
//!
//! Both strategies return a [`SearchResult`]: the path from the start state
//! to the first goal found plus the counters accumulated during the call.
//! An empty path is the no-solution outcome, never an error.

use serde::{Deserialize, Serialize};

use crate::bfs::solve_bfs;
use crate::ids::solve_ids;
use crate::instance::Instance;
use crate::state::{Move, State};

/// Default ceiling on the IDS depth bound
pub const DEFAULT_MAX_DEPTH_CAP: usize = 64;

/// Depth and cost reported when no solution was found
pub const NO_SOLUTION: i64 = -1;

/// Search strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Breadth-first graph search
    Bfs,
    /// Iterative-deepening depth-first search
    Ids,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Ids => "IDS",
        }
    }
}

/// Configuration for the solvers
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Largest depth bound IDS will try before giving up
    pub max_depth_cap: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth_cap: DEFAULT_MAX_DEPTH_CAP,
        }
    }
}

/// What `max_frontier_size` counts. The two solvers measure different
/// things, so their values are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierMeasure {
    /// Peak length of the BFS queue
    QueueLength,
    /// Peak number of states on the IDS recursion stack
    RecursionDepth,
}

/// Counters collected during one solver call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub nodes_generated: u64,
    pub nodes_expanded: u64,
    pub max_frontier_size: usize,
    pub frontier_measure: FrontierMeasure,
    /// Moves in the solution, or [`NO_SOLUTION`]
    pub solution_depth: i64,
    /// Unit cost per move, so equal to `solution_depth`
    pub solution_cost: i64,
    /// Bound of the successful IDS iteration; always `None` for BFS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_limit_used: Option<usize>,
}

impl Metrics {
    pub(crate) fn new(frontier_measure: FrontierMeasure) -> Self {
        Self {
            nodes_generated: 0,
            nodes_expanded: 0,
            max_frontier_size: 1,
            frontier_measure,
            solution_depth: NO_SOLUTION,
            solution_cost: NO_SOLUTION,
            depth_limit_used: None,
        }
    }

    pub(crate) fn record_solution(&mut self, path_len: usize) {
        let depth = path_len as i64 - 1;
        self.solution_depth = depth;
        self.solution_cost = depth;
    }
}

/// A state on a solution path and the move that reached it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub state: State,
    /// `None` for the start state
    pub via: Option<Move>,
}

/// Result of one solver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Start to goal; empty when no solution was found
    pub path: Vec<PathStep>,
    pub metrics: Metrics,
}

impl SearchResult {
    pub(crate) fn solved(path: Vec<PathStep>, mut metrics: Metrics) -> Self {
        metrics.record_solution(path.len());
        Self { path, metrics }
    }

    pub(crate) fn unsolved(metrics: Metrics) -> Self {
        Self {
            path: Vec::new(),
            metrics,
        }
    }

    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    /// Moves along the path, in order
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.path.iter().filter_map(|step| step.via)
    }
}

/// Run the chosen strategy on `instance`.
pub fn solve(instance: &Instance, algorithm: Algorithm, config: &SolverConfig) -> SearchResult {
    match algorithm {
        Algorithm::Bfs => solve_bfs(instance),
        Algorithm::Ids => solve_ids(instance, config.max_depth_cap),
    }
}
