//! Breadth-first graph search.
//!
//! States are marked visited when enqueued, so each is expanded at most
//! once. With unit move costs the first goal dequeued lies on a shortest
//! path.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::info;

use crate::instance::Instance;
use crate::solver::{FrontierMeasure, Metrics, PathStep, SearchResult};
use crate::state::{is_goal, successors, Move, State};

/// Solve `instance` with breadth-first search.
///
/// `max_frontier_size` in the returned metrics is the peak queue length.
pub fn solve_bfs(instance: &Instance) -> SearchResult {
    info!(
        event = "solve_start",
        algorithm = "bfs",
        instance = instance.name(),
        items = instance.item_count(),
    );

    let start = instance.start_state();
    let mut metrics = Metrics::new(FrontierMeasure::QueueLength);
    let mut frontier: VecDeque<State> = VecDeque::from([start]);
    let mut visited: HashSet<State> = HashSet::from([start]);
    // Backpointers recorded at discovery time
    let mut parents: HashMap<State, (State, Move)> = HashMap::new();

    while let Some(state) = frontier.pop_front() {
        metrics.nodes_expanded += 1;

        if is_goal(&state, instance) {
            let result = SearchResult::solved(reconstruct_path(state, &parents), metrics);
            info!(
                event = "solve_end",
                algorithm = "bfs",
                solved = true,
                depth = result.metrics.solution_depth,
                nodes_expanded = result.metrics.nodes_expanded,
                nodes_generated = result.metrics.nodes_generated,
            );
            return result;
        }

        for (next, mv) in successors(&state, instance) {
            if !visited.insert(next) {
                continue;
            }
            parents.insert(next, (state, mv));
            frontier.push_back(next);
            metrics.nodes_generated += 1;
            metrics.max_frontier_size = metrics.max_frontier_size.max(frontier.len());
        }
    }

    info!(
        event = "solve_end",
        algorithm = "bfs",
        solved = false,
        nodes_expanded = metrics.nodes_expanded,
        nodes_generated = metrics.nodes_generated,
    );
    SearchResult::unsolved(metrics)
}

/// Walk backpointers from `goal` to the start, which has no parent
fn reconstruct_path(goal: State, parents: &HashMap<State, (State, Move)>) -> Vec<PathStep> {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some(&(parent, mv)) = parents.get(&current) {
        path.push(PathStep {
            state: current,
            via: Some(mv),
        });
        current = parent;
    }
    path.push(PathStep {
        state: current,
        via: None,
    });
    path.reverse();
    path
}
