//! Iterative-deepening depth-first search.
//!
//! Each iteration runs a fresh depth-limited search with a larger bound.
//! Only the states on the current recursion stack are excluded from
//! expansion, so a state may be explored again from sibling branches and in
//! later iterations. The repeated shallow work is the price of a memory
//! footprint proportional to the depth rather than to the frontier.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::instance::Instance;
use crate::solver::{FrontierMeasure, Metrics, PathStep, SearchResult};
use crate::state::{is_goal, successors, State};

/// Outcome of one depth-limited search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Goal reached; the active path ends at this state
    Goal(State),
    /// Some branch was cut by the bound, a larger bound may help
    Cutoff,
    /// The whole tree under the bound was explored without a goal
    Exhausted,
}

/// One depth-limited search from the start state
struct DepthLimited<'a> {
    instance: &'a Instance,
    limit: usize,
    path: Vec<PathStep>,
    on_path: HashSet<State>,
    metrics: &'a mut Metrics,
}

impl<'a> DepthLimited<'a> {
    fn new(instance: &'a Instance, limit: usize, metrics: &'a mut Metrics) -> Self {
        let start = instance.start_state();
        Self {
            instance,
            limit,
            path: vec![PathStep {
                state: start,
                via: None,
            }],
            on_path: HashSet::from([start]),
            metrics,
        }
    }

    /// Search below the last state of the active path, `depth` moves from
    /// the start.
    fn search(&mut self, depth: usize) -> Outcome {
        let instance = self.instance;
        let node = match self.path.last() {
            Some(step) => step.state,
            None => return Outcome::Exhausted,
        };

        self.metrics.nodes_expanded += 1;
        self.metrics.max_frontier_size = self.metrics.max_frontier_size.max(depth + 1);

        if is_goal(&node, instance) {
            return Outcome::Goal(node);
        }
        if depth == self.limit {
            return Outcome::Cutoff;
        }

        let mut cutoff = false;
        for (next, mv) in successors(&node, instance) {
            self.metrics.nodes_generated += 1;
            if self.on_path.contains(&next) {
                continue;
            }

            self.path.push(PathStep {
                state: next,
                via: Some(mv),
            });
            self.on_path.insert(next);

            match self.search(depth + 1) {
                goal @ Outcome::Goal(_) => return goal,
                Outcome::Cutoff => cutoff = true,
                Outcome::Exhausted => {}
            }

            self.on_path.remove(&next);
            self.path.pop();
        }

        if cutoff {
            Outcome::Cutoff
        } else {
            Outcome::Exhausted
        }
    }

    fn into_path(self) -> Vec<PathStep> {
        self.path
    }
}

/// Solve `instance` with iterative deepening, trying bounds `0..=max_depth_cap`.
///
/// Counters accumulate over all iterations. `max_frontier_size` in the
/// returned metrics is the peak recursion depth, counted in states.
pub fn solve_ids(instance: &Instance, max_depth_cap: usize) -> SearchResult {
    info!(
        event = "solve_start",
        algorithm = "ids",
        instance = instance.name(),
        items = instance.item_count(),
        max_depth_cap,
    );

    let mut metrics = Metrics::new(FrontierMeasure::RecursionDepth);

    for limit in 0..=max_depth_cap {
        let mut search = DepthLimited::new(instance, limit, &mut metrics);
        let outcome = search.search(0);
        let path = search.into_path();

        debug!(
            event = "iteration_end",
            limit,
            outcome = ?outcome,
            nodes_expanded = metrics.nodes_expanded,
            nodes_generated = metrics.nodes_generated,
        );

        match outcome {
            Outcome::Goal(goal) => {
                metrics.depth_limit_used = Some(limit);
                let result = SearchResult::solved(path, metrics);
                info!(
                    event = "solve_end",
                    algorithm = "ids",
                    solved = true,
                    goal = %goal.display(instance),
                    depth = result.metrics.solution_depth,
                    nodes_expanded = result.metrics.nodes_expanded,
                    nodes_generated = result.metrics.nodes_generated,
                );
                return result;
            }
            Outcome::Cutoff => {}
            Outcome::Exhausted => break,
        }
    }

    info!(
        event = "solve_end",
        algorithm = "ids",
        solved = false,
        nodes_expanded = metrics.nodes_expanded,
        nodes_generated = metrics.nodes_generated,
    );
    SearchResult::unsolved(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::NO_SOLUTION;
    use crate::test_utils::all_forbidden;

    #[test]
    fn test_zero_bound_cuts_off_at_start() {
        let instance = Instance::classic();
        let mut metrics = Metrics::new(FrontierMeasure::RecursionDepth);
        let outcome = DepthLimited::new(&instance, 0, &mut metrics).search(0);

        assert_eq!(outcome, Outcome::Cutoff);
        assert_eq!(metrics.nodes_expanded, 1);
        assert_eq!(metrics.nodes_generated, 0);
    }

    #[test]
    fn test_goal_found_at_exact_bound() {
        let instance = Instance::classic();
        let mut metrics = Metrics::new(FrontierMeasure::RecursionDepth);

        let mut short = DepthLimited::new(&instance, 6, &mut metrics);
        assert_eq!(short.search(0), Outcome::Cutoff);

        let mut exact = DepthLimited::new(&instance, 7, &mut metrics);
        let outcome = exact.search(0);
        let path = exact.into_path();
        assert_eq!(outcome, Outcome::Goal(path[7].state));
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn test_exhausted_tree_stops_deepening() {
        let result = solve_ids(&all_forbidden(3), 64);

        // Bound 0 cuts off at the start; bound 1 finds no successors at all
        assert!(result.path.is_empty());
        assert_eq!(result.metrics.nodes_expanded, 2);
        assert_eq!(result.metrics.nodes_generated, 0);
        assert_eq!(result.metrics.depth_limit_used, None);
        assert_eq!(result.metrics.solution_depth, NO_SOLUTION);
    }

    #[test]
    fn test_depth_cap_below_solution() {
        let result = solve_ids(&Instance::classic(), 6);

        assert!(result.path.is_empty());
        assert_eq!(result.metrics.solution_depth, NO_SOLUTION);
        assert_eq!(result.metrics.solution_cost, NO_SOLUTION);
        assert_eq!(result.metrics.depth_limit_used, None);
        assert_eq!(result.metrics.max_frontier_size, 7);
    }

    #[test]
    fn test_classic_metrics() {
        let result = solve_ids(&Instance::classic(), 64);

        assert_eq!(result.metrics.depth_limit_used, Some(7));
        assert_eq!(result.metrics.solution_depth, 7);
        assert_eq!(result.metrics.max_frontier_size, 8);
    }

    #[test]
    fn test_cycles_on_active_path_are_skipped() {
        // Two items that may share a bank: going back and forth alone would
        // loop forever without the path-local check
        let instance = Instance::from_json_str(
            r#"{"name": "friends", "items": ["Cat", "Dog"]}"#,
        )
        .unwrap();
        let result = solve_ids(&instance, 64);

        assert_eq!(result.metrics.solution_depth, 3);
        let mut states: Vec<State> = result.path.iter().map(|step| step.state).collect();
        states.sort();
        states.dedup();
        assert_eq!(states.len(), result.path.len());
    }
}
