//! Human and JSON renderings of a solver run.

use std::fmt::Write;

use serde::Serialize;

use crate::instance::{Bank, Instance};
use crate::solver::{Algorithm, FrontierMeasure, Metrics, SearchResult};
use crate::state::Move;

/// Short label for a move: `Go alone`, `Return alone` or `Move <item>`.
///
/// Crossing empty-handed towards the goal bank is going, the other way is
/// returning.
pub fn move_label(mv: &Move, instance: &Instance) -> String {
    match mv.cargo {
        Some(item) => format!("Move {}", instance.item_name(item)),
        None if mv.to == instance.goal() => "Go alone".to_string(),
        None => "Return alone".to_string(),
    }
}

fn frontier_label(measure: FrontierMeasure) -> &'static str {
    match measure {
        FrontierMeasure::QueueLength => "Max frontier (queue)",
        FrontierMeasure::RecursionDepth => "Max frontier (depth)",
    }
}

/// Plain-text report of one run
pub fn render_text(instance: &Instance, algorithm: Algorithm, result: &SearchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Instance: {} | Algorithm: {}",
        instance.name(),
        algorithm.name()
    );

    if !result.is_solved() {
        let _ = writeln!(out, "No solution found.");
        return out;
    }

    let m = &result.metrics;
    let _ = write!(
        out,
        "Solution cost: {} | Depth: {}",
        m.solution_cost, m.solution_depth
    );
    if let Some(limit) = m.depth_limit_used {
        let _ = write!(out, " | Depth limit: {}", limit);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Nodes generated: {} | Nodes expanded: {} | {}: {}",
        m.nodes_generated,
        m.nodes_expanded,
        frontier_label(m.frontier_measure),
        m.max_frontier_size
    );

    let _ = writeln!(out, "Path:");
    for (i, pair) in result.path.windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        let label = next
            .via
            .map(|mv| move_label(&mv, instance))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {}) {:<14} {} -> {}",
            i + 1,
            label,
            prev.state.display(instance),
            next.state.display(instance)
        );
    }
    out
}

/// One path entry in the JSON report
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub state: String,
    /// Agent first, then items in catalog order
    pub tokens: Vec<Bank>,
}

/// JSON report of one run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub instance: String,
    pub algorithm: Algorithm,
    pub solved: bool,
    pub metrics: Metrics,
    pub path: Vec<StepReport>,
}

impl RunReport {
    pub fn new(instance: &Instance, algorithm: Algorithm, result: &SearchResult) -> Self {
        let path = result
            .path
            .iter()
            .enumerate()
            .map(|(step, entry)| StepReport {
                step,
                label: entry.via.map(|mv| move_label(&mv, instance)),
                description: entry.via.map(|mv| mv.describe(instance)),
                state: entry.state.display(instance).to_string(),
                tokens: entry.state.tokens(instance).collect(),
            })
            .collect();

        Self {
            instance: instance.name().to_string(),
            algorithm,
            solved: result.is_solved(),
            metrics: result.metrics.clone(),
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, SolverConfig};
    use crate::test_utils::all_forbidden;

    #[test]
    fn test_move_labels() {
        let instance = Instance::classic();
        let goat = instance.item_id("Goat");
        let go = Move { cargo: None, from: Bank::Left, to: Bank::Right };
        let back = Move { cargo: None, from: Bank::Right, to: Bank::Left };
        let carry = Move { cargo: goat, from: Bank::Right, to: Bank::Left };

        assert_eq!(move_label(&go, &instance), "Go alone");
        assert_eq!(move_label(&back, &instance), "Return alone");
        assert_eq!(move_label(&carry, &instance), "Move Goat");
    }

    #[test]
    fn test_render_classic_bfs() {
        let instance = Instance::classic();
        let result = solve(&instance, Algorithm::Bfs, &SolverConfig::default());
        let text = render_text(&instance, Algorithm::Bfs, &result);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Instance: WGC A (classic) | Algorithm: BFS");
        assert_eq!(lines[1], "Solution cost: 7 | Depth: 7");
        assert_eq!(
            lines[2],
            "Nodes generated: 9 | Nodes expanded: 10 | Max frontier (queue): 2"
        );
        assert_eq!(lines[3], "Path:");
        assert_eq!(lines[4], "  1) Move Goat      (L,L,L,L) -> (R,L,R,L)");
        assert_eq!(lines[5], "  2) Return alone   (R,L,R,L) -> (L,L,R,L)");
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_render_ids_shows_depth_limit() {
        let instance = Instance::classic();
        let result = solve(&instance, Algorithm::Ids, &SolverConfig::default());
        let text = render_text(&instance, Algorithm::Ids, &result);

        assert!(text.contains("Depth limit: 7"));
        assert!(text.contains("Max frontier (depth): 8"));
    }

    #[test]
    fn test_render_no_solution() {
        let instance = all_forbidden(3);
        let result = solve(&instance, Algorithm::Ids, &SolverConfig::default());

        assert_eq!(
            render_text(&instance, Algorithm::Ids, &result),
            "Instance: all forbidden (3) | Algorithm: IDS\nNo solution found.\n"
        );
    }

    #[test]
    fn test_run_report_json() {
        let instance = Instance::goat_starts_right();
        let result = solve(&instance, Algorithm::Bfs, &SolverConfig::default());
        let json = serde_json::to_value(RunReport::new(&instance, Algorithm::Bfs, &result)).unwrap();

        assert_eq!(json["algorithm"], "bfs");
        assert_eq!(json["solved"], true);
        assert_eq!(json["metrics"]["solution_depth"], 5);
        assert_eq!(json["path"][0]["state"], "(L,L,R,L)");
        assert_eq!(
            json["path"][0]["tokens"],
            serde_json::json!(["left", "left", "right", "left"])
        );
        assert!(json["path"][0].get("label").is_none());
        assert!(json["path"][1]["description"].is_string());
    }
}
