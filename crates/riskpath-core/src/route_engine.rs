//! Risk-weighted multi-route search.
//!
//! Runs A* three times over the terrain with different heuristic weights and
//! keeps each distinct path as a named route candidate. Entering a cell costs
//! its risk; hazard cells are never expanded.

use crate::error::SearchError;
use crate::models::{Point, Route, RouteKind, RouteStats};
use crate::terrain::TerrainGrid;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEngineConfig {
    /// Heuristic weight for the admissible baseline run
    pub optimal_weight: f64,
    /// Weight above 1.0, favors fewer hops
    pub fast_weight: f64,
    /// Weight below 1.0, favors lower accumulated risk
    pub safe_weight: f64,
    /// Estimated-time contribution per path cell
    pub time_per_cell: f64,
    /// Estimated-time contribution per unit of risk
    pub time_per_risk: f64,
}

impl Default for RouteEngineConfig {
    fn default() -> Self {
        Self {
            optimal_weight: 1.0,
            fast_weight: 1.5,
            safe_weight: 0.5,
            time_per_cell: 0.5,
            time_per_risk: 0.2,
        }
    }
}

impl RouteEngineConfig {
    pub fn weight_for(&self, kind: RouteKind) -> f64 {
        match kind {
            RouteKind::Optimal => self.optimal_weight,
            RouteKind::Fast => self.fast_weight,
            RouteKind::Safe => self.safe_weight,
        }
    }

    /// Derived statistics for a path already known to lie on `grid`.
    pub fn route_stats(&self, grid: &TerrainGrid, path: &[Point]) -> RouteStats {
        let distance = path.len();
        let total_risk = grid.path_risk(path).unwrap_or(0);
        let estimated =
            distance as f64 * self.time_per_cell + f64::from(total_risk) * self.time_per_risk;
        RouteStats {
            distance,
            total_risk,
            estimated_time: estimated.round().max(0.0) as u32,
        }
    }
}

/// Outcome of a single weighted A* run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRun {
    /// Start to end inclusive
    pub path: Vec<Point>,
    /// Accumulated entry cost; the start cell is never charged
    pub cost: u32,
    pub nodes_visited: usize,
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Heap entry. `seq` is the insertion counter, so equal `f` pops in FIFO
/// order and a relaxed node queues behind everything already open.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    point: Point,
    g_score: u32,
    f_score: FloatOrd,
    seq: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score && self.seq == other.seq
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .cmp(&other.f_score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Live open-set entry for a point. Heap entries with a different `seq` are
/// stale and skipped on pop.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    g_score: u32,
    seq: u64,
}

/// Weighted A* from `start` to `end`.
///
/// Returns `None` when either point is off the grid or the open set empties
/// before `end` is reached.
pub fn weighted_search(
    grid: &TerrainGrid,
    start: Point,
    end: Point,
    weight: f64,
) -> Option<SearchRun> {
    if !grid.contains(start) || !grid.contains(end) {
        return None;
    }

    let heuristic = |point: Point| point.manhattan(end) as f64 * weight;

    let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
    let mut open_index: HashMap<Point, OpenEntry> = HashMap::new();
    let mut closed_set: HashSet<Point> = HashSet::new();
    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut next_seq = 0u64;
    let mut nodes_visited = 0usize;

    open_set.push(Reverse(OpenNode {
        point: start,
        g_score: 0,
        f_score: FloatOrd(heuristic(start)),
        seq: next_seq,
    }));
    open_index.insert(
        start,
        OpenEntry {
            g_score: 0,
            seq: next_seq,
        },
    );

    while let Some(Reverse(current)) = open_set.pop() {
        match open_index.get(&current.point) {
            Some(entry) if entry.seq == current.seq => {}
            _ => continue,
        }
        open_index.remove(&current.point);
        nodes_visited += 1;

        if current.point == end {
            return Some(SearchRun {
                path: reconstruct_path(&came_from, end),
                cost: current.g_score,
                nodes_visited,
            });
        }

        closed_set.insert(current.point);

        for neighbor in grid.neighbors(current.point) {
            if closed_set.contains(&neighbor) {
                continue;
            }
            let Some(risk) = grid.risk_at(neighbor) else {
                continue;
            };
            if risk.is_hazard() {
                continue;
            }

            let tentative_g = current.g_score + risk.cost();
            if let Some(existing) = open_index.get(&neighbor) {
                if tentative_g >= existing.g_score {
                    continue;
                }
            }

            next_seq += 1;
            open_index.insert(
                neighbor,
                OpenEntry {
                    g_score: tentative_g,
                    seq: next_seq,
                },
            );
            came_from.insert(neighbor, current.point);
            open_set.push(Reverse(OpenNode {
                point: neighbor,
                g_score: tentative_g,
                f_score: FloatOrd(f64::from(tentative_g) + heuristic(neighbor)),
                seq: next_seq,
            }));
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<Point, Point>, end: Point) -> Vec<Point> {
    let mut path = vec![end];
    let mut cursor = end;
    while let Some(&previous) = came_from.get(&cursor) {
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}

/// Search for up to three distinct routes from `start` to `end`.
///
/// Routes come back in fixed order: Optimal, then Fast if its path differs,
/// then Safe if its path differs from both.
pub fn find_routes(
    grid: &TerrainGrid,
    start: Point,
    end: Point,
    config: &RouteEngineConfig,
) -> Result<Vec<Route>, SearchError> {
    if start == end {
        return Err(SearchError::InvalidSelection);
    }
    for point in [start, end] {
        if !grid.contains(point) {
            return Err(SearchError::OutOfBounds(point));
        }
    }

    let mut routes: Vec<Route> = Vec::with_capacity(RouteKind::SEARCH_ORDER.len());
    for kind in RouteKind::SEARCH_ORDER {
        let weight = config.weight_for(kind);
        let Some(run) = weighted_search(grid, start, end, weight) else {
            tracing::debug!(?kind, weight, %start, %end, "weighted search found no path");
            continue;
        };
        tracing::debug!(
            ?kind,
            weight,
            cost = run.cost,
            cells = run.path.len(),
            nodes_visited = run.nodes_visited,
            "weighted search finished"
        );

        if routes.iter().any(|kept| kept.path == run.path) {
            continue;
        }

        let stats = config.route_stats(grid, &run.path);
        routes.push(Route {
            kind,
            label: kind.label().to_string(),
            category: kind.category(),
            path: run.path,
            stats,
            nodes_visited: run.nodes_visited,
        });
    }

    if routes.is_empty() {
        return Err(SearchError::NoRouteFound { start, end });
    }
    Ok(routes)
}
