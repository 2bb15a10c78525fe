//! Plain-text rendering of terrain, routes and mission status.

use riskpath_core::{MissionSnapshot, MissionSummary, Point, RiskLevel, RouteSummary, TerrainGrid};
use std::collections::HashSet;

fn terrain_glyph(level: RiskLevel) -> char {
    match level {
        RiskLevel::Clear => '.',
        RiskLevel::Moderate => ':',
        RiskLevel::High => '*',
        RiskLevel::Hazard => '#',
    }
}

/// Draw the grid one row per line.
///
/// Overlay priority: current position `@`, endpoints `S`/`E`, path `o`, then
/// the terrain glyph.
pub fn render_grid(
    grid: &TerrainGrid,
    start: Option<Point>,
    end: Option<Point>,
    path: &[Point],
    current: Option<Point>,
) -> String {
    let on_path: HashSet<Point> = path.iter().copied().collect();
    let mut out = String::with_capacity(grid.cell_count() + grid.size());
    for (y, row) in grid.rows().enumerate() {
        for (x, level) in row.iter().enumerate() {
            let point = Point::new(x, y);
            let glyph = if current == Some(point) {
                '@'
            } else if start == Some(point) {
                'S'
            } else if end == Some(point) {
                'E'
            } else if on_path.contains(&point) {
                'o'
            } else {
                terrain_glyph(*level)
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

pub fn render_route_table(routes: &[RouteSummary], selected: Option<usize>) -> String {
    let mut out = format!(
        "  #  {:<14} {:<5} {:>8} {:>6} {:>6}\n",
        "Route", "", "Distance", "Risk", "Time"
    );
    for route in routes {
        let marker = if selected == Some(route.index) { '>' } else { ' ' };
        out.push_str(&format!(
            "{} {:>2}  {:<14} {:<5} {:>8} {:>6} {:>6}\n",
            marker,
            route.index,
            route.label,
            route.badge,
            route.distance,
            route.total_risk,
            route.estimated_time
        ));
    }
    out
}

/// One status line per tick.
pub fn render_progress(snapshot: &MissionSnapshot) -> String {
    let position = snapshot
        .current_position
        .map(|point| point.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "[{}] {:>3}% {} dist {} risk {} hazards {} remaining {} at {}",
        snapshot.status,
        snapshot.progress_percent,
        snapshot.elapsed,
        snapshot.stats.distance,
        snapshot.stats.total_risk,
        snapshot.stats.hazards,
        snapshot.remaining_distance,
        position
    )
}

pub fn render_summary(summary: &MissionSummary) -> String {
    let score = &summary.score;
    let stars = "*".repeat(usize::from(score.rating.stars()));
    [
        format!("{} [{}]", summary.title(), summary.badge()),
        format!("  Route:          {}", summary.route_label),
        format!("  Distance:       {}", summary.stats.distance),
        format!("  Time:           {}", summary.formatted_time()),
        format!("  Hazards:        {}", summary.stats.hazards),
        format!("  Total risk:     {}", summary.stats.total_risk),
        format!("  Average speed:  {}", summary.formatted_speed()),
        format!(
            "  Rating:         {} {} ({:.1})",
            score.rating, stars, score.overall
        ),
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}
