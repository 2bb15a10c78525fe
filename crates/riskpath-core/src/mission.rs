//! Mission playback.
//!
//! Replays a selected route one cell per tick and accumulates traversal
//! statistics. The session never schedules itself: a caller-owned timer calls
//! [`MissionSession::tick`] at a fixed cadence and passes the current time, so
//! the state machine can be driven deterministically in tests.

use crate::error::MissionError;
use crate::models::{Point, RiskLevel, Route};
use crate::terrain::TerrainGrid;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Wall-clock cadence between ticks.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
    Stopped,
}

impl MissionPhase {
    /// Running or paused.
    pub fn is_active(self) -> bool {
        matches!(self, MissionPhase::Running | MissionPhase::Paused)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, MissionPhase::Completed | MissionPhase::Stopped)
    }

    /// Text for the mission status panel.
    pub fn status_label(self) -> &'static str {
        match self {
            MissionPhase::Idle => "Ready",
            MissionPhase::Running => "In Progress",
            MissionPhase::Paused => "Paused",
            MissionPhase::Completed => "Completed",
            MissionPhase::Stopped => "Stopped",
        }
    }
}

impl fmt::Display for MissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissionPhase::Idle => "idle",
            MissionPhase::Running => "running",
            MissionPhase::Paused => "paused",
            MissionPhase::Completed => "completed",
            MissionPhase::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// User-initiated transitions, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionAction {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
}

impl fmt::Display for MissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissionAction::Start => "start",
            MissionAction::Pause => "pause",
            MissionAction::Resume => "resume",
            MissionAction::Stop => "stop",
            MissionAction::Reset => "reset",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionStats {
    /// Cells traversed so far
    pub distance: usize,
    /// Cells traversed with risk 5 or above
    pub hazards: usize,
    /// Whole seconds spent running, pauses excluded
    pub elapsed_seconds: u64,
    pub total_risk: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionState {
    pub phase: MissionPhase,
    pub cursor_index: usize,
    /// Shifted forward on resume by the time spent paused
    pub started_at: Option<DateTime<Utc>>,
    pub stats: MissionStats,
}

impl MissionState {
    pub fn active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn paused(&self) -> bool {
        self.phase == MissionPhase::Paused
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionRating {
    Excellent,
    Good,
    Average,
    BelowAverage,
    Poor,
}

impl MissionRating {
    pub fn from_score(overall: f64) -> Self {
        if overall >= 80.0 {
            MissionRating::Excellent
        } else if overall >= 60.0 {
            MissionRating::Good
        } else if overall >= 40.0 {
            MissionRating::Average
        } else if overall >= 20.0 {
            MissionRating::BelowAverage
        } else {
            MissionRating::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MissionRating::Excellent => "Excellent",
            MissionRating::Good => "Good",
            MissionRating::Average => "Average",
            MissionRating::BelowAverage => "Below Average",
            MissionRating::Poor => "Poor",
        }
    }

    pub fn stars(self) -> u8 {
        match self {
            MissionRating::Excellent => 5,
            MissionRating::Good => 4,
            MissionRating::Average => 3,
            MissionRating::BelowAverage => 2,
            MissionRating::Poor => 1,
        }
    }
}

impl fmt::Display for MissionRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Efficiency and safety components of the mission rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionScore {
    /// Cells per minute; zero when no whole second has elapsed
    pub average_speed: f64,
    pub efficiency: f64,
    pub safety: f64,
    pub overall: f64,
    pub rating: MissionRating,
}

impl MissionScore {
    pub fn from_stats(stats: &MissionStats) -> Self {
        let distance = stats.distance as f64;
        let elapsed = stats.elapsed_seconds as f64;
        let (average_speed, efficiency) = if stats.elapsed_seconds == 0 {
            (0.0, 0.0)
        } else {
            (distance * 60.0 / elapsed, distance / elapsed * 10.0)
        };
        let safety = (100.0 - stats.hazards as f64 * 10.0).max(0.0);
        let overall = (efficiency + safety) / 2.0;
        Self {
            average_speed,
            efficiency,
            safety,
            overall,
            rating: MissionRating::from_score(overall),
        }
    }
}

/// Terminal record emitted when a mission completes or is stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub mission_id: Uuid,
    pub success: bool,
    pub route_label: String,
    pub stats: MissionStats,
    pub score: MissionScore,
    pub finished_at: DateTime<Utc>,
}

impl MissionSummary {
    pub fn title(&self) -> &'static str {
        if self.success {
            "Mission Completed Successfully!"
        } else {
            "Mission Stopped"
        }
    }

    pub fn badge(&self) -> &'static str {
        if self.success {
            "SUCCESS"
        } else {
            "STOPPED"
        }
    }

    /// Elapsed time as `Xm Ys`.
    pub fn formatted_time(&self) -> String {
        let secs = self.stats.elapsed_seconds;
        format!("{}m {}s", secs / 60, secs % 60)
    }

    pub fn formatted_speed(&self) -> String {
        format!("{:.2} units/min", self.score.average_speed)
    }
}

/// Per-tick view for the mission status panel and progress rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub mission_id: Uuid,
    pub phase: MissionPhase,
    pub status: String,
    pub progress_percent: u8,
    /// Cell most recently traversed
    pub current_position: Option<Point>,
    /// Cell the next tick will traverse
    pub next_position: Option<Point>,
    pub visited: Vec<Point>,
    pub remaining_distance: usize,
    pub route_length: usize,
    pub stats: MissionStats,
    /// Elapsed time as `m:ss`
    pub elapsed: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Advanced(MissionSnapshot),
    Completed(MissionSummary),
    /// Not running; nothing changed
    Idle(MissionPhase),
}

#[derive(Debug, Clone, Copy)]
struct MissionLeg {
    point: Point,
    risk: RiskLevel,
}

/// Caller-owned mission state machine.
#[derive(Debug, Clone)]
pub struct MissionSession {
    id: Uuid,
    route_label: String,
    legs: Vec<MissionLeg>,
    state: MissionState,
    paused_at: Option<DateTime<Utc>>,
    summary: Option<MissionSummary>,
}

impl Default for MissionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::nil(),
            route_label: String::new(),
            legs: Vec::new(),
            state: MissionState::default(),
            paused_at: None,
            summary: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &MissionState {
        &self.state
    }

    pub fn phase(&self) -> MissionPhase {
        self.state.phase
    }

    pub fn stats(&self) -> &MissionStats {
        &self.state.stats
    }

    /// Summary of the last completed or stopped mission.
    pub fn summary(&self) -> Option<&MissionSummary> {
        self.summary.as_ref()
    }

    pub fn route_len(&self) -> usize {
        self.legs.len()
    }

    /// Begin playback of `route`. Risks are read from `grid` up front so the
    /// mission does not depend on the grid afterwards.
    ///
    /// Allowed from idle or a finished mission. Nothing changes on error.
    pub fn start(
        &mut self,
        route: Option<&Route>,
        grid: &TerrainGrid,
        now: DateTime<Utc>,
    ) -> Result<MissionSnapshot, MissionError> {
        if self.state.active() {
            return Err(MissionError::InvalidTransition {
                from: self.state.phase,
                action: MissionAction::Start,
            });
        }
        let route = match route {
            Some(route) if !route.is_empty() => route,
            _ => return Err(MissionError::PreconditionFailed),
        };
        let legs = route
            .path
            .iter()
            .map(|point| {
                grid.risk_at(*point)
                    .map(|risk| MissionLeg {
                        point: *point,
                        risk,
                    })
                    .ok_or(MissionError::RouteOffGrid(*point))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.id = Uuid::new_v4();
        self.route_label = route.label.clone();
        self.legs = legs;
        self.state = MissionState {
            phase: MissionPhase::Running,
            cursor_index: 0,
            started_at: Some(now),
            stats: MissionStats::default(),
        };
        self.paused_at = None;
        self.summary = None;

        tracing::info!(
            mission_id = %self.id,
            route = %self.route_label,
            cells = self.legs.len(),
            "Mission started"
        );
        Ok(self.snapshot())
    }

    /// Advance one cell. Ignored unless running.
    ///
    /// The mission completes on the tick that traverses the last cell.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if self.state.phase != MissionPhase::Running {
            return TickOutcome::Idle(self.state.phase);
        }
        let Some(leg) = self.legs.get(self.state.cursor_index).copied() else {
            return TickOutcome::Completed(self.finish(true, now));
        };

        let elapsed = self.elapsed_since_start(now);
        let stats = &mut self.state.stats;
        stats.distance += 1;
        stats.total_risk += leg.risk.cost();
        if leg.risk.is_dangerous() {
            stats.hazards += 1;
        }
        stats.elapsed_seconds = elapsed;
        self.state.cursor_index += 1;

        tracing::debug!(
            mission_id = %self.id,
            position = %leg.point,
            risk = leg.risk.cost(),
            cursor = self.state.cursor_index,
            "Mission tick"
        );

        if self.state.cursor_index >= self.legs.len() {
            return TickOutcome::Completed(self.finish(true, now));
        }
        TickOutcome::Advanced(self.snapshot())
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), MissionError> {
        if self.state.phase != MissionPhase::Running {
            return Err(MissionError::InvalidTransition {
                from: self.state.phase,
                action: MissionAction::Pause,
            });
        }
        self.state.phase = MissionPhase::Paused;
        self.paused_at = Some(now);
        tracing::info!(mission_id = %self.id, "Mission paused");
        Ok(())
    }

    /// Resume a paused mission; the paused interval is excluded from elapsed
    /// time.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), MissionError> {
        if self.state.phase != MissionPhase::Paused {
            return Err(MissionError::InvalidTransition {
                from: self.state.phase,
                action: MissionAction::Resume,
            });
        }
        if let (Some(started_at), Some(paused_at)) = (self.state.started_at, self.paused_at) {
            let paused_for = (now - paused_at).max(Duration::zero());
            self.state.started_at = Some(started_at + paused_for);
        }
        self.paused_at = None;
        self.state.phase = MissionPhase::Running;
        tracing::info!(mission_id = %self.id, "Mission resumed");
        Ok(())
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&mut self, now: DateTime<Utc>) -> Result<MissionPhase, MissionError> {
        match self.state.phase {
            MissionPhase::Paused => self.resume(now)?,
            _ => self.pause(now)?,
        }
        Ok(self.state.phase)
    }

    /// End the mission early. Stats keep their values from the last tick.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<MissionSummary, MissionError> {
        if !self.state.active() {
            return Err(MissionError::InvalidTransition {
                from: self.state.phase,
                action: MissionAction::Stop,
            });
        }
        Ok(self.finish(false, now))
    }

    /// Stop the mission if one is in flight. Used before the grid or route
    /// list it was started from is replaced.
    pub fn force_stop(&mut self, now: DateTime<Utc>) -> Option<MissionSummary> {
        if !self.state.active() {
            return None;
        }
        tracing::warn!(mission_id = %self.id, "Stopping in-flight mission");
        Some(self.finish(false, now))
    }

    /// Return to idle after a mission has finished.
    pub fn reset(&mut self) -> Result<(), MissionError> {
        if self.state.active() {
            return Err(MissionError::InvalidTransition {
                from: self.state.phase,
                action: MissionAction::Reset,
            });
        }
        self.state = MissionState::default();
        self.legs.clear();
        self.route_label.clear();
        self.paused_at = None;
        self.summary = None;
        Ok(())
    }

    pub fn snapshot(&self) -> MissionSnapshot {
        let cursor = self.state.cursor_index.min(self.legs.len());
        let route_length = self.legs.len();
        let progress_percent = if self.state.phase == MissionPhase::Completed {
            100
        } else if route_length == 0 {
            0
        } else {
            ((cursor as f64 / route_length as f64) * 100.0).round() as u8
        };
        let elapsed = self.state.stats.elapsed_seconds;

        MissionSnapshot {
            mission_id: self.id,
            phase: self.state.phase,
            status: self.state.phase.status_label().to_string(),
            progress_percent,
            current_position: cursor
                .checked_sub(1)
                .and_then(|idx| self.legs.get(idx))
                .map(|leg| leg.point),
            next_position: self.legs.get(cursor).map(|leg| leg.point),
            visited: self.legs[..cursor].iter().map(|leg| leg.point).collect(),
            remaining_distance: route_length - cursor,
            route_length,
            stats: self.state.stats,
            elapsed: format!("{}:{:02}", elapsed / 60, elapsed % 60),
        }
    }

    fn elapsed_since_start(&self, now: DateTime<Utc>) -> u64 {
        self.state
            .started_at
            .map(|started_at| (now - started_at).num_seconds().max(0) as u64)
            .unwrap_or(0)
    }

    fn finish(&mut self, success: bool, now: DateTime<Utc>) -> MissionSummary {
        self.state.phase = if success {
            MissionPhase::Completed
        } else {
            MissionPhase::Stopped
        };
        self.paused_at = None;

        let summary = MissionSummary {
            mission_id: self.id,
            success,
            route_label: self.route_label.clone(),
            stats: self.state.stats,
            score: MissionScore::from_stats(&self.state.stats),
            finished_at: now,
        };
        tracing::info!(
            mission_id = %self.id,
            success,
            distance = summary.stats.distance,
            hazards = summary.stats.hazards,
            elapsed_seconds = summary.stats.elapsed_seconds,
            rating = %summary.score.rating,
            "Mission finished"
        );
        self.summary = Some(summary.clone());
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RouteKind, RouteStats};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn ms(offset: i64) -> DateTime<Utc> {
        t0() + Duration::milliseconds(offset)
    }

    fn straight_route(grid: &TerrainGrid, len: usize) -> Route {
        let path: Vec<Point> = (0..len).map(|x| Point::new(x, 0)).collect();
        let total_risk = grid.path_risk(&path).unwrap();
        Route {
            kind: RouteKind::Optimal,
            label: RouteKind::Optimal.label().to_string(),
            category: RouteKind::Optimal.category(),
            stats: RouteStats {
                distance: path.len(),
                total_risk,
                estimated_time: 0,
            },
            path,
            nodes_visited: 0,
        }
    }

    fn ten_cell_grid() -> TerrainGrid {
        TerrainGrid::from_rows(&[
            [1u8, 3, 5, 1, 10, 1, 3, 1, 5, 1],
            [1; 10],
            [1; 10],
            [1; 10],
            [1; 10],
            [1; 10],
            [1; 10],
            [1; 10],
            [1; 10],
            [1; 10],
        ])
        .unwrap()
    }

    #[test]
    fn ten_cell_route_completes_on_tenth_tick() {
        let grid = ten_cell_grid();
        let route = straight_route(&grid, 10);
        let mut mission = MissionSession::new();
        mission.start(Some(&route), &grid, t0()).unwrap();

        for tick in 1..10 {
            match mission.tick(ms(tick * 500)) {
                TickOutcome::Advanced(snapshot) => {
                    assert_eq!(snapshot.stats.distance, tick as usize);
                    assert_eq!(snapshot.remaining_distance, 10 - tick as usize);
                }
                other => panic!("tick {tick} should advance, got {other:?}"),
            }
        }

        let summary = match mission.tick(ms(5000)) {
            TickOutcome::Completed(summary) => summary,
            other => panic!("tenth tick should complete, got {other:?}"),
        };
        assert!(summary.success);
        assert_eq!(summary.stats.distance, 10);
        assert_eq!(summary.stats.total_risk, 31);
        assert_eq!(summary.stats.hazards, 3);
        assert_eq!(summary.stats.elapsed_seconds, 5);
        assert_eq!(mission.phase(), MissionPhase::Completed);
        assert_eq!(mission.snapshot().progress_percent, 100);

        assert_eq!(
            mission.tick(ms(5500)),
            TickOutcome::Idle(MissionPhase::Completed)
        );
    }

    #[test]
    fn start_without_route_is_rejected_before_mutation() {
        let grid = ten_cell_grid();
        let mut mission = MissionSession::new();
        assert_eq!(
            mission.start(None, &grid, t0()),
            Err(MissionError::PreconditionFailed)
        );

        let mut empty = straight_route(&grid, 1);
        empty.path.clear();
        assert_eq!(
            mission.start(Some(&empty), &grid, t0()),
            Err(MissionError::PreconditionFailed)
        );
        assert_eq!(mission.phase(), MissionPhase::Idle);
        assert!(mission.id().is_nil());
    }

    #[test]
    fn route_off_grid_is_rejected() {
        let grid = ten_cell_grid();
        let small = TerrainGrid::uniform(3, RiskLevel::Clear).unwrap();
        let route = straight_route(&grid, 5);
        let mut mission = MissionSession::new();
        assert_eq!(
            mission.start(Some(&route), &small, t0()),
            Err(MissionError::RouteOffGrid(Point::new(3, 0)))
        );
        assert_eq!(mission.phase(), MissionPhase::Idle);
    }

    #[test]
    fn paused_time_is_not_counted() {
        let grid = ten_cell_grid();
        let route = straight_route(&grid, 10);
        let mut mission = MissionSession::new();
        mission.start(Some(&route), &grid, t0()).unwrap();

        mission.tick(ms(1000));
        mission.pause(ms(1500)).unwrap();
        assert_eq!(mission.tick(ms(30_000)), TickOutcome::Idle(MissionPhase::Paused));
        assert_eq!(mission.stats().distance, 1);

        mission.resume(ms(61_500)).unwrap();
        match mission.tick(ms(62_000)) {
            TickOutcome::Advanced(snapshot) => {
                assert_eq!(snapshot.stats.elapsed_seconds, 2);
                assert_eq!(snapshot.elapsed, "0:02");
            }
            other => panic!("expected advance, got {other:?}"),
        }
    }

    #[test]
    fn toggle_pause_alternates_phase() {
        let grid = ten_cell_grid();
        let route = straight_route(&grid, 4);
        let mut mission = MissionSession::new();
        mission.start(Some(&route), &grid, t0()).unwrap();

        assert_eq!(mission.toggle_pause(ms(100)), Ok(MissionPhase::Paused));
        assert!(mission.state().paused());
        assert_eq!(mission.toggle_pause(ms(200)), Ok(MissionPhase::Running));
        assert!(mission.state().active());
    }

    #[test]
    fn stop_produces_unsuccessful_summary() {
        let grid = ten_cell_grid();
        let route = straight_route(&grid, 10);
        let mut mission = MissionSession::new();
        mission.start(Some(&route), &grid, t0()).unwrap();
        mission.tick(ms(500));
        mission.tick(ms(1000));
        mission.tick(ms(1500));

        let summary = mission.stop(ms(1700)).unwrap();
        assert!(!summary.success);
        assert_eq!(summary.title(), "Mission Stopped");
        assert_eq!(summary.badge(), "STOPPED");
        assert_eq!(summary.stats.distance, 3);
        assert_eq!(summary.stats.total_risk, 9);
        assert_eq!(mission.phase(), MissionPhase::Stopped);
        assert_eq!(mission.summary(), Some(&summary));

        assert!(matches!(
            mission.stop(ms(1800)),
            Err(MissionError::InvalidTransition {
                from: MissionPhase::Stopped,
                action: MissionAction::Stop
            })
        ));
    }

    #[test]
    fn instant_stop_has_finite_zero_speed() {
        let grid = ten_cell_grid();
        let route = straight_route(&grid, 10);
        let mut mission = MissionSession::new();
        mission.start(Some(&route), &grid, t0()).unwrap();

        let summary = mission.stop(t0()).unwrap();
        assert_eq!(summary.score.average_speed, 0.0);
        assert_eq!(summary.score.efficiency, 0.0);
        assert!(summary.score.overall.is_finite());
        assert_eq!(summary.formatted_speed(), "0.00 units/min");
        assert_eq!(summary.formatted_time(), "0m 0s");
    }

    #[test]
    fn invalid_transitions_are_reported() {
        let mut mission = MissionSession::new();
        assert_eq!(
            mission.pause(t0()),
            Err(MissionError::InvalidTransition {
                from: MissionPhase::Idle,
                action: MissionAction::Pause
            })
        );
        assert_eq!(
            mission.resume(t0()),
            Err(MissionError::InvalidTransition {
                from: MissionPhase::Idle,
                action: MissionAction::Resume
            })
        );

        let grid = ten_cell_grid();
        let route = straight_route(&grid, 3);
        mission.start(Some(&route), &grid, t0()).unwrap();
        assert!(matches!(
            mission.start(Some(&route), &grid, t0()),
            Err(MissionError::InvalidTransition {
                action: MissionAction::Start,
                ..
            })
        ));
        assert!(matches!(
            mission.reset(),
            Err(MissionError::InvalidTransition {
                from: MissionPhase::Running,
                action: MissionAction::Reset
            })
        ));
    }

    #[test]
    fn reset_returns_to_idle_and_allows_restart() {
        let grid = ten_cell_grid();
        let route = straight_route(&grid, 2);
        let mut mission = MissionSession::new();
        mission.start(Some(&route), &grid, t0()).unwrap();
        mission.tick(ms(500));
        assert!(matches!(mission.tick(ms(1000)), TickOutcome::Completed(_)));

        mission.reset().unwrap();
        assert_eq!(mission.state(), &MissionState::default());
        assert!(mission.summary().is_none());
        let snapshot = mission.snapshot();
        assert_eq!(snapshot.status, "Ready");
        assert_eq!(snapshot.elapsed, "0:00");

        let first_id = mission.id();
        mission.start(Some(&route), &grid, ms(2000)).unwrap();
        assert_ne!(mission.id(), first_id);
    }

    #[test]
    fn snapshot_tracks_visited_cells_and_progress() {
        let grid = ten_cell_grid();
        let route = straight_route(&grid, 4);
        let mut mission = MissionSession::new();
        let initial = mission.start(Some(&route), &grid, t0()).unwrap();
        assert_eq!(initial.progress_percent, 0);
        assert_eq!(initial.current_position, None);
        assert_eq!(initial.next_position, Some(Point::new(0, 0)));

        mission.tick(ms(500));
        let snapshot = match mission.tick(ms(1000)) {
            TickOutcome::Advanced(snapshot) => snapshot,
            other => panic!("expected advance, got {other:?}"),
        };
        assert_eq!(snapshot.progress_percent, 50);
        assert_eq!(snapshot.visited, vec![Point::new(0, 0), Point::new(1, 0)]);
        assert_eq!(snapshot.current_position, Some(Point::new(1, 0)));
        assert_eq!(snapshot.next_position, Some(Point::new(2, 0)));
        assert_eq!(snapshot.remaining_distance, 2);
        assert_eq!(snapshot.status, "In Progress");
    }

    #[test]
    fn rating_tiers_follow_overall_score() {
        assert_eq!(MissionRating::from_score(80.0), MissionRating::Excellent);
        assert_eq!(MissionRating::from_score(79.9), MissionRating::Good);
        assert_eq!(MissionRating::from_score(60.0), MissionRating::Good);
        assert_eq!(MissionRating::from_score(40.0), MissionRating::Average);
        assert_eq!(MissionRating::from_score(20.0), MissionRating::BelowAverage);
        assert_eq!(MissionRating::from_score(19.99), MissionRating::Poor);
        assert_eq!(MissionRating::BelowAverage.to_string(), "Below Average");
    }

    #[test]
    fn score_combines_efficiency_and_safety() {
        let stats = MissionStats {
            distance: 20,
            hazards: 3,
            elapsed_seconds: 10,
            total_risk: 40,
        };
        let score = MissionScore::from_stats(&stats);
        assert_eq!(score.average_speed, 120.0);
        assert_eq!(score.efficiency, 20.0);
        assert_eq!(score.safety, 70.0);
        assert_eq!(score.overall, 45.0);
        assert_eq!(score.rating, MissionRating::Average);

        let reckless = MissionStats {
            hazards: 14,
            ..stats
        };
        assert_eq!(MissionScore::from_stats(&reckless).safety, 0.0);
    }

    #[test]
    fn summary_serializes_for_status_ui() {
        let grid = ten_cell_grid();
        let route = straight_route(&grid, 1);
        let mut mission = MissionSession::new();
        mission.start(Some(&route), &grid, t0()).unwrap();
        let summary = match mission.tick(ms(1000)) {
            TickOutcome::Completed(summary) => summary,
            other => panic!("expected completion, got {other:?}"),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["stats"]["distance"], 1);
        // one cell in one second: efficiency 10, safety 100
        assert_eq!(json["score"]["overall"], 55.0);
        assert_eq!(json["score"]["rating"], "average");
        assert_eq!(json["route_label"], "Optimal Route");
    }
}
