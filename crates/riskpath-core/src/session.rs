//! Terrain session: the grid, endpoint selection and route candidates.
//!
//! Owned by the caller alongside a [`MissionSession`]. Operations that
//! invalidate the mission's inputs (new terrain, new search) take the mission
//! by `&mut` and stop it first.

use crate::error::{MissionError, SearchError, SessionError, TerrainError};
use crate::mission::{MissionSession, MissionSnapshot, MissionSummary};
use crate::models::{Point, Route, RouteSummary};
use crate::route_engine::{self, RouteEngineConfig};
use crate::terrain::{TerrainConfig, TerrainGrid};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

/// Result of selecting a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "point", rename_all = "snake_case")]
pub enum ClickOutcome {
    StartSet(Point),
    /// Both endpoints set, search may run
    EndSet(Point),
    /// Start moved to a new cell; end and routes cleared
    Restarted(Point),
    /// Point outside the grid
    Ignored,
}

#[derive(Debug, Clone)]
pub struct TerrainSession {
    grid: TerrainGrid,
    engine: RouteEngineConfig,
    start: Option<Point>,
    end: Option<Point>,
    routes: Vec<Route>,
    selected: Option<usize>,
}

impl TerrainSession {
    pub fn new(grid: TerrainGrid, engine: RouteEngineConfig) -> Self {
        Self {
            grid,
            engine,
            start: None,
            end: None,
            routes: Vec::new(),
            selected: None,
        }
    }

    pub fn generate(
        config: &TerrainConfig,
        engine: RouteEngineConfig,
    ) -> Result<Self, TerrainError> {
        let grid = TerrainGrid::from_config(config)?;
        tracing::info!(size = grid.size(), seed = ?config.seed, "Generated terrain");
        Ok(Self::new(grid, engine))
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn engine(&self) -> &RouteEngineConfig {
        &self.engine
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Replace the grid with a fresh one of the same size.
    ///
    /// Endpoints and routes are dropped and an in-flight mission is stopped;
    /// its summary is returned.
    pub fn regenerate<R: Rng>(
        &mut self,
        rng: &mut R,
        mission: &mut MissionSession,
        now: DateTime<Utc>,
    ) -> Result<Option<MissionSummary>, TerrainError> {
        let grid = TerrainGrid::generate(self.grid.size(), rng)?;
        tracing::info!(size = grid.size(), "Regenerated terrain");
        Ok(self.replace_grid(grid, mission, now))
    }

    /// Install an explicit grid, with the same invalidation as [`regenerate`].
    ///
    /// [`regenerate`]: TerrainSession::regenerate
    pub fn replace_grid(
        &mut self,
        grid: TerrainGrid,
        mission: &mut MissionSession,
        now: DateTime<Utc>,
    ) -> Option<MissionSummary> {
        let stopped = mission.force_stop(now);
        self.grid = grid;
        self.clear();
        stopped
    }

    /// Endpoint selection: start, then end, then a new start.
    pub fn click(&mut self, point: Point) -> ClickOutcome {
        if !self.grid.contains(point) {
            tracing::debug!(%point, "Ignoring click outside terrain");
            return ClickOutcome::Ignored;
        }
        match (self.start, self.end) {
            (None, _) => {
                self.start = Some(point);
                ClickOutcome::StartSet(point)
            }
            (Some(_), None) => {
                self.end = Some(point);
                ClickOutcome::EndSet(point)
            }
            (Some(_), Some(_)) => {
                self.start = Some(point);
                self.end = None;
                self.clear_routes();
                ClickOutcome::Restarted(point)
            }
        }
    }

    /// Drop both endpoints and all routes.
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
        self.clear_routes();
    }

    pub fn can_search(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start != end)
    }

    /// Search the current endpoints and auto-select the first route.
    ///
    /// A mission in flight is stopped before searching; its summary stays
    /// available from [`MissionSession::summary`]. On failure the previous
    /// routes are cleared.
    pub fn find_routes(
        &mut self,
        mission: &mut MissionSession,
        now: DateTime<Utc>,
    ) -> Result<&[Route], SearchError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(SearchError::InvalidSelection);
        };
        if start == end {
            return Err(SearchError::InvalidSelection);
        }
        mission.force_stop(now);

        match route_engine::find_routes(&self.grid, start, end, &self.engine) {
            Ok(routes) => {
                tracing::info!(%start, %end, routes = routes.len(), "Route search finished");
                self.routes = routes;
                self.selected = Some(0);
                Ok(&self.routes)
            }
            Err(err) => {
                tracing::warn!(%start, %end, error = %err, "Route search failed");
                self.clear_routes();
                Err(err)
            }
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route_summaries(&self) -> Vec<RouteSummary> {
        self.routes
            .iter()
            .enumerate()
            .map(|(index, route)| route.summary(index))
            .collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_route(&self) -> Option<&Route> {
        self.selected.and_then(|idx| self.routes.get(idx))
    }

    /// Choose which route the next mission will fly. Locked while a mission
    /// is running or paused.
    pub fn select_route(
        &mut self,
        index: usize,
        mission: &MissionSession,
    ) -> Result<&Route, SessionError> {
        if mission.state().active() {
            return Err(SessionError::MissionInProgress);
        }
        let Some(route) = self.routes.get(index) else {
            return Err(SessionError::RouteIndexOutOfRange {
                index,
                available: self.routes.len(),
            });
        };
        self.selected = Some(index);
        Ok(route)
    }

    /// Start `mission` on the selected route.
    pub fn start_mission(
        &self,
        mission: &mut MissionSession,
        now: DateTime<Utc>,
    ) -> Result<MissionSnapshot, MissionError> {
        mission.start(self.selected_route(), &self.grid, now)
    }

    fn clear_routes(&mut self) {
        self.routes.clear();
        self.selected = None;
    }
}
