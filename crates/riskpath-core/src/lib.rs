//! Risk-graded terrain, multi-route A* search and mission playback.

pub mod error;
pub mod mission;
pub mod models;
pub mod route_engine;
pub mod session;
pub mod terrain;

pub use error::{MissionError, PointParseError, SearchError, SessionError, TerrainError};
pub use mission::{
    MissionAction, MissionPhase, MissionRating, MissionScore, MissionSession, MissionSnapshot,
    MissionState, MissionStats, MissionSummary, TickOutcome, DEFAULT_TICK_INTERVAL_MS,
};
pub use models::{Point, RiskLevel, Route, RouteCategory, RouteKind, RouteStats, RouteSummary};
pub use route_engine::{find_routes, weighted_search, RouteEngineConfig, SearchRun};
pub use session::{ClickOutcome, TerrainSession};
pub use terrain::{RiskHistogram, TerrainConfig, TerrainGrid, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
