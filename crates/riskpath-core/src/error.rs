//! Error types for terrain construction, route search and mission playback.
//!
//! None of these are fatal: every variant describes input the caller can
//! correct and retry.

use crate::mission::{MissionAction, MissionPhase};
use crate::models::Point;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerrainError {
    #[error("terrain grid must have at least one cell")]
    EmptyGrid,
    #[error("terrain size {size} exceeds the maximum of {max}")]
    TooLarge { size: usize, max: usize },
    #[error("terrain row {row} has {len} cells, expected {expected}")]
    NonSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("invalid risk value {0}, expected one of 1, 3, 5, 10")]
    InvalidRisk(u8),
    #[error("point {0} is outside the terrain grid")]
    OutOfBounds(Point),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Start or end is unset, or both name the same cell. Nothing was searched.
    #[error("route search needs distinct start and end points")]
    InvalidSelection,
    #[error("point {0} is outside the terrain grid")]
    OutOfBounds(Point),
    /// Every weighted run exhausted its open set without reaching the end.
    #[error("no route found from {start} to {end}")]
    NoRouteFound { start: Point, end: Point },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissionError {
    #[error("mission requires a selected route with at least one point")]
    PreconditionFailed,
    #[error("route point {0} is not on the current terrain grid")]
    RouteOffGrid(Point),
    #[error("cannot {action} a mission that is {from}")]
    InvalidTransition {
        from: MissionPhase,
        action: MissionAction,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("route index {index} out of range ({available} routes available)")]
    RouteIndexOutOfRange { index: usize, available: usize },
    #[error("route selection is locked while a mission is in progress")]
    MissionInProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointParseError {
    #[error("expected a point as `x,y`, got `{0}`")]
    Format(String),
    #[error("invalid coordinate `{0}`")]
    Coordinate(String),
}
