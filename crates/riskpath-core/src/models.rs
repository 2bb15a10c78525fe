//! Core data models for terrain cells, points and routes.

use crate::error::{PointParseError, TerrainError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grid coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two points.
    pub fn manhattan(self, other: Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_adjacent(self, other: Point) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = PointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (x, y) = trimmed
            .split_once(',')
            .ok_or_else(|| PointParseError::Format(s.to_string()))?;
        let parse = |value: &str| {
            value
                .trim()
                .parse::<usize>()
                .map_err(|_| PointParseError::Coordinate(value.trim().to_string()))
        };
        Ok(Point::new(parse(x)?, parse(y)?))
    }
}

/// Categorical traversal cost of a terrain cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RiskLevel {
    /// Open ground, cost 1
    Clear,
    /// Rough ground, cost 3
    Moderate,
    /// Dangerous ground, cost 5
    High,
    /// Impassable, never entered by the search
    Hazard,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Clear,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Hazard,
    ];

    /// Cost of moving into a cell with this risk.
    pub const fn cost(self) -> u32 {
        match self {
            RiskLevel::Clear => 1,
            RiskLevel::Moderate => 3,
            RiskLevel::High => 5,
            RiskLevel::Hazard => 10,
        }
    }

    pub const fn is_hazard(self) -> bool {
        matches!(self, RiskLevel::Hazard)
    }

    /// Cells at risk 5 or above count as hazards encountered during a mission.
    pub const fn is_dangerous(self) -> bool {
        self.cost() >= 5
    }

    /// Map a uniform sample in `[0, 1)` onto the terrain distribution
    /// (50% clear, 25% moderate, 15% high, 10% hazard).
    pub fn from_sample(sample: f64) -> Self {
        if sample < 0.5 {
            RiskLevel::Clear
        } else if sample < 0.75 {
            RiskLevel::Moderate
        } else if sample < 0.9 {
            RiskLevel::High
        } else {
            RiskLevel::Hazard
        }
    }
}

impl TryFrom<u8> for RiskLevel {
    type Error = TerrainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RiskLevel::Clear),
            3 => Ok(RiskLevel::Moderate),
            5 => Ok(RiskLevel::High),
            10 => Ok(RiskLevel::Hazard),
            other => Err(TerrainError::InvalidRisk(other)),
        }
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> Self {
        level.cost() as u8
    }
}

/// Which weighted search produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Optimal,
    Fast,
    Safe,
}

impl RouteKind {
    /// Search order. Deduplication keeps the earliest kind for a given path.
    pub const SEARCH_ORDER: [RouteKind; 3] = [RouteKind::Optimal, RouteKind::Fast, RouteKind::Safe];

    pub fn label(self) -> &'static str {
        match self {
            RouteKind::Optimal => "Optimal Route",
            RouteKind::Fast => "Fast Route",
            RouteKind::Safe => "Safe Route",
        }
    }

    pub fn category(self) -> RouteCategory {
        match self {
            RouteKind::Optimal => RouteCategory::Optimal,
            RouteKind::Fast | RouteKind::Safe => RouteCategory::Alternative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteCategory {
    Optimal,
    Alternative,
}

impl RouteCategory {
    pub fn badge(self) -> &'static str {
        match self {
            RouteCategory::Optimal => "BEST",
            RouteCategory::Alternative => "ALT",
        }
    }
}

/// Derived, recomputable statistics of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStats {
    /// Number of cells on the path, endpoints included
    pub distance: usize,
    /// Sum of cell risk over the whole path, endpoints included
    pub total_risk: u32,
    /// Unit-less "minutes" from the linear time estimate
    pub estimated_time: u32,
}

/// A candidate route between start and end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub kind: RouteKind,
    pub label: String,
    pub category: RouteCategory,
    pub path: Vec<Point>,
    pub stats: RouteStats,
    /// Nodes expanded by the search run that produced this route
    pub nodes_visited: usize,
}

impl Route {
    pub fn start(&self) -> Option<Point> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.path.last().copied()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn summary(&self, index: usize) -> RouteSummary {
        RouteSummary {
            index,
            label: self.label.clone(),
            category: self.category,
            badge: self.category.badge().to_string(),
            distance: self.stats.distance,
            total_risk: self.stats.total_risk,
            estimated_time: self.stats.estimated_time,
        }
    }
}

/// Route list entry handed to the route selection UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub index: usize,
    pub label: String,
    pub category: RouteCategory,
    pub badge: String,
    pub distance: usize,
    pub total_risk: u32,
    pub estimated_time: u32,
}
