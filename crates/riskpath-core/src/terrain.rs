//! Risk-graded terrain grid.
//!
//! A grid is generated once per "new terrain" action and never mutated
//! afterwards. Regeneration replaces it wholesale; callers holding routes or
//! missions computed against the previous grid must discard them.

use crate::error::TerrainError;
use crate::models::{Point, RiskLevel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRID_SIZE: usize = 40;

/// Largest accepted side length.
pub const MAX_GRID_SIZE: usize = 1024;

/// Neighbor offsets in expansion order: down, right, up, left.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Side length of the square grid
    pub size: usize,
    /// Fixed seed for reproducible terrain; `None` draws from the thread RNG
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            seed: None,
        }
    }
}

/// Square matrix of risk-graded cells stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerrainGrid {
    size: usize,
    cells: Vec<RiskLevel>,
}

/// Cell counts per risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskHistogram {
    pub clear: usize,
    pub moderate: usize,
    pub high: usize,
    pub hazard: usize,
}

impl RiskHistogram {
    pub fn total(&self) -> usize {
        self.clear + self.moderate + self.high + self.hazard
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Clear => self.clear,
            RiskLevel::Moderate => self.moderate,
            RiskLevel::High => self.high,
            RiskLevel::Hazard => self.hazard,
        }
    }

    /// Share of cells at `level`, 0.0 for an empty histogram.
    pub fn fraction(&self, level: RiskLevel) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(level) as f64 / total as f64
    }

    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Clear => self.clear += 1,
            RiskLevel::Moderate => self.moderate += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Hazard => self.hazard += 1,
        }
    }
}

impl TerrainGrid {
    /// Sample every cell independently from the terrain risk distribution.
    pub fn generate<R: Rng>(size: usize, rng: &mut R) -> Result<Self, TerrainError> {
        let cell_count = checked_cell_count(size)?;
        let cells = (0..cell_count)
            .map(|_| RiskLevel::from_sample(rng.random::<f64>()))
            .collect();
        Ok(Self { size, cells })
    }

    /// Generate a grid from config, seeding the RNG when a seed is set.
    pub fn from_config(config: &TerrainConfig) -> Result<Self, TerrainError> {
        match config.seed {
            Some(seed) => Self::generate(config.size, &mut StdRng::seed_from_u64(seed)),
            None => Self::generate(config.size, &mut rand::rng()),
        }
    }

    /// Build a grid from explicit risk rows, `rows[y][x]`.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, TerrainError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(checked_cell_count(size)?);
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(TerrainError::NonSquare {
                    row: row_idx,
                    len: row.len(),
                    expected: size,
                });
            }
            for value in row {
                cells.push(RiskLevel::try_from(*value)?);
            }
        }
        Ok(Self { size, cells })
    }

    /// Grid with every cell at the same risk.
    pub fn uniform(size: usize, level: RiskLevel) -> Result<Self, TerrainError> {
        let cell_count = checked_cell_count(size)?;
        Ok(Self {
            size,
            cells: vec![level; cell_count],
        })
    }

    /// Copy of this grid with one cell replaced. Construction-time only.
    pub fn with_cell(mut self, point: Point, level: RiskLevel) -> Result<Self, TerrainError> {
        let idx = self.index(point).ok_or(TerrainError::OutOfBounds(point))?;
        self.cells[idx] = level;
        Ok(self)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.size && point.y < self.size
    }

    pub fn risk_at(&self, point: Point) -> Option<RiskLevel> {
        self.index(point).map(|idx| self.cells[idx])
    }

    /// In-bounds orthogonal neighbors of `point`.
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |(dx, dy)| {
            let x = point.x.checked_add_signed(*dx)?;
            let y = point.y.checked_add_signed(*dy)?;
            let next = Point::new(x, y);
            self.contains(next).then_some(next)
        })
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[RiskLevel]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Point, RiskLevel)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, level)| (Point::new(idx % size, idx / size), *level))
    }

    pub fn risk_histogram(&self) -> RiskHistogram {
        let mut histogram = RiskHistogram::default();
        for level in &self.cells {
            histogram.record(*level);
        }
        histogram
    }

    /// Sum of cell risk over `path`, or `None` if any point is off the grid.
    pub fn path_risk(&self, path: &[Point]) -> Option<u32> {
        path.iter()
            .map(|point| self.risk_at(*point).map(RiskLevel::cost))
            .sum()
    }

    fn index(&self, point: Point) -> Option<usize> {
        self.contains(point).then(|| point.y * self.size + point.x)
    }
}

fn checked_cell_count(size: usize) -> Result<usize, TerrainError> {
    if size == 0 {
        return Err(TerrainError::EmptyGrid);
    }
    if size > MAX_GRID_SIZE {
        return Err(TerrainError::TooLarge {
            size,
            max: MAX_GRID_SIZE,
        });
    }
    size.checked_mul(size).ok_or(TerrainError::TooLarge {
        size,
        max: MAX_GRID_SIZE,
    })
}
