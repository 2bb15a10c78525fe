//! Endpoint selection when none are given on the command line.

use rand::seq::IndexedRandom;
use rand::Rng;
use riskpath_core::{Point, TerrainGrid};

/// Pick two distinct passable cells at random.
///
/// Returns `None` when the grid has fewer than two passable cells.
pub fn pick_endpoints<R: Rng>(grid: &TerrainGrid, rng: &mut R) -> Option<(Point, Point)> {
    let passable = passable_cells(grid);
    let mut picked = passable.choose_multiple(rng, 2).copied();
    Some((picked.next()?, picked.next()?))
}

/// Fill in whichever endpoints are missing. A random endpoint never lands on
/// the one that was supplied.
pub fn complete_endpoints<R: Rng>(
    grid: &TerrainGrid,
    start: Option<Point>,
    end: Option<Point>,
    rng: &mut R,
) -> Option<(Point, Point)> {
    match (start, end) {
        (Some(start), Some(end)) => Some((start, end)),
        (Some(start), None) => pick_other(grid, start, rng).map(|end| (start, end)),
        (None, Some(end)) => pick_other(grid, end, rng).map(|start| (start, end)),
        (None, None) => pick_endpoints(grid, rng),
    }
}

fn pick_other<R: Rng>(grid: &TerrainGrid, taken: Point, rng: &mut R) -> Option<Point> {
    let candidates: Vec<Point> = passable_cells(grid)
        .into_iter()
        .filter(|point| *point != taken)
        .collect();
    candidates.choose(rng).copied()
}

fn passable_cells(grid: &TerrainGrid) -> Vec<Point> {
    grid.cells()
        .filter(|(_, level)| !level.is_hazard())
        .map(|(point, _)| point)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use riskpath_core::RiskLevel;

    #[test]
    fn picks_distinct_passable_cells() {
        let grid = TerrainGrid::from_rows(&[[10u8, 1, 10], [10, 10, 10], [1, 10, 10]]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let (start, end) = pick_endpoints(&grid, &mut rng).unwrap();
            assert_ne!(start, end);
            for point in [start, end] {
                assert!(point == Point::new(1, 0) || point == Point::new(0, 2));
            }
        }
    }

    #[test]
    fn missing_endpoint_avoids_the_supplied_one() {
        // two passable cells: the random pick must be the other one
        let grid = TerrainGrid::from_rows(&[[1u8, 10], [10, 3]]).unwrap();
        let fixed = Point::new(0, 0);
        let other = Point::new(1, 1);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                complete_endpoints(&grid, Some(fixed), None, &mut rng),
                Some((fixed, other))
            );
            assert_eq!(
                complete_endpoints(&grid, None, Some(fixed), &mut rng),
                Some((other, fixed))
            );
        }
    }

    #[test]
    fn supplied_endpoints_are_kept_as_given() {
        let grid = TerrainGrid::uniform(3, RiskLevel::Clear).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let pair = (Point::new(2, 2), Point::new(0, 1));
        assert_eq!(
            complete_endpoints(&grid, Some(pair.0), Some(pair.1), &mut rng),
            Some(pair)
        );
        let (start, end) = complete_endpoints(&grid, None, None, &mut rng).unwrap();
        assert_ne!(start, end);
    }

    #[test]
    fn needs_two_passable_cells() {
        let grid = TerrainGrid::uniform(2, RiskLevel::Hazard)
            .unwrap()
            .with_cell(Point::new(0, 0), RiskLevel::Clear)
            .unwrap();
        assert!(pick_endpoints(&grid, &mut StdRng::seed_from_u64(1)).is_none());
    }
}
