use crate::error::GenerateError;
use crate::grid::Grid;
use crate::heuristic;
use grid_util::point::Point;
use log::debug;
use rand::Rng;

/// Default grid width.
pub const DEFAULT_WIDTH: usize = 100;
/// Default grid height.
pub const DEFAULT_HEIGHT: usize = 100;
/// Endpoints closer than this are rejected by default, so that searches are not trivial.
pub const DEFAULT_MIN_DISTANCE: u32 = 9;

/// Parameters for random grids and endpoints.
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    pub width: usize,
    pub height: usize,
    /// Probability of a cell being blocked.
    pub obstacle_density: f64,
    /// Smallest Manhattan distance between generated endpoints.
    pub min_distance: u32,
    /// Draws before endpoint generation gives up.
    pub max_attempts: usize,
}

impl Default for GenerateConfig {
    fn default() -> GenerateConfig {
        GenerateConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            obstacle_density: 0.2,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_attempts: 10_000,
        }
    }
}

/// Builds a grid in which every cell is blocked with probability `obstacle_density`.
pub fn random_grid<R: Rng + ?Sized>(
    config: &GenerateConfig,
    rng: &mut R,
) -> Result<Grid, GenerateError> {
    if !(0.0..=1.0).contains(&config.obstacle_density) {
        return Err(GenerateError::InvalidDensity(config.obstacle_density));
    }
    let mut grid = Grid::new(config.width, config.height);
    for y in 0..config.height as i32 {
        for x in 0..config.width as i32 {
            if rng.gen_bool(config.obstacle_density) {
                grid.set_blocked(Point::new(x, y), true);
            }
        }
    }
    grid.update();
    debug!(
        "Generated {}x{} grid with {} open cells",
        config.width,
        config.height,
        grid.open_cell_count()
    );
    Ok(grid)
}

/// Uniformly drawn cell of the grid, blocked or not.
pub fn random_point<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Point {
    Point::new(
        rng.gen_range(0..grid.width()) as i32,
        rng.gen_range(0..grid.height()) as i32,
    )
}

fn check_not_empty(grid: &Grid) -> Result<(), GenerateError> {
    let (width, height) = grid.dimensions();
    if width == 0 || height == 0 {
        return Err(GenerateError::EmptyGrid { width, height });
    }
    Ok(())
}

fn no_endpoints(config: &GenerateConfig) -> GenerateError {
    GenerateError::NoEndpoints {
        min_distance: config.min_distance,
        attempts: config.max_attempts,
    }
}

/// Draws pairs of open cells until one is at least `min_distance` apart.
pub fn random_endpoints<R: Rng + ?Sized>(
    grid: &Grid,
    config: &GenerateConfig,
    rng: &mut R,
) -> Result<(Point, Point), GenerateError> {
    check_not_empty(grid)?;
    for _ in 0..config.max_attempts {
        let start = random_point(grid, rng);
        let goal = random_point(grid, rng);
        if !grid.is_blocked(start)
            && !grid.is_blocked(goal)
            && heuristic(&start, &goal) >= config.min_distance
        {
            return Ok((start, goal));
        }
    }
    Err(no_endpoints(config))
}

/// Draws an open cell at least `min_distance` away from `fixed`, for when only one endpoint is
/// given.
pub fn random_endpoint_for<R: Rng + ?Sized>(
    grid: &Grid,
    fixed: Point,
    config: &GenerateConfig,
    rng: &mut R,
) -> Result<Point, GenerateError> {
    check_not_empty(grid)?;
    for _ in 0..config.max_attempts {
        let other = random_point(grid, rng);
        if !grid.is_blocked(other) && heuristic(&fixed, &other) >= config.min_distance {
            return Ok(other);
        }
    }
    Err(no_endpoints(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn same_seed_same_grid() {
        let config = GenerateConfig {
            width: 20,
            height: 10,
            obstacle_density: 0.4,
            ..GenerateConfig::default()
        };
        let a = random_grid(&config, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = random_grid(&config, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.dimensions(), (20, 10));
        assert!(!a.components_dirty());
    }

    #[test]
    fn density_extremes() {
        let mut rng = StdRng::seed_from_u64(0);
        let open = GenerateConfig {
            width: 8,
            height: 8,
            obstacle_density: 0.0,
            ..GenerateConfig::default()
        };
        assert_eq!(random_grid(&open, &mut rng).unwrap().open_cell_count(), 64);
        let full = GenerateConfig {
            obstacle_density: 1.0,
            ..open.clone()
        };
        assert_eq!(random_grid(&full, &mut rng).unwrap().open_cell_count(), 0);
        let invalid = GenerateConfig {
            obstacle_density: 1.5,
            ..open
        };
        assert_eq!(
            random_grid(&invalid, &mut rng).unwrap_err(),
            GenerateError::InvalidDensity(1.5)
        );
    }

    #[test]
    fn endpoints_respect_min_distance() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = GenerateConfig {
            width: 30,
            height: 30,
            obstacle_density: 0.3,
            ..GenerateConfig::default()
        };
        let grid = random_grid(&config, &mut rng).unwrap();
        for _ in 0..50 {
            let (start, goal) = random_endpoints(&grid, &config, &mut rng).unwrap();
            assert!(!grid.is_blocked(start));
            assert!(!grid.is_blocked(goal));
            assert!(heuristic(&start, &goal) >= 9);
        }
    }

    #[test]
    fn single_endpoint_respects_min_distance() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = Grid::new(12, 12);
        let config = GenerateConfig::default();
        let fixed = Point::new(0, 0);
        for _ in 0..50 {
            let other = random_endpoint_for(&grid, fixed, &config, &mut rng).unwrap();
            assert!(heuristic(&fixed, &other) >= 9);
        }
        // No cell of a 12x12 grid lies 23 away from (5, 5).
        let far = GenerateConfig {
            min_distance: 23,
            max_attempts: 50,
            ..GenerateConfig::default()
        };
        assert_eq!(
            random_endpoint_for(&grid, Point::new(5, 5), &far, &mut rng),
            Err(GenerateError::NoEndpoints {
                min_distance: 23,
                attempts: 50
            })
        );
    }

    #[test]
    fn impossible_endpoints_give_up() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = Grid::new(3, 3);
        let config = GenerateConfig {
            max_attempts: 20,
            ..GenerateConfig::default()
        };
        assert_eq!(
            random_endpoints(&grid, &config, &mut rng),
            Err(GenerateError::NoEndpoints {
                min_distance: 9,
                attempts: 20
            })
        );
        assert_eq!(
            random_endpoints(&Grid::new(0, 4), &config, &mut rng),
            Err(GenerateError::EmptyGrid {
                width: 0,
                height: 4
            })
        );
    }
}
