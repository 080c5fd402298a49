//! # grid_astar
//!
//! Shortest paths on a 4-connected grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with unit edge costs and the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic. The
//! frontier is ordered by `(f, h)`, so among equally promising cells the one closest to the goal
//! is expanded first. Every expansion can be observed through a [SearchObserver], which is how the
//! terminal visualization in [render] is driven.
//!
//! ```
//! use grid_astar::{AStar, Grid};
//! use grid_util::point::Point;
//!
//! let mut grid = Grid::new(3, 3);
//! grid.set_blocked(Point::new(1, 1), true);
//! let path = AStar::new()
//!     .find_path(&grid, Point::new(0, 0), Point::new(2, 2))
//!     .unwrap();
//! assert_eq!(path.length(), 4);
//! ```
pub mod astar;
pub mod cost;
pub mod error;
pub mod frontier;
pub mod generate;
pub mod grid;
pub mod observer;
pub mod path;
pub mod render;
pub mod visited;

pub use crate::astar::{AStar, SearchConfig, SearchOutcome, SearchState};
pub use crate::error::{EndpointFault, GenerateError, SearchError};
pub use crate::grid::Grid;
pub use crate::observer::{ExpansionRecorder, NoopObserver, SearchEvent, SearchObserver};
pub use crate::path::{Path, PathStep};

use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::{IndexMap, IndexSet};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Manhattan distance between two cells. Admissible and consistent for 4-directional movement
/// with unit costs.
pub fn heuristic(a: &Point, b: &Point) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_is_manhattan() {
        assert_eq!(heuristic(&Point::new(0, 0), &Point::new(4, 4)), 8);
        assert_eq!(heuristic(&Point::new(3, -2), &Point::new(-1, 1)), 7);
        assert_eq!(heuristic(&Point::new(5, 5), &Point::new(5, 5)), 0);
    }
}
