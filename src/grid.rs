use crate::render::Canvas;
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Neighbour indices of a single cell. Never holds more than the 4-neighbourhood.
pub(crate) type Neighbours = SmallVec<[usize; 4]>;

/// Offsets of the 4-neighbourhood in the order left, right, down, up.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// [Grid] stores the raw [bool] values in a [BoolGrid] that determine whether a cell is blocked
/// ([true]) or open ([false]). Open neighbours are cached per cell as flat indices so that the
/// search never has to consult the blocked flags. Connected components are maintained in a
/// [UnionFind] structure to answer reachability queries without searching.
#[derive(Clone, Debug)]
pub struct Grid {
    blocked: BoolGrid,
    neighbours: Vec<Neighbours>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Creates a fully open grid.
    pub fn new(width: usize, height: usize) -> Grid {
        Grid::from_bool_grid(BoolGrid::new(width, height, false))
    }

    /// Wraps an existing [BoolGrid] in which [true] marks a blocked cell.
    pub fn from_bool_grid(blocked: BoolGrid) -> Grid {
        let cell_count = blocked.width() * blocked.height();
        let mut grid = Grid {
            blocked,
            neighbours: vec![Neighbours::new(); cell_count],
            components: UnionFind::new(cell_count),
            components_dirty: false,
        };
        for ix in 0..cell_count {
            grid.neighbours[ix] = grid.compute_neighbours(ix);
        }
        grid.generate_components();
        grid
    }

    pub fn width(&self) -> usize {
        self.blocked.width()
    }

    pub fn height(&self) -> usize {
        self.blocked.height()
    }

    /// Width and height of the grid.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn cell_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Number of cells that are not blocked.
    pub fn open_cell_count(&self) -> usize {
        (0..self.cell_count())
            .filter(|&ix| !self.is_blocked(self.point(ix)))
            .count()
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }

    /// Whether a cell is blocked. Cells outside the grid count as blocked.
    pub fn is_blocked(&self, point: Point) -> bool {
        !self.in_bounds(point) || self.blocked.get(point.x, point.y)
    }

    /// Open 4-neighbours of a cell. Blocked and out-of-bounds cells have none.
    pub fn neighbours(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        let ixs: &[usize] = if self.in_bounds(point) {
            &self.neighbours[self.ix(point)]
        } else {
            &[]
        };
        ixs.iter().map(move |&ix| self.point(ix))
    }

    /// Updates a cell. Joins newly connected components and flags the components as dirty if
    /// they are (potentially) broken apart into multiple. Points outside the grid are ignored.
    pub fn set_blocked(&mut self, point: Point, blocked: bool) {
        if !self.in_bounds(point) {
            return;
        }
        let was_blocked = self.blocked.get(point.x, point.y);
        if was_blocked == blocked {
            return;
        }
        self.blocked.set(point.x, point.y, blocked);
        let ix = self.ix(point);
        self.neighbours[ix] = self.compute_neighbours(ix);
        for n in self.adjacent_ixs(ix) {
            self.neighbours[n] = self.compute_neighbours(n);
        }
        if blocked {
            self.components_dirty = true;
        } else {
            for &n in &self.neighbours[ix] {
                self.components.union(ix, n);
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to, [None] outside the grid.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        if !self.in_bounds(*point) {
            return None;
        }
        Some(self.components.find(self.ix(*point)))
    }

    /// Checks if start and goal are on the same component. Only meaningful while the components
    /// are up to date, see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_blocked(*start) || self.is_blocked(*goal) {
            return false;
        }
        self.components.equiv(self.ix(*start), self.ix(*goal))
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cell_count());
        self.components_dirty = false;
        for ix in 0..self.cell_count() {
            // Linking right and up covers every edge exactly once.
            for &n in self.neighbours[ix].iter().filter(|&&n| n > ix) {
                self.components.union(ix, n);
            }
        }
    }

    pub(crate) fn ix(&self, point: Point) -> usize {
        point.y as usize * self.width() + point.x as usize
    }

    pub(crate) fn point(&self, ix: usize) -> Point {
        let width = self.width();
        Point::new((ix % width) as i32, (ix / width) as i32)
    }

    pub(crate) fn neighbour_ixs(&self, ix: usize) -> &[usize] {
        &self.neighbours[ix]
    }

    pub(crate) fn is_blocked_ix(&self, ix: usize) -> bool {
        self.is_blocked(self.point(ix))
    }

    fn adjacent_ixs(&self, ix: usize) -> Neighbours {
        let p = self.point(ix);
        NEUMANN_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(p.x + dx, p.y + dy))
            .filter(|n| self.in_bounds(*n))
            .map(|n| self.ix(n))
            .collect()
    }

    fn compute_neighbours(&self, ix: usize) -> Neighbours {
        if self.is_blocked_ix(ix) {
            return Neighbours::new();
        }
        self.adjacent_ixs(ix)
            .into_iter()
            .filter(|&n| !self.is_blocked_ix(n))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", Canvas::new(self))
    }
}
