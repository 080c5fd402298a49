use crate::astar::SearchOutcome;
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::visited::Visited;
use grid_util::point::Point;

/// Snapshot of a search at the moment a cell was expanded. Borrows the live open and closed sets,
/// so looking at it costs nothing unless the observer iterates them.
pub struct SearchEvent<'a> {
    /// 1-based number of the expansion.
    pub step: usize,
    /// The cell that was just moved from the open to the closed set.
    pub current: Point,
    pub start: Point,
    pub goal: Point,
    pub(crate) grid: &'a Grid,
    pub(crate) frontier: &'a Frontier,
    pub(crate) visited: &'a Visited,
}

impl<'a> SearchEvent<'a> {
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Point> + 'a {
        let (grid, frontier) = (self.grid, self.frontier);
        frontier.iter().map(move |ix| grid.point(ix))
    }

    /// Closed cells in expansion order, ending with [current](Self::current).
    pub fn closed_cells(&self) -> impl Iterator<Item = Point> + 'a {
        let (grid, visited) = (self.grid, self.visited);
        visited.iter().map(move |ix| grid.point(ix))
    }

    pub fn open_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn closed_len(&self) -> usize {
        self.visited.len()
    }
}

/// Consumer of search progress. [on_expand](Self::on_expand) is called once per expansion and
/// [on_finish](Self::on_finish) once when the search ends with an outcome.
pub trait SearchObserver {
    fn on_expand(&mut self, event: &SearchEvent<'_>);

    fn on_finish(&mut self, _outcome: &SearchOutcome) {}
}

/// Ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_expand(&mut self, _event: &SearchEvent<'_>) {}
}

/// Records the expansion order, the largest open set seen and how the search ended.
#[derive(Clone, Debug, Default)]
pub struct ExpansionRecorder {
    pub expanded: Vec<Point>,
    pub max_open: usize,
    pub found: Option<bool>,
    pub outcome: Option<SearchOutcome>,
}

impl ExpansionRecorder {
    pub fn new() -> ExpansionRecorder {
        ExpansionRecorder::default()
    }
}

impl SearchObserver for ExpansionRecorder {
    fn on_expand(&mut self, event: &SearchEvent<'_>) {
        self.expanded.push(event.current);
        self.max_open = self.max_open.max(event.open_len());
    }

    fn on_finish(&mut self, outcome: &SearchOutcome) {
        self.found = Some(outcome.found());
        self.outcome = Some(outcome.clone());
    }
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_expand(&mut self, event: &SearchEvent<'_>) {
        (**self).on_expand(event)
    }

    fn on_finish(&mut self, outcome: &SearchOutcome) {
        (**self).on_finish(outcome)
    }
}
