use crate::cost::{CostRecord, CostState};
use crate::error::{EndpointFault, Result, SearchError};
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::heuristic;
use crate::observer::{NoopObserver, SearchEvent, SearchObserver};
use crate::path::Path;
use crate::visited::Visited;
use grid_util::point::Point;
use log::{debug, info, trace, warn};

/// Tunables of the [AStar] engine.
#[derive(Clone, Debug, Default)]
pub struct SearchConfig {
    /// Upper bound on the number of expansions of a single run. [None] means unbounded.
    pub max_expansions: Option<usize>,
    /// Consult the grid's connected components before searching and skip searches that can
    /// not succeed. Ignored while the components are dirty.
    pub component_precheck: bool,
}

/// Lifecycle of a single search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Init,
    Running,
    Succeeded,
    Exhausted,
    /// Stopped by [SearchConfig::max_expansions].
    Aborted,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Path),
    /// The frontier ran dry before the goal was reached.
    Exhausted { expanded: usize },
    /// The expansion budget ran out. Only observers see this outcome, [AStar::search] itself
    /// returns [SearchError::BudgetExhausted].
    Aborted { expanded: usize },
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Exhausted { .. } | SearchOutcome::Aborted { .. } => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Exhausted { .. } | SearchOutcome::Aborted { .. } => None,
        }
    }
}

/// A* over the 4-neighbourhood of a [Grid] with unit edge costs and the Manhattan heuristic.
///
/// The engine owns the open set, the closed set and the cost overlay and reuses their allocations
/// from run to run. Concurrent searches each need their own engine.
#[derive(Clone, Debug, Default)]
pub struct AStar {
    pub config: SearchConfig,
    costs: CostState,
    frontier: Frontier,
    visited: Visited,
    state: SearchState,
    expanded: usize,
}

impl AStar {
    pub fn new() -> AStar {
        AStar::default()
    }

    pub fn with_config(config: SearchConfig) -> AStar {
        AStar {
            config,
            ..AStar::default()
        }
    }

    /// State the last run ended in, or [SearchState::Init] before the first run.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of cells expanded by the last run.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Cost overlay as left behind by the last run.
    pub fn costs(&self) -> &CostState {
        &self.costs
    }

    /// Computes a shortest path from start to goal. Exhausting the frontier is reported as
    /// [SearchError::NoPathFound].
    pub fn find_path(&mut self, grid: &Grid, start: Point, goal: Point) -> Result<Path> {
        match self.search(grid, start, goal, &mut NoopObserver)? {
            SearchOutcome::Found(path) => Ok(path),
            SearchOutcome::Exhausted { expanded } => Err(SearchError::NoPathFound { expanded }),
            SearchOutcome::Aborted { expanded } => Err(SearchError::BudgetExhausted { expanded }),
        }
    }

    /// Runs a search, reporting every expansion to the observer. Rejects endpoints that are out
    /// of bounds or blocked before any work is done.
    pub fn search<O>(
        &mut self,
        grid: &Grid,
        start: Point,
        goal: Point,
        observer: &mut O,
    ) -> Result<SearchOutcome>
    where
        O: SearchObserver + ?Sized,
    {
        self.state = SearchState::Init;
        self.expanded = 0;
        let start_ix = validate_endpoint(grid, start)?;
        let goal_ix = validate_endpoint(grid, goal)?;

        self.costs.reset(grid.cell_count());
        self.frontier.clear();
        self.visited.clear();
        info!("Searching path from {} to {}", start, goal);

        if self.config.component_precheck && !grid.components_dirty() {
            if !grid.reachable(&start, &goal) {
                info!("{} is not reachable from {}", goal, start);
                return Ok(self.finish(SearchOutcome::Exhausted { expanded: 0 }, observer));
            }
            debug!("{} is reachable from {}, computing path", goal, start);
        }

        let h = heuristic(&start, &goal);
        self.costs.set(
            start_ix,
            CostRecord {
                g: 0,
                h,
                f: h,
                parent: None,
            },
        );
        self.frontier.insert(start_ix, h, h);
        self.transition(SearchState::Running);

        while !self.frontier.is_empty() {
            if let Some(budget) = self.config.max_expansions {
                if self.expanded >= budget {
                    let expanded = self.expanded;
                    self.finish(SearchOutcome::Aborted { expanded }, observer);
                    return Err(SearchError::BudgetExhausted { expanded });
                }
            }
            let current = self.frontier.extract_min()?;
            self.visited.mark_visited(current);
            self.expanded += 1;

            let current_point = grid.point(current);
            let current_g = self.settled_g(current)?;
            trace!(
                "Expanding {} (g: {}, open: {}, closed: {})",
                current_point,
                current_g,
                self.frontier.len(),
                self.visited.len()
            );
            observer.on_expand(&SearchEvent {
                step: self.expanded,
                current: current_point,
                start,
                goal,
                grid,
                frontier: &self.frontier,
                visited: &self.visited,
            });

            if current == goal_ix {
                let path = Path::reconstruct(grid, &self.costs, goal_ix);
                return Ok(self.finish(SearchOutcome::Found(path), observer));
            }

            let tentative_g = current_g + 1;
            for &neighbour in grid.neighbour_ixs(current) {
                debug_assert!(!grid.is_blocked_ix(neighbour));
                if self.visited.is_visited(neighbour) {
                    continue;
                }
                // Only a strictly cheaper path revises an already discovered cell.
                if matches!(self.costs.g(neighbour), Some(g) if g <= tentative_g) {
                    continue;
                }
                let h = heuristic(&grid.point(neighbour), &goal);
                let f = tentative_g + h;
                self.costs.set(
                    neighbour,
                    CostRecord {
                        g: tentative_g,
                        h,
                        f,
                        parent: Some(current),
                    },
                );
                self.frontier.insert(neighbour, f, h);
            }
        }

        if self.config.component_precheck && !grid.components_dirty() {
            warn!("Reachable goal could not be pathed to, are the components correct?");
        }
        let expanded = self.expanded;
        Ok(self.finish(SearchOutcome::Exhausted { expanded }, observer))
    }

    /// Path cost of a cell taken from the frontier. Every cell is given a cost record before it
    /// is inserted, so a missing record means the frontier and the overlay disagree.
    fn settled_g(&self, cell: usize) -> Result<u32> {
        self.costs
            .g(cell)
            .ok_or(SearchError::MissingCost { cell })
    }

    fn finish<O>(&mut self, outcome: SearchOutcome, observer: &mut O) -> SearchOutcome
    where
        O: SearchObserver + ?Sized,
    {
        match &outcome {
            SearchOutcome::Found(path) => {
                self.transition(SearchState::Succeeded);
                info!(
                    "Found path of length {} after expanding {} cells",
                    path.length(),
                    self.expanded
                );
            }
            SearchOutcome::Exhausted { expanded } => {
                self.transition(SearchState::Exhausted);
                info!("No path found after expanding {} cells", expanded);
            }
            SearchOutcome::Aborted { expanded } => {
                self.transition(SearchState::Aborted);
                info!("Gave up after expanding {} cells", expanded);
            }
        }
        observer.on_finish(&outcome);
        outcome
    }

    fn transition(&mut self, state: SearchState) {
        debug!("Search state {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}

fn validate_endpoint(grid: &Grid, point: Point) -> Result<usize> {
    let fault = if !grid.in_bounds(point) {
        EndpointFault::OutOfBounds
    } else if grid.is_blocked(point) {
        EndpointFault::Blocked
    } else {
        return Ok(grid.ix(point));
    };
    Err(SearchError::InvalidEndpoint { point, fault })
}
