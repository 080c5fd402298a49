use crate::astar::SearchOutcome;
use crate::grid::Grid;
use crate::observer::{SearchEvent, SearchObserver};
use core::fmt;
use grid_util::point::Point;
use log::warn;
use std::io::Write;
use std::thread;
use std::time::Duration;

pub const BLOCKED: char = '#';
pub const EMPTY: char = '.';
pub const OPEN: char = 'o';
pub const CLOSED: char = 'x';
pub const CURRENT: char = '@';
pub const START: char = 'S';
pub const GOAL: char = 'G';
pub const PATH: char = '*';

/// Character buffer with one cell per grid cell. Row `y = 0` is printed first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    cells: Vec<char>,
}

impl Canvas {
    pub fn new(grid: &Grid) -> Canvas {
        let (width, height) = grid.dimensions();
        let cells = (0..width * height)
            .map(|ix| {
                if grid.is_blocked_ix(ix) {
                    BLOCKED
                } else {
                    EMPTY
                }
            })
            .collect();
        Canvas { width, cells }
    }

    /// Draws `c` at `point`. Points outside the canvas are ignored.
    pub fn mark(&mut self, point: Point, c: char) {
        if point.x < 0 || point.y < 0 || point.x as usize >= self.width {
            return;
        }
        let ix = point.y as usize * self.width + point.x as usize;
        if let Some(cell) = self.cells.get_mut(ix) {
            *cell = c;
        }
    }

    pub fn mark_all(&mut self, points: impl IntoIterator<Item = Point>, c: char) {
        for p in points {
            self.mark(p, c);
        }
    }

    /// Draws the open and closed sets of a search event.
    pub fn from_event(event: &SearchEvent<'_>) -> Canvas {
        let mut canvas = Canvas::new(event.grid());
        canvas.mark_all(event.closed_cells(), CLOSED);
        canvas.mark_all(event.open_cells(), OPEN);
        canvas.mark(event.current, CURRENT);
        canvas.mark(event.start, START);
        canvas.mark(event.goal, GOAL);
        canvas
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.width) {
            writeln!(f, "{}", row.iter().collect::<String>())?;
        }
        Ok(())
    }
}

/// Observer that draws the search frontier to a writer as it expands. Every `stride`-th
/// expansion is drawn, followed by `delay`. The final frame is drawn on top of the last one and
/// shows the path, if any.
pub struct TerminalRenderer<'g, W: Write> {
    grid: &'g Grid,
    out: W,
    pub stride: usize,
    pub delay: Duration,
    /// Clear the terminal before every frame using ANSI escapes.
    pub clear: bool,
    last: Option<Canvas>,
    failed: bool,
}

impl<'g, W: Write> TerminalRenderer<'g, W> {
    pub fn new(grid: &'g Grid, out: W) -> TerminalRenderer<'g, W> {
        TerminalRenderer {
            grid,
            out,
            stride: 1,
            delay: Duration::ZERO,
            clear: false,
            last: None,
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, canvas: &Canvas, caption: &str) {
        if self.failed {
            return;
        }
        let clear = if self.clear { "\x1b[2J\x1b[H" } else { "" };
        let result = writeln!(self.out, "{}{}{}", clear, canvas, caption)
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Stopped rendering search: {}", e);
            self.failed = true;
        }
    }
}

impl<'g, W: Write> SearchObserver for TerminalRenderer<'g, W> {
    fn on_expand(&mut self, event: &SearchEvent<'_>) {
        if event.step % self.stride.max(1) == 0 {
            let canvas = Canvas::from_event(event);
            let caption = format!(
                "step {}: current {}, open {}, closed {}",
                event.step,
                event.current,
                event.open_len(),
                event.closed_len()
            );
            self.draw(&canvas, &caption);
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            self.last = Some(canvas);
        }
    }

    fn on_finish(&mut self, outcome: &SearchOutcome) {
        let mut canvas = self.last.take().unwrap_or_else(|| Canvas::new(self.grid));
        match outcome {
            SearchOutcome::Found(path) => {
                canvas.mark_all(path.points(), PATH);
                canvas.mark(path.start(), START);
                canvas.mark(path.goal(), GOAL);
                let caption = format!("found path of length {}", path.length());
                self.draw(&canvas, &caption);
            }
            SearchOutcome::Exhausted { expanded } => {
                let caption = format!("no path after {} expansions", expanded);
                self.draw(&canvas, &caption);
            }
            SearchOutcome::Aborted { expanded } => {
                let caption = format!("gave up after {} expansions", expanded);
                self.draw(&canvas, &caption);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AStar, SearchConfig, SearchError};

    #[test]
    fn canvas_draws_obstacles() {
        let mut grid = Grid::new(3, 2);
        grid.set_blocked(Point::new(1, 0), true);
        let mut canvas = Canvas::new(&grid);
        canvas.mark(Point::new(2, 1), GOAL);
        canvas.mark(Point::new(7, 7), START);
        assert_eq!(canvas.to_string(), ".#.\n..G\n");
        assert_eq!(grid.to_string(), ".#.\n...\n");
    }

    #[test]
    fn renderer_draws_final_path() {
        let mut grid = Grid::new(3, 3);
        grid.set_blocked(Point::new(1, 1), true);
        grid.set_blocked(Point::new(1, 2), true);
        let mut renderer = TerminalRenderer::new(&grid, Vec::new());
        renderer.stride = 100;
        let mut astar = AStar::new();
        astar
            .search(&grid, Point::new(0, 2), Point::new(2, 2), &mut renderer)
            .unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        // Only the final frame is drawn with a stride this large.
        assert_eq!(output, "***\n*#*\nS#G\nfound path of length 6\n");
    }

    #[test]
    fn renderer_reports_exhaustion() {
        let mut grid = Grid::new(3, 1);
        grid.set_blocked(Point::new(1, 0), true);
        let mut renderer = TerminalRenderer::new(&grid, Vec::new());
        let mut astar = AStar::new();
        astar
            .search(&grid, Point::new(0, 0), Point::new(2, 0), &mut renderer)
            .unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.starts_with("S#G\nstep 1: current "));
        assert!(output.contains("open 0, closed 1\n"));
        assert!(output.ends_with("S#G\nno path after 1 expansions\n"));
    }

    #[test]
    fn renderer_draws_final_frame_when_budget_runs_out() {
        let grid = Grid::new(4, 1);
        let mut renderer = TerminalRenderer::new(&grid, Vec::new());
        renderer.stride = 100;
        let mut astar = AStar::with_config(SearchConfig {
            max_expansions: Some(2),
            ..SearchConfig::default()
        });
        let result = astar.search(&grid, Point::new(0, 0), Point::new(3, 0), &mut renderer);
        assert_eq!(result, Err(SearchError::BudgetExhausted { expanded: 2 }));
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(output, "....\ngave up after 2 expansions\n");
    }
}
