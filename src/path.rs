use crate::cost::CostState;
use crate::grid::Grid;
use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;
use log::info;

/// A cell on a reconstructed path together with the costs it was finalized with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStep {
    pub point: Point,
    pub g: u32,
    pub h: u32,
    pub f: u32,
}

/// A path from start to goal, both inclusive. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// Follows the parent links from `goal` back to the start and reverses the result.
    pub(crate) fn reconstruct(grid: &Grid, costs: &CostState, goal: usize) -> Path {
        let mut steps = std::iter::successors(Some(goal), |&ix| {
            costs.get(ix).and_then(|record| record.parent)
        })
        .map(|ix| {
            let record = costs.get(ix).copied().unwrap_or_default();
            PathStep {
                point: grid.point(ix),
                g: record.g,
                h: record.h,
                f: record.f,
            }
        })
        .collect::<Vec<PathStep>>();
        steps.reverse();
        Path { steps }
    }

    /// Number of moves, so a path that starts on the goal has length 0.
    pub fn length(&self) -> usize {
        self.steps.len() - 1
    }

    /// Total cost of the path. Equals [length](Self::length) under unit edge costs.
    pub fn cost(&self) -> u32 {
        self.steps[self.steps.len() - 1].g
    }

    pub fn start(&self) -> Point {
        self.steps[0].point
    }

    pub fn goal(&self) -> Point {
        self.steps[self.steps.len() - 1].point
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn points(&self) -> Vec<Point> {
        self.steps.iter().map(|step| step.point).collect()
    }

    /// Checks that consecutive cells are 4-adjacent and that no cell on the path is blocked.
    pub fn is_contiguous(&self, grid: &Grid) -> bool {
        self.steps.iter().all(|step| !grid.is_blocked(step.point))
            && self
                .steps
                .iter()
                .tuple_windows()
                .all(|(a, b)| crate::heuristic(&a.point, &b.point) == 1)
    }

    /// Logs every step from the goal back to the start with its costs.
    pub fn report(&self) {
        info!("Backtracking {} steps from {}", self.length(), self.goal());
        for (i, step) in self.steps.iter().rev().enumerate() {
            info!(
                "#{} {}: f: {}, g: {}, h: {}",
                i, step.point, step.f, step.g, step.h
            );
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.steps.iter().map(|step| step.point).join(" -> "))
    }
}
