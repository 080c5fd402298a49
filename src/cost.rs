/// Search scratch of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostRecord {
    /// Cost of the best known path from the start.
    pub g: u32,
    /// Heuristic estimate of the remaining cost to the goal.
    pub h: u32,
    /// `g + h`, the value the frontier is ordered by.
    pub f: u32,
    /// Flat index of the predecessor on the best known path.
    pub parent: Option<usize>,
}

/// Per-cell cost overlay reused across search runs.
///
/// Every record carries the generation of the run that wrote it. Starting a new run bumps the
/// generation, which turns all records of earlier runs into unset ones without touching them.
#[derive(Clone, Debug, Default)]
pub struct CostState {
    records: Vec<CostRecord>,
    generations: Vec<u32>,
    generation: u32,
}

impl CostState {
    pub fn new() -> CostState {
        CostState::default()
    }

    /// Starts a new run over `cell_count` cells.
    pub fn reset(&mut self, cell_count: usize) {
        if self.records.len() != cell_count {
            self.records.clear();
            self.records.resize(cell_count, CostRecord::default());
            self.generations.clear();
            self.generations.resize(cell_count, 0);
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped around, stale tags could alias the new generation.
            self.generations.fill(0);
            self.generation = 1;
        }
    }

    /// The record written for `ix` during the current run, if any.
    pub fn get(&self, ix: usize) -> Option<&CostRecord> {
        if *self.generations.get(ix)? == self.generation {
            self.records.get(ix)
        } else {
            None
        }
    }

    pub fn g(&self, ix: usize) -> Option<u32> {
        self.get(ix).map(|record| record.g)
    }

    pub fn set(&mut self, ix: usize, record: CostRecord) {
        self.records[ix] = record;
        self.generations[ix] = self.generation;
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of cells the overlay is sized for.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
