use crate::FxIndexSet;

/// The closed set: cells whose shortest cost is final. Keeps insertion order so that snapshots
/// list cells in the order they were expanded.
#[derive(Clone, Debug, Default)]
pub struct Visited {
    cells: FxIndexSet<usize>,
}

impl Visited {
    pub fn new() -> Visited {
        Visited::default()
    }

    /// Returns [false] if the cell was already visited.
    pub fn mark_visited(&mut self, ix: usize) -> bool {
        self.cells.insert(ix)
    }

    pub fn is_visited(&self, ix: usize) -> bool {
        self.cells.contains(&ix)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Visited cells in expansion order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }
}
