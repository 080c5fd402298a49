use crate::error::{Result, SearchError};
use crate::FxIndexMap;
use indexmap::map::Entry::{Occupied, Vacant};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Debug, PartialEq, Eq)]
struct SmallestCostHolder {
    estimated_cost: u32,
    heuristic: u32,
    index: usize,
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that the max-heap pops the smallest estimated cost first, then the smallest
        // heuristic (closest to the goal), then the smallest index.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// The open set, ordered by `(f, h)` ascending.
///
/// The live priority of every open cell is kept in an index map. Updating a cell pushes a fresh
/// heap entry; entries that no longer match the live priority are dropped when they surface, so
/// [extract_min](Self::extract_min) never returns a cell with a stale priority or returns a cell
/// twice.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<SmallestCostHolder>,
    open: FxIndexMap<usize, (u32, u32)>,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// Adds a cell or replaces its priority with the given `f` and `h`.
    pub fn insert(&mut self, ix: usize, f: u32, h: u32) {
        match self.open.entry(ix) {
            Occupied(mut e) => {
                if *e.get() == (f, h) {
                    return;
                }
                e.insert((f, h));
            }
            Vacant(e) => {
                e.insert((f, h));
            }
        }
        self.heap.push(SmallestCostHolder {
            estimated_cost: f,
            heuristic: h,
            index: ix,
        });
    }

    /// Removes and returns the open cell with the smallest `f`, ties broken by smallest `h`.
    pub fn extract_min(&mut self) -> Result<usize> {
        while let Some(SmallestCostHolder {
            estimated_cost,
            heuristic,
            index,
        }) = self.heap.pop()
        {
            if self.open.get(&index) == Some(&(estimated_cost, heuristic)) {
                self.open.swap_remove(&index);
                return Ok(index);
            }
        }
        Err(SearchError::EmptyFrontier)
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn contains(&self, ix: usize) -> bool {
        self.open.contains_key(&ix)
    }

    /// Live `(f, h)` of an open cell.
    pub fn priority(&self, ix: usize) -> Option<(u32, u32)> {
        self.open.get(&ix).copied()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.open.clear();
    }

    /// Open cells, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.open.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_by_f_then_h() {
        let mut frontier = Frontier::new();
        frontier.insert(0, 6, 2);
        frontier.insert(1, 5, 4);
        frontier.insert(2, 5, 1);
        frontier.insert(3, 7, 0);
        assert_eq!(frontier.len(), 4);
        assert_eq!(frontier.extract_min(), Ok(2));
        assert_eq!(frontier.extract_min(), Ok(1));
        assert_eq!(frontier.extract_min(), Ok(0));
        assert_eq!(frontier.extract_min(), Ok(3));
        assert!(frontier.is_empty());
    }

    #[test]
    fn empty_extraction_fails() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.extract_min(), Err(SearchError::EmptyFrontier));
        frontier.insert(9, 1, 1);
        frontier.clear();
        assert_eq!(frontier.extract_min(), Err(SearchError::EmptyFrontier));
    }

    /// Re-inserting a cell replaces its priority instead of adding a duplicate.
    #[test]
    fn update_replaces_priority() {
        let mut frontier = Frontier::new();
        frontier.insert(0, 10, 2);
        frontier.insert(1, 8, 3);
        frontier.insert(0, 6, 2);
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.priority(0), Some((6, 2)));
        assert_eq!(frontier.extract_min(), Ok(0));
        assert_eq!(frontier.extract_min(), Ok(1));
        // The stale (10, 2) entry for cell 0 must not resurface.
        assert_eq!(frontier.extract_min(), Err(SearchError::EmptyFrontier));
    }

    #[test]
    fn raised_priority_is_respected() {
        let mut frontier = Frontier::new();
        frontier.insert(0, 3, 1);
        frontier.insert(1, 4, 1);
        frontier.insert(0, 5, 1);
        assert_eq!(frontier.extract_min(), Ok(1));
        assert_eq!(frontier.extract_min(), Ok(0));
        assert!(!frontier.contains(0));
    }

    #[test]
    fn equal_priorities_pop_lowest_index() {
        let mut frontier = Frontier::new();
        for ix in [5, 3, 8] {
            frontier.insert(ix, 2, 2);
        }
        let mut open = frontier.iter().collect::<Vec<_>>();
        open.sort();
        assert_eq!(open, vec![3, 5, 8]);
        assert_eq!(frontier.extract_min(), Ok(3));
        assert_eq!(frontier.extract_min(), Ok(5));
        assert_eq!(frontier.extract_min(), Ok(8));
    }
}
