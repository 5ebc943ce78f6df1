//! The A* open list.
//!
//! Cells are stored in a min-heap keyed by `(f_score, insertion_order)`.
//! Lower scores are popped first; ties go to the cell pushed earlier, so
//! expansion order never depends on hashing or heap internals.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use gridstar_core::CellId;

/// An entry in the frontier.
#[derive(Debug, PartialEq, Eq)]
struct Entry {
    f: u32,
    /// Monotonically increasing; lower = pushed earlier = wins ties.
    seq: u64,
    id: CellId,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap; this is the natural order.
        self.f.cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

/// Popping an empty [`Frontier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyFrontier;

impl fmt::Display for EmptyFrontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("pop from an empty frontier")
    }
}

impl std::error::Error for EmptyFrontier {}

/// Candidate cells not yet expanded, ordered by estimated total cost.
///
/// Membership is tracked alongside the heap so that
/// [`contains`](Self::contains) is a constant-time lookup.
#[derive(Debug)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    members: Vec<bool>,
    seq: u64,
}

impl Frontier {
    /// An empty frontier for a grid of `cells` cells.
    pub fn new(cells: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            members: vec![false; cells],
            seq: 0,
        }
    }

    /// Push `id` with score `f`, stamping it with the next sequence number.
    pub fn push(&mut self, id: CellId, f: u32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { f, seq, id }));
        if let Some(m) = self.members.get_mut(id.index()) {
            *m = true;
        }
    }

    /// Remove and return the cell with the smallest `(f, seq)` key.
    pub fn pop_min(&mut self) -> Result<CellId, EmptyFrontier> {
        let Reverse(entry) = self.heap.pop().ok_or(EmptyFrontier)?;
        if let Some(m) = self.members.get_mut(entry.id.index()) {
            *m = false;
        }
        Ok(entry.id)
    }

    /// Whether `id` is currently waiting in the frontier.
    #[inline]
    pub fn contains(&self, id: CellId) -> bool {
        self.members.get(id.index()).copied().unwrap_or(false)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstar_core::{Grid, Position};

    /// The id of cell `i` in a 4x4 grid.
    fn id(i: usize) -> CellId {
        Grid::create(4, 0).id_of(Position::new(i / 4, i % 4)).unwrap()
    }

    #[test]
    fn pops_lowest_score_first() {
        let mut q = Frontier::new(4);
        q.push(id(0), 3);
        q.push(id(1), 1);
        q.push(id(2), 2);

        assert_eq!(q.pop_min(), Ok(id(1)));
        assert_eq!(q.pop_min(), Ok(id(2)));
        assert_eq!(q.pop_min(), Ok(id(0)));
        assert_eq!(q.pop_min(), Err(EmptyFrontier));
    }

    #[test]
    fn ties_go_to_earliest_push() {
        let mut q = Frontier::new(8);
        q.push(id(7), 5);
        q.push(id(2), 5);
        q.push(id(5), 5);

        assert_eq!(q.pop_min(), Ok(id(7)));
        assert_eq!(q.pop_min(), Ok(id(2)));
        assert_eq!(q.pop_min(), Ok(id(5)));
    }

    #[test]
    fn membership_follows_push_and_pop() {
        let mut q = Frontier::new(3);
        assert!(!q.contains(id(1)));
        q.push(id(1), 0);
        assert!(q.contains(id(1)));
        assert_eq!(q.len(), 1);
        q.pop_min().unwrap();
        assert!(!q.contains(id(1)));
        assert!(q.is_empty());
    }

    #[test]
    fn foreign_ids_are_never_members() {
        let mut q = Frontier::new(2);
        q.push(id(10), 1);
        assert!(!q.contains(id(10)));
        assert_eq!(q.pop_min(), Ok(id(10)));
    }
}
