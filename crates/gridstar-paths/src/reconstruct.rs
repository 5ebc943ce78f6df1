//! Walking predecessor links back from the goal.

use gridstar_core::{CellId, Grid, Position, Status};

/// Best-known predecessor of each cell, indexed by [`CellId`].
///
/// Cells with no entry are either the start or were never reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CameFrom {
    parents: Vec<Option<CellId>>,
}

impl CameFrom {
    /// An empty map for a grid of `cells` cells.
    pub fn new(cells: usize) -> Self {
        Self {
            parents: vec![None; cells],
        }
    }

    /// Record `parent` as the predecessor of `id`.
    #[inline]
    pub fn insert(&mut self, id: CellId, parent: CellId) {
        if let Some(slot) = self.parents.get_mut(id.index()) {
            *slot = Some(parent);
        }
    }

    #[inline]
    pub fn get(&self, id: CellId) -> Option<CellId> {
        self.parents.get(id.index()).copied().flatten()
    }
}

/// Rebuild the path ending at `end` and mark its interior cells
/// [`Status::Path`].
///
/// Returns positions in start-to-end order, both endpoints included. The
/// endpoints keep their status and `came_from` is only read, so calling
/// this again with the same map gives the same result.
pub fn reconstruct(grid: &mut Grid, came_from: &CameFrom, end: CellId) -> Vec<Position> {
    let mut path = vec![grid.cell(end).position()];
    let mut current = end;
    // A chain longer than the grid means the map has a cycle.
    for _ in 0..grid.len() {
        let Some(prev) = came_from.get(current) else {
            break;
        };
        if came_from.get(prev).is_some() {
            grid.cell_mut(prev).set_status(Status::Path);
        }
        path.push(grid.cell(prev).position());
        current = prev;
    }
    path.reverse();
    path
}
