//! The [`Grid`] type — a fixed `rows × rows` square of [`Cell`]s.
//!
//! Cells live in one row-major `Vec`; adjacency is stored as [`CellId`]
//! indices into it, so a grid never owns cyclic references to itself.

use std::fmt;

use crate::cell::{Cell, CellId, Status};
use crate::geom::Position;

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors raised by grid lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The position lies outside `[0, rows) × [0, rows)`.
    OutOfBounds { position: Position, rows: usize },
    /// A point on the drawing surface lies outside the grid.
    OutsideSurface { x: usize, y: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { position, rows } => {
                write!(f, "position {position} is outside a {rows}x{rows} grid")
            }
            Self::OutsideSurface { x, y } => {
                write!(f, "surface point ({x}, {y}) is outside the grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A square grid of cells addressable by [`Position`].
///
/// `rows` is fixed at construction. `size` is the extent of the caller's
/// drawing surface (pixels, terminal columns, ...) and only matters for
/// [`cell_size`](Grid::cell_size) and [`position_at`](Grid::position_at).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a `rows × rows` grid of empty cells.
    pub fn create(rows: usize, size: usize) -> Self {
        let cells = (0..rows * rows)
            .map(|i| Cell::new(Position::new(i / rows, i % rows)))
            .collect();
        Self { rows, size, cells }
    }

    /// A brand-new grid with the same dimensions and nothing marked.
    pub fn cleared(&self) -> Self {
        Self::create(self.rows, self.size)
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Extent of the drawing surface this grid was created for.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Extent of one cell on the drawing surface, never zero.
    #[inline]
    pub fn cell_size(&self) -> usize {
        if self.rows == 0 {
            return self.size.max(1);
        }
        (self.size / self.rows).max(1)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        p.in_square(self.rows)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Storage index of the cell at `p`.
    pub fn id_of(&self, p: Position) -> Result<CellId, GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds {
                position: p,
                rows: self.rows,
            });
        }
        Ok(CellId(p.row * self.rows + p.col))
    }

    /// The cell at `p`.
    pub fn cell_at(&self, p: Position) -> Result<&Cell, GridError> {
        let id = self.id_of(p)?;
        Ok(&self.cells[id.0])
    }

    /// Mutable access to the cell at `p`.
    pub fn cell_at_mut(&mut self, p: Position) -> Result<&mut Cell, GridError> {
        let id = self.id_of(p)?;
        Ok(&mut self.cells[id.0])
    }

    /// The cell with storage index `id`.
    ///
    /// Ids come from this grid's own [`id_of`](Self::id_of) or adjacency
    /// lists; an id from another grid may panic.
    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    #[inline]
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Map a point on the drawing surface to the position under it.
    pub fn position_at(&self, x: usize, y: usize) -> Result<Position, GridError> {
        let gap = self.cell_size();
        let p = Position::new(y / gap, x / gap);
        if !self.contains(p) {
            return Err(GridError::OutsideSurface { x, y });
        }
        Ok(p)
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Position currently marked [`Status::Start`], if any.
    pub fn start(&self) -> Option<Position> {
        self.find(Status::Start)
    }

    /// Position currently marked [`Status::End`], if any.
    pub fn end(&self) -> Option<Position> {
        self.find(Status::End)
    }

    fn find(&self, status: Status) -> Option<Position> {
        self.cells
            .iter()
            .find(|c| c.status() == status)
            .map(Cell::position)
    }

    /// Mark `p` as the start, demoting any previous start to empty.
    pub fn set_start(&mut self, p: Position) -> Result<(), GridError> {
        self.set_unique(p, Status::Start)
    }

    /// Mark `p` as the end, demoting any previous end to empty.
    pub fn set_end(&mut self, p: Position) -> Result<(), GridError> {
        self.set_unique(p, Status::End)
    }

    fn set_unique(&mut self, p: Position, status: Status) -> Result<(), GridError> {
        let id = self.id_of(p)?;
        for cell in self.cells.iter_mut().filter(|c| c.status() == status) {
            cell.reset();
        }
        self.cells[id.0].set_status(status);
        Ok(())
    }

    /// Mark `p` as a barrier. Adjacency is stale until the next
    /// [`derive_adjacency`](Self::derive_adjacency).
    pub fn set_barrier(&mut self, p: Position) -> Result<(), GridError> {
        self.cell_at_mut(p)?.set_status(Status::Barrier);
        Ok(())
    }

    /// Reset the cell at `p` to empty.
    pub fn reset_at(&mut self, p: Position) -> Result<(), GridError> {
        self.cell_at_mut(p)?.reset();
        Ok(())
    }

    /// Reset every open, closed and path cell to empty, leaving the start,
    /// end and barriers alone.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.status().is_search_mark() {
                cell.reset();
            }
        }
    }

    /// Number of cells with the given status.
    pub fn count(&self, status: Status) -> usize {
        self.cells.iter().filter(|c| c.status() == status).count()
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Recompute every cell's neighbour list: the in-bounds axis-aligned
    /// cells that are not barriers, in down, up, right, left order.
    ///
    /// Must be called after barrier edits and before each search.
    pub fn derive_adjacency(&mut self) {
        let rows = self.rows;
        for i in 0..self.cells.len() {
            let p = self.cells[i].position();
            let neighbors: Vec<CellId> = p
                .neighbors_4(rows)
                .map(|n| CellId(n.row * rows + n.col))
                .filter(|id| !self.cells[id.0].is_barrier())
                .collect();
            self.cells[i].neighbors = neighbors;
        }
        log::debug!("derived adjacency for {rows}x{rows} grid");
    }
}
