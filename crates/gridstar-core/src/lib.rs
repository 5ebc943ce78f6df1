//! **gridstar-core** — the grid model behind gridstar's A* search.
//!
//! A [`Grid`] is a fixed square of [`Cell`]s. Each cell carries a
//! [`Status`] tag that editors write (start, end, barrier) and the search
//! writes (open, closed, path); renderers only read it. Adjacency between
//! cells is stored as [`CellId`] indices and recomputed explicitly with
//! [`Grid::derive_adjacency`].

pub mod cell;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, CellId, Status};
pub use geom::Position;
pub use grid::{Grid, GridError};
pub use layout::LayoutError;
