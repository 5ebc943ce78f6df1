//! The [`Cell`] type — one grid location with a [`Status`] tag.

use std::fmt;

use crate::geom::Position;

/// What a cell currently is, as far as editing and searching go.
///
/// Renderers read this tag and decide how to draw it; nothing here knows
/// about colours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    /// Discovered by the search, waiting in the frontier.
    Open,
    /// Expanded by the search.
    Closed,
    /// On the reconstructed path.
    Path,
}

impl Status {
    /// Every status, in declaration order.
    pub const ALL: [Status; 7] = [
        Status::Empty,
        Status::Start,
        Status::End,
        Status::Barrier,
        Status::Open,
        Status::Closed,
        Status::Path,
    ];

    /// Whether the status was written by a search (open, closed or path).
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Status::Open | Status::Closed | Status::Path)
    }

    /// Layout character for this status.
    pub const fn to_char(self) -> char {
        match self {
            Status::Empty => '.',
            Status::Start => 'S',
            Status::End => 'E',
            Status::Barrier => '#',
            Status::Open => 'o',
            Status::Closed => 'x',
            Status::Path => '*',
        }
    }

    /// Inverse of [`to_char`](Self::to_char).
    pub const fn from_char(ch: char) -> Option<Status> {
        Some(match ch {
            '.' => Status::Empty,
            'S' => Status::Start,
            'E' => Status::End,
            '#' => Status::Barrier,
            'o' => Status::Open,
            'x' => Status::Closed,
            '*' => Status::Path,
            _ => return None,
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Empty => "empty",
            Status::Start => "start",
            Status::End => "end",
            Status::Barrier => "barrier",
            Status::Open => "open",
            Status::Closed => "closed",
            Status::Path => "path",
        };
        f.write_str(name)
    }
}

/// Index of a cell in its grid's row-major storage.
///
/// Only a [`Grid`](crate::Grid) hands these out, through
/// [`Grid::id_of`](crate::Grid::id_of) and cell neighbour lists:
///
/// ```compile_fail
/// let id = gridstar_core::CellId(3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    /// The raw storage index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single grid location.
///
/// `neighbors` is derived by [`Grid::derive_adjacency`](crate::Grid::derive_adjacency)
/// and goes stale as soon as a barrier is edited; it is never refreshed
/// lazily.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    status: Status,
    pub(crate) neighbors: Vec<CellId>,
}

impl Cell {
    /// A fresh, empty cell at `position` with no adjacency.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            status: Status::Empty,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Overwrite the status. No check against the previous status is made;
    /// grid-level invariants (one start, one end) are the caller's business.
    #[inline]
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Back to [`Status::Empty`].
    #[inline]
    pub fn reset(&mut self) {
        self.status = Status::Empty;
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.status == Status::Barrier
    }

    /// Adjacent non-barrier cells as of the last adjacency pass.
    #[inline]
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_empty() {
        let c = Cell::new(Position::new(1, 2));
        assert_eq!(c.status(), Status::Empty);
        assert_eq!(c.position(), Position::new(1, 2));
        assert!(c.neighbors().is_empty());
    }

    #[test]
    fn set_status_overwrites_without_validation() {
        let mut c = Cell::new(Position::ZERO);
        c.set_status(Status::Start);
        c.set_status(Status::Barrier);
        assert!(c.is_barrier());
        c.reset();
        assert_eq!(c.status(), Status::Empty);
    }

    #[test]
    fn status_chars_round_trip() {
        for s in Status::ALL {
            assert_eq!(Status::from_char(s.to_char()), Some(s));
        }
        assert_eq!(Status::from_char('?'), None);
    }

    #[test]
    fn search_marks() {
        let marks: Vec<_> = Status::ALL
            .into_iter()
            .filter(|s| s.is_search_mark())
            .collect();
        assert_eq!(marks, vec![Status::Open, Status::Closed, Status::Path]);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        let json = serde_json::to_string(&Status::Barrier).unwrap();
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::Barrier);
    }
}
