//! Grid coordinates: [`Position`].

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A `(row, col)` grid coordinate. Rows grow down, columns grow right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the position lies inside a `rows × rows` square.
    #[inline]
    pub const fn in_square(self, rows: usize) -> bool {
        self.row < rows && self.col < rows
    }

    /// The in-bounds axis-aligned neighbours of `self` inside a
    /// `rows × rows` square, in the order down, up, right, left.
    ///
    /// The order is part of the contract: adjacency lists are built from it,
    /// and the search expands neighbours in adjacency order.
    pub fn neighbors_4(self, rows: usize) -> impl Iterator<Item = Position> {
        let Self { row, col } = self;
        let down = (row + 1 < rows).then(|| Self::new(row + 1, col));
        let up = row.checked_sub(1).map(|r| Self::new(r, col));
        let right = (col + 1 < rows).then(|| Self::new(row, col + 1));
        let left = col.checked_sub(1).map(|c| Self::new(row, c));
        [down, up, right, left].into_iter().flatten()
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn position_round_trip() {
        let p = Position::new(3, 7);
        let json = serde_json::to_string(&p).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
