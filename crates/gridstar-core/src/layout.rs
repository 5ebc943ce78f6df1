//! Grids written as text.
//!
//! One character per cell, one line per row, using the characters of
//! [`Status::to_char`]:
//!
//! ```text
//! S..
//! ###
//! ..E
//! ```

use std::fmt;

use crate::cell::{CellId, Status};
use crate::geom::Position;
use crate::grid::Grid;

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Nothing left after trimming.
    Empty,
    /// Lines have inconsistent widths.
    InconsistentSize { line: usize },
    /// Width and line count differ.
    NotSquare { width: usize, height: usize },
    /// A character with no status meaning.
    InvalidChar { ch: char, position: Position },
    /// A second start or end.
    DuplicateEndpoint { status: Status, position: Position },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: empty"),
            Self::InconsistentSize { line } => {
                write!(f, "layout: line {line} has a different width")
            }
            Self::NotSquare { width, height } => {
                write!(f, "layout: {width} columns but {height} lines")
            }
            Self::InvalidChar { ch, position } => {
                write!(f, "layout: invalid character \u{201c}{ch}\u{201d} at {position}")
            }
            Self::DuplicateEndpoint { status, position } => {
                write!(f, "layout: second {status} at {position}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

impl Grid {
    /// Parse a square layout into a fresh grid created for a drawing surface
    /// of extent `size`.
    ///
    /// Leading/trailing whitespace is trimmed from the whole text and from
    /// each line. Adjacency is not derived.
    pub fn from_layout(text: &str, size: usize) -> Result<Grid, LayoutError> {
        let lines: Vec<&str> = text.trim().lines().map(str::trim).collect();
        if lines.iter().all(|l| l.is_empty()) {
            return Err(LayoutError::Empty);
        }
        let width = lines[0].chars().count();
        if let Some(line) = lines.iter().position(|l| l.chars().count() != width) {
            return Err(LayoutError::InconsistentSize { line });
        }
        if width != lines.len() {
            return Err(LayoutError::NotSquare {
                width,
                height: lines.len(),
            });
        }

        let mut grid = Grid::create(width, size);
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let position = Position::new(row, col);
                let status =
                    Status::from_char(ch).ok_or(LayoutError::InvalidChar { ch, position })?;
                if matches!(status, Status::Start | Status::End) && grid.count(status) > 0 {
                    return Err(LayoutError::DuplicateEndpoint { status, position });
                }
                grid.cell_mut(CellId(row * width + col)).set_status(status);
            }
        }
        Ok(grid)
    }

    /// Render the current statuses as layout text, one line per row.
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(self.len() + self.rows());
        for (i, cell) in self.cells().enumerate() {
            if i > 0 && i % self.rows() == 0 {
                out.push('\n');
            }
            out.push(cell.status().to_char());
        }
        out
    }
}
