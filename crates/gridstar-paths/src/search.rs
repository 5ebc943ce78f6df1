//! The A* search loop.

use std::fmt;

use gridstar_core::{CellId, Grid, GridError, Position, Status};

use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::reconstruct::{CameFrom, reconstruct};

/// What a step callback wants the search to do next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Cancel,
}

/// A path found by [`search`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    positions: Vec<Position>,
    cost: u32,
    expanded: usize,
}

impl Path {
    /// Every position on the path, start first, end last.
    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of steps from start to end.
    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Number of positions on the path, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    #[inline]
    pub fn end(&self) -> Option<Position> {
        self.positions.last().copied()
    }

    /// How many cells were popped from the frontier to find this path.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }
}

/// Why a search produced no path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start or end lies outside the grid.
    Grid(GridError),
    /// Start and end are the same cell.
    SameEndpoints(Position),
    /// The start or end is a barrier.
    BlockedEndpoint(Position),
    /// The frontier ran dry before reaching the end.
    NoPathExists,
    /// The step callback asked to stop.
    Cancelled,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "search: {e}"),
            Self::SameEndpoints(p) => write!(f, "search: start and end are both {p}"),
            Self::BlockedEndpoint(p) => write!(f, "search: endpoint {p} is a barrier"),
            Self::NoPathExists => f.write_str("search: no path exists"),
            Self::Cancelled => f.write_str("search: cancelled"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Per-call bookkeeping, dropped when the search returns.
struct SearchState {
    g_score: Vec<Option<u32>>,
    f_score: Vec<Option<u32>>,
    came_from: CameFrom,
    frontier: Frontier,
}

impl SearchState {
    fn new(cells: usize) -> Self {
        Self {
            g_score: vec![None; cells],
            f_score: vec![None; cells],
            came_from: CameFrom::new(cells),
            frontier: Frontier::new(cells),
        }
    }
}

/// Find a shortest path from `start` to `end`.
///
/// Same as [`search_with`] with a callback that never cancels.
pub fn search(grid: &mut Grid, start: Position, end: Position) -> Result<Path, SearchError> {
    search_with(grid, start, end, |_| Step::Continue)
}

/// Find a shortest path from `start` to `end`, calling `on_step` after
/// every expansion.
///
/// [`Grid::derive_adjacency`] must have been called since the last barrier
/// edit. While searching, newly discovered cells are marked
/// [`Status::Open`] and expanded cells [`Status::Closed`]; the start and end
/// are never marked either way. On success the interior of the path is
/// marked [`Status::Path`] and the end cell [`Status::End`].
///
/// `on_step` sees the grid after each expansion (before the expanded cell
/// is closed) and may return [`Step::Cancel`] to stop the search, leaving
/// the marks made so far in place.
pub fn search_with<F>(
    grid: &mut Grid,
    start: Position,
    end: Position,
    mut on_step: F,
) -> Result<Path, SearchError>
where
    F: FnMut(&Grid) -> Step,
{
    let start_id = grid.id_of(start)?;
    let end_id = grid.id_of(end)?;
    if start_id == end_id {
        return Err(SearchError::SameEndpoints(start));
    }
    for (id, p) in [(start_id, start), (end_id, end)] {
        if grid.cell(id).is_barrier() {
            return Err(SearchError::BlockedEndpoint(p));
        }
    }

    log::debug!("search {start} -> {end} on {0}x{0} grid", grid.rows());

    let mut state = SearchState::new(grid.len());
    state.g_score[start_id.index()] = Some(0);
    state.f_score[start_id.index()] = Some(manhattan(start, end));
    state.frontier.push(start_id, manhattan(start, end));

    let mut expanded = 0;
    while !state.frontier.is_empty() {
        let current = match state.frontier.pop_min() {
            Ok(id) => id,
            Err(e) => unreachable!("{e} under a non-empty guard"),
        };
        expanded += 1;

        if current == end_id {
            let positions = reconstruct(grid, &state.came_from, end_id);
            grid.cell_mut(end_id).set_status(Status::End);
            let cost = state.g_score[end_id.index()].unwrap_or_default();
            log::debug!("search found path of cost {cost} after {expanded} expansions");
            return Ok(Path {
                positions,
                cost,
                expanded,
            });
        }

        relax_neighbors(grid, &mut state, current, start_id, end_id);

        if on_step(&*grid) == Step::Cancel {
            log::debug!("search cancelled after {expanded} expansions");
            return Err(SearchError::Cancelled);
        }

        if current != start_id {
            grid.cell_mut(current).set_status(Status::Closed);
        }
    }

    log::debug!("search exhausted the frontier after {expanded} expansions");
    Err(SearchError::NoPathExists)
}

/// Try every neighbour of `current` as a cheaper route, pushing newly
/// improved cells that are not already waiting in the frontier.
///
/// A cell already in the frontier keeps its original queue position even
/// when its score improves.
fn relax_neighbors(
    grid: &mut Grid,
    state: &mut SearchState,
    current: CellId,
    start: CellId,
    end: CellId,
) {
    let Some(current_g) = state.g_score[current.index()] else {
        return;
    };
    let end_pos = grid.cell(end).position();
    let tentative_g = current_g + 1;

    log::trace!(
        "expand {} (g = {current_g}, f = {})",
        grid.cell(current).position(),
        state.f_score[current.index()].unwrap_or_default()
    );

    for i in 0..grid.cell(current).neighbors().len() {
        let n = grid.cell(current).neighbors()[i];
        let ni = n.index();
        if state.g_score[ni].is_some_and(|g| tentative_g >= g) {
            continue;
        }
        let f = tentative_g + manhattan(grid.cell(n).position(), end_pos);
        state.came_from.insert(n, current);
        state.g_score[ni] = Some(tentative_g);
        state.f_score[ni] = Some(f);
        if !state.frontier.contains(n) {
            state.frontier.push(n, f);
            if n != start && n != end {
                grid.cell_mut(n).set_status(Status::Open);
            }
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        let mut g = Grid::create(3, 3);
        g.derive_adjacency();
        let path = search(&mut g, Position::new(0, 0), Position::new(2, 1)).unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }
}
