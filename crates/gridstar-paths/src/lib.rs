//! A* shortest-path search over a [`gridstar_core::Grid`].
//!
//! - **Heuristic**: [`manhattan`] distance, admissible for four-way unit steps
//! - **Frontier**: [`Frontier`], a min-heap on `(f_score, insertion order)`
//! - **Search**: [`search`] / [`search_with`], which mark cells open and
//!   closed as they go and report each expansion to an optional callback
//! - **Reconstruction**: [`reconstruct`], following [`CameFrom`] links back
//!   from the goal
//!
//! Search state lives only for the duration of one call; the grid's cell
//! statuses are the only thing left behind.

mod distance;
mod frontier;
mod reconstruct;
mod search;

pub use distance::manhattan;
pub use frontier::{EmptyFrontier, Frontier};
pub use reconstruct::{CameFrom, reconstruct};
pub use search::{Path, SearchError, Step, search, search_with};
