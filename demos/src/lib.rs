//! Editor model and configuration for the `gridstar` terminal demo.
//!
//! The [`Editor`] holds the grid and applies the click/key rules; the
//! binary only shuttles terminal input into it and draws the result.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use gridstar_core::{Grid, LayoutError, Position, Status};
use gridstar_paths::{Path, SearchError, Step};
use gridstar_crossterm::MAX_ROWS;
use rand::{Rng, RngExt};

pub const DEFAULT_ROWS: usize = 25;

pub const USAGE: &str = "\
Usage: gridstar [--rows N] [--delay-ms N] [--density P] [--seed N] [--layout FILE] [--no-mouse]

Mouse:   left click places start, then end, then barriers; right click erases
Keys:    space  search          c  clear grid
         r      random barriers q / esc  quit (or cancel a running search)";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Demo settings, filled from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    /// Rows (and columns) of a fresh grid. Ignored when `layout` is set.
    pub rows: usize,
    /// Pause after each expansion so the search is watchable.
    pub step_delay: Duration,
    pub mouse: bool,
    /// Chance that `r` turns an empty cell into a barrier.
    pub density: f64,
    /// Seed for barrier scattering; random when absent.
    pub seed: Option<u64>,
    /// Initial grid in layout text.
    pub layout: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            step_delay: Duration::from_millis(10),
            mouse: true,
            density: 0.3,
            seed: None,
            layout: None,
        }
    }
}

/// Errors from reading the command line or the initial layout.
#[derive(Debug)]
pub enum ConfigError {
    /// `--help` was given.
    Help,
    UnknownFlag(String),
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, value: String },
    Io { path: PathBuf, source: std::io::Error },
    Layout { path: PathBuf, source: LayoutError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str("help requested"),
            Self::UnknownFlag(flag) => write!(f, "unknown flag {flag}"),
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::InvalidValue { flag, value } => write!(f, "invalid value {value:?} for {flag}"),
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Layout { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Layout { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn parse_value<T: std::str::FromStr>(
    flag: &'static str,
    value: Option<String>,
) -> Result<T, ConfigError> {
    let value = value.ok_or(ConfigError::MissingValue(flag))?;
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { flag, value })
}

impl DemoConfig {
    /// Build a config from command-line arguments (program name excluded).
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--rows" => {
                    config.rows = parse_value("--rows", args.next())?;
                    if !(2..=MAX_ROWS as usize).contains(&config.rows) {
                        return Err(ConfigError::InvalidValue {
                            flag: "--rows",
                            value: config.rows.to_string(),
                        });
                    }
                }
                "--delay-ms" => {
                    config.step_delay = Duration::from_millis(parse_value("--delay-ms", args.next())?);
                }
                "--density" => {
                    config.density = parse_value("--density", args.next())?;
                    if !(0.0..=1.0).contains(&config.density) {
                        return Err(ConfigError::InvalidValue {
                            flag: "--density",
                            value: config.density.to_string(),
                        });
                    }
                }
                "--seed" => config.seed = Some(parse_value("--seed", args.next())?),
                "--layout" => {
                    let path: String = parse_value("--layout", args.next())?;
                    config.layout = Some(PathBuf::from(path));
                }
                "--no-mouse" => config.mouse = false,
                "-h" | "--help" => return Err(ConfigError::Help),
                _ => return Err(ConfigError::UnknownFlag(arg)),
            }
        }
        Ok(config)
    }

    /// The grid the demo starts with: the layout file if one was given,
    /// otherwise an empty `rows × rows` grid.
    pub fn initial_grid(&self) -> Result<Grid, ConfigError> {
        let Some(path) = &self.layout else {
            return Ok(Grid::create(self.rows, self.rows));
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        // One surface unit per cell: the terminal maps columns itself.
        let rows = text.trim().lines().count();
        Grid::from_layout(&text, rows).map_err(|source| ConfigError::Layout {
            path: path.clone(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// The grid being edited, plus the editing rules.
pub struct Editor {
    grid: Grid,
}

impl Editor {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Main-button rule: the first click places the start, the second the
    /// end, later clicks barriers. Start and end are never overwritten.
    pub fn place(&mut self, p: Position) {
        let Ok(cell) = self.grid.cell_at(p) else {
            return;
        };
        let status = cell.status();
        if matches!(status, Status::Start | Status::End) {
            return;
        }
        let result = if self.grid.start().is_none() {
            self.grid.set_start(p)
        } else if self.grid.end().is_none() {
            self.grid.set_end(p)
        } else {
            self.grid.set_barrier(p)
        };
        if let Err(e) = result {
            log::warn!("place at {p}: {e}");
        }
    }

    /// Secondary-button rule: reset the cell, forgetting it as start or end.
    pub fn erase(&mut self, p: Position) {
        if let Err(e) = self.grid.reset_at(p) {
            log::warn!("erase at {p}: {e}");
        }
    }

    /// Replace the grid with a blank one of the same size.
    pub fn clear(&mut self) {
        self.grid = self.grid.cleared();
    }

    /// Turn each empty cell into a barrier with probability `density`.
    pub fn scatter(&mut self, rng: &mut impl Rng, density: f64) {
        let empty: Vec<Position> = self
            .grid
            .cells()
            .filter(|c| c.status() == Status::Empty)
            .map(|c| c.position())
            .collect();
        let mut placed = 0;
        for p in empty {
            if rng.random_bool(density) && self.grid.set_barrier(p).is_ok() {
                placed += 1;
            }
        }
        log::debug!("scattered {placed} barriers");
    }

    /// Wipe marks from any previous run, derive adjacency and search from
    /// the start to the end.
    ///
    /// Returns `None` while the start or end is missing.
    pub fn run<F>(&mut self, on_step: F) -> Option<Result<Path, SearchError>>
    where
        F: FnMut(&Grid) -> Step,
    {
        let start = self.grid.start()?;
        let end = self.grid.end()?;
        self.grid.clear_search_marks();
        self.grid.derive_adjacency();
        Some(gridstar_paths::search_with(&mut self.grid, start, end, on_step))
    }
}

/// One-line description of a search result for the status line.
pub fn summary(result: &Option<Result<Path, SearchError>>) -> String {
    match result {
        None => "place a start and an end first".to_string(),
        Some(Ok(path)) => format!(
            "path of {} steps, {} cells expanded",
            path.cost(),
            path.expanded()
        ),
        Some(Err(SearchError::NoPathExists)) => "no path exists".to_string(),
        Some(Err(SearchError::Cancelled)) => "search cancelled".to_string(),
        Some(Err(e)) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn default_config() {
        let c = DemoConfig::from_args(Vec::new()).unwrap();
        assert_eq!(c, DemoConfig::default());
        assert_eq!(c.rows, DEFAULT_ROWS);
        assert!(c.mouse);
    }

    #[test]
    fn parse_all_flags() {
        let c = DemoConfig::from_args(args(
            "--rows 12 --delay-ms 0 --density 0.5 --seed 9 --layout maze.txt --no-mouse",
        ))
        .unwrap();
        assert_eq!(c.rows, 12);
        assert_eq!(c.step_delay, Duration::ZERO);
        assert_eq!(c.density, 0.5);
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.layout, Some(PathBuf::from("maze.txt")));
        assert!(!c.mouse);
    }

    #[test]
    fn reject_bad_flags() {
        assert!(matches!(
            DemoConfig::from_args(args("--rows")),
            Err(ConfigError::MissingValue("--rows"))
        ));
        assert!(matches!(
            DemoConfig::from_args(args("--rows ten")),
            Err(ConfigError::InvalidValue { flag: "--rows", .. })
        ));
        assert!(matches!(
            DemoConfig::from_args(args("--rows 1")),
            Err(ConfigError::InvalidValue { flag: "--rows", .. })
        ));
        assert!(matches!(
            DemoConfig::from_args(args("--density 1.5")),
            Err(ConfigError::InvalidValue { flag: "--density", .. })
        ));
        assert!(matches!(
            DemoConfig::from_args(args("--fast")),
            Err(ConfigError::UnknownFlag(f)) if f == "--fast"
        ));
        assert!(matches!(
            DemoConfig::from_args(args("--help")),
            Err(ConfigError::Help)
        ));
    }

    #[test]
    fn rows_capped_to_terminal_coordinates() {
        let max = MAX_ROWS as usize;
        let c = DemoConfig::from_args(args(&format!("--rows {max}"))).unwrap();
        assert_eq!(c.rows, max);
        let err = DemoConfig::from_args(args(&format!("--rows {}", max + 1))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { flag: "--rows", .. }));
        assert!(DemoConfig::from_args(args("--rows 70000")).is_err());
    }

    #[test]
    fn missing_layout_file() {
        let c = DemoConfig {
            layout: Some(PathBuf::from("/nonexistent/gridstar/layout.txt")),
            ..DemoConfig::default()
        };
        let err = c.initial_grid().unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn clicks_place_start_end_then_barriers() {
        let mut ed = Editor::new(Grid::create(3, 3));
        ed.place(p(0, 0));
        ed.place(p(0, 0));
        ed.place(p(2, 2));
        ed.place(p(1, 1));
        ed.place(p(2, 2));
        assert_eq!(ed.grid().start(), Some(p(0, 0)));
        assert_eq!(ed.grid().end(), Some(p(2, 2)));
        assert_eq!(ed.grid().count(Status::Barrier), 1);
        assert_eq!(ed.grid().cell_at(p(1, 1)).unwrap().status(), Status::Barrier);
    }

    #[test]
    fn erasing_start_frees_the_next_click() {
        let mut ed = Editor::new(Grid::create(3, 3));
        ed.place(p(0, 0));
        ed.place(p(2, 2));
        ed.erase(p(0, 0));
        ed.place(p(1, 0));
        assert_eq!(ed.grid().start(), Some(p(1, 0)));
        ed.erase(p(9, 9));
    }

    #[test]
    fn run_needs_both_endpoints() {
        let mut ed = Editor::new(Grid::create(3, 3));
        ed.place(p(0, 0));
        let result = ed.run(|_| Step::Continue);
        assert!(result.is_none());
        assert_eq!(summary(&result), "place a start and an end first");
    }

    #[test]
    fn rerun_after_edit_uses_fresh_adjacency() {
        let mut ed = Editor::new(Grid::create(3, 3));
        ed.place(p(0, 1));
        ed.place(p(2, 1));
        let first = ed.run(|_| Step::Continue);
        assert_eq!(summary(&first), "path of 2 steps, 3 cells expanded");

        for col in 0..3 {
            ed.place(p(1, col));
        }
        let second = ed.run(|_| Step::Continue);
        assert_eq!(summary(&second), "no path exists");
        assert_eq!(ed.grid().count(Status::Path), 0);
    }

    #[test]
    fn cancelled_run_is_reported() {
        let mut ed = Editor::new(Grid::create(5, 5));
        ed.place(p(0, 0));
        ed.place(p(4, 4));
        let result = ed.run(|_| Step::Cancel);
        assert_eq!(summary(&result), "search cancelled");
    }

    #[test]
    fn scatter_spares_endpoints() {
        let mut ed = Editor::new(Grid::create(10, 10));
        ed.place(p(0, 0));
        ed.place(p(9, 9));
        let mut rng = StdRng::seed_from_u64(3);
        ed.scatter(&mut rng, 1.0);
        assert_eq!(ed.grid().count(Status::Barrier), 98);
        assert_eq!(ed.grid().start(), Some(p(0, 0)));
        assert_eq!(ed.grid().end(), Some(p(9, 9)));
    }

    #[test]
    fn clear_replaces_grid() {
        let mut ed = Editor::new(Grid::create(4, 4));
        ed.place(p(0, 0));
        ed.place(p(3, 3));
        ed.place(p(1, 1));
        ed.clear();
        assert_eq!(ed.grid().count(Status::Empty), 16);
        assert_eq!(ed.grid().rows(), 4);
    }
}
