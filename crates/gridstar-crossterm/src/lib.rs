//! Crossterm terminal front-end for gridstar.
//!
//! [`Terminal`] draws a [`Grid`] as coloured blocks, two columns per cell,
//! with a status line underneath, and translates crossterm events into
//! [`Input`]s. It only ever reads cell statuses.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridstar_core::{Grid, Position, Status};

/// Terminal columns used to draw one cell, so cells look roughly square.
pub const CELL_COLUMNS: u16 = 2;

/// Largest grid whose cells all have addressable terminal coordinates.
pub const MAX_ROWS: u16 = u16::MAX / CELL_COLUMNS;

/// `rows` as a terminal coordinate, or an error when a grid that size is
/// larger than [`MAX_ROWS`].
fn grid_extent(rows: usize) -> io::Result<u16> {
    u16::try_from(rows)
        .ok()
        .filter(|&r| r <= MAX_ROWS)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("a {rows}x{rows} grid does not fit a terminal"),
            )
        })
}

/// Remembers the last terminal size warned about, so a too-small terminal
/// is reported once per size instead of once per frame.
#[derive(Debug, Default)]
struct SizeWarning {
    last: Option<(u16, u16)>,
}

impl SizeWarning {
    /// Log if `actual` cannot hold `rows` rows of cells plus the status
    /// line and this size was not reported before. Returns whether it logged.
    fn check(&mut self, rows: u16, actual: (u16, u16)) -> bool {
        let needed = (rows * CELL_COLUMNS, rows + 1);
        if actual.0 >= needed.0 && actual.1 >= needed.1 {
            self.last = None;
            return false;
        }
        if self.last == Some(actual) {
            return false;
        }
        self.last = Some(actual);
        log::warn!(
            "terminal is {}x{}, a {rows}x{rows} grid needs {}x{}",
            actual.0,
            actual.1,
            needed.0,
            needed.1
        );
        true
    }
}

/// Maps a [`Status`] to the colour it is drawn with.
pub fn status_color(status: Status) -> CtColor {
    let (r, g, b) = match status {
        Status::Empty => (255, 255, 255),
        Status::Start => (255, 165, 0),
        Status::End => (64, 224, 208),
        Status::Barrier => (0, 0, 0),
        Status::Open => (0, 255, 0),
        Status::Closed => (255, 0, 0),
        Status::Path => (128, 0, 128),
    };
    CtColor::Rgb { r, g, b }
}

/// Mouse buttons the editor cares about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Main,
    Secondary,
}

/// A user action, in terminal coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// A printable key (space included).
    Char(char),
    Escape,
    /// A button pressed, or held while dragging, over a terminal cell.
    Mouse { button: Button, column: u16, row: u16 },
    /// The terminal changed size; everything should be redrawn.
    Resize,
}

/// Maps a crossterm event to an [`Input`], dropping what the editor
/// does not use.
fn to_input(ev: Event) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => match code {
            KeyCode::Char(c) => Some(Input::Char(c)),
            KeyCode::Esc => Some(Input::Escape),
            _ => None,
        },
        Event::Mouse(me) => {
            let button = match me.kind {
                MouseEventKind::Down(b) | MouseEventKind::Drag(b) => b,
                _ => return None,
            };
            let button = match button {
                MouseButton::Left => Button::Main,
                MouseButton::Right => Button::Secondary,
                MouseButton::Middle => return None,
            };
            Some(Input::Mouse {
                button,
                column: me.column,
                row: me.row,
            })
        }
        Event::Resize(..) => Some(Input::Resize),
        _ => None,
    }
}

/// Terminal settings.
#[derive(Clone, Debug)]
pub struct TerminalConfig {
    /// Capture mouse events.
    pub mouse: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self { mouse: true }
    }
}

/// A raw-mode, alternate-screen terminal. Restored on drop.
pub struct Terminal {
    config: TerminalConfig,
    out: io::Stdout,
    size_warning: SizeWarning,
}

impl Terminal {
    /// Switch the terminal into raw mode on the alternate screen.
    pub fn new(config: TerminalConfig) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if config.mouse {
            execute!(out, event::EnableMouseCapture)?;
        }
        Ok(Self {
            config,
            out,
            size_warning: SizeWarning::default(),
        })
    }

    /// Wait up to `timeout` for the next input. Events the editor has no
    /// use for are swallowed and reported as `None`.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(to_input(event::read()?))
    }

    /// The grid position under a terminal cell, if any.
    pub fn position_under(grid: &Grid, column: u16, row: u16) -> Option<Position> {
        let p = Position::new(row as usize, (column / CELL_COLUMNS) as usize);
        grid.contains(p).then_some(p)
    }

    /// Draw every cell of `grid`, then `status` on the line below it.
    pub fn draw(&mut self, grid: &Grid, status: &str) -> io::Result<()> {
        let rows = grid_extent(grid.rows())?;
        self.size_warning.check(rows, terminal::size()?);

        let blank = " ".repeat(CELL_COLUMNS as usize);
        for cell in grid.cells() {
            let p = cell.position();
            // Both coordinates are below `rows`, which is at most MAX_ROWS.
            let (col, row) = (p.col as u16, p.row as u16);
            queue!(
                self.out,
                cursor::MoveTo(col * CELL_COLUMNS, row),
                SetBackgroundColor(status_color(cell.status())),
                Print(&blank)
            )?;
        }
        queue!(
            self.out,
            ResetColor,
            cursor::MoveTo(0, rows),
            terminal::Clear(ClearType::UntilNewLine),
            SetForegroundColor(CtColor::Grey),
            Print(status),
            ResetColor
        )?;
        self.out.flush()
    }

    /// Wipe the whole screen, e.g. after a resize.
    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, terminal::Clear(ClearType::All))
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.config.mouse {
            let _ = execute!(self.out, event::DisableMouseCapture);
        }
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_to_chars() {
        let ev = Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        assert_eq!(to_input(ev), Some(Input::Char(' ')));
        let ev = Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(to_input(ev), Some(Input::Escape));
        let ev = Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(to_input(ev), None);
    }

    #[test]
    fn drags_count_as_presses() {
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 4, 1);
        let drag = mouse(MouseEventKind::Drag(MouseButton::Right), 6, 2);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 4, 1);
        assert_eq!(
            to_input(down),
            Some(Input::Mouse {
                button: Button::Main,
                column: 4,
                row: 1
            })
        );
        assert_eq!(
            to_input(drag),
            Some(Input::Mouse {
                button: Button::Secondary,
                column: 6,
                row: 2
            })
        );
        assert_eq!(to_input(up), None);
    }

    #[test]
    fn position_under_halves_columns() {
        let g = Grid::create(4, 4);
        assert_eq!(Terminal::position_under(&g, 0, 0), Some(Position::new(0, 0)));
        assert_eq!(Terminal::position_under(&g, 7, 3), Some(Position::new(3, 3)));
        assert_eq!(Terminal::position_under(&g, 8, 0), None);
        assert_eq!(Terminal::position_under(&g, 0, 4), None);
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert_eq!(grid_extent(40).unwrap(), 40);
        assert_eq!(grid_extent(MAX_ROWS as usize).unwrap(), MAX_ROWS);
        let err = grid_extent(MAX_ROWS as usize + 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(grid_extent(70_000).is_err());
    }

    #[test]
    fn small_terminal_warned_once_per_size() {
        let mut w = SizeWarning::default();
        assert!(w.check(30, (40, 20)));
        assert!(!w.check(30, (40, 20)));
        assert!(w.check(30, (50, 20)));
        assert!(!w.check(30, (60, 31)));
        assert!(w.check(30, (40, 20)));
    }

    #[test]
    fn every_status_has_a_distinct_colour() {
        let colours: Vec<_> = Status::ALL.into_iter().map(status_color).collect();
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
