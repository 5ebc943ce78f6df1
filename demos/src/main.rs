//! Interactive A* visualizer in the terminal.
//!
//! Run: cargo run --bin gridstar -- --rows 20

use std::io;
use std::time::Duration;

use gridstar_core::Grid;
use gridstar_crossterm::{Button, Input, Terminal, TerminalConfig};
use gridstar_demo::{ConfigError, DemoConfig, Editor, USAGE, summary};
use gridstar_paths::Step;
use rand::SeedableRng;
use rand::rngs::StdRng;

const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() {
    let config = match DemoConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(config: DemoConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = Editor::new(config.initial_grid()?);
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
    let mut term = Terminal::new(TerminalConfig {
        mouse: config.mouse,
    })?;
    let mut status = String::from("space: search  c: clear  r: random barriers  q: quit");

    loop {
        term.draw(editor.grid(), &status)?;
        let Some(input) = term.poll_input(IDLE_POLL)? else {
            continue;
        };
        match input {
            Input::Char('q') | Input::Escape => break,
            Input::Char(' ') => {
                let mut failure = None;
                let result = editor.run(|grid| {
                    match watch_step(&mut term, grid, config.step_delay) {
                        Ok(step) => step,
                        Err(e) => {
                            failure = Some(e);
                            Step::Cancel
                        }
                    }
                });
                if let Some(e) = failure {
                    return Err(e.into());
                }
                status = summary(&result);
            }
            Input::Char('c') => {
                editor.clear();
                status.clear();
            }
            Input::Char('r') => editor.scatter(&mut rng, config.density),
            Input::Mouse {
                button,
                column,
                row,
            } => {
                if let Some(p) = Terminal::position_under(editor.grid(), column, row) {
                    match button {
                        Button::Main => editor.place(p),
                        Button::Secondary => editor.erase(p),
                    }
                }
            }
            Input::Resize => term.clear()?,
            Input::Char(_) => {}
        }
    }
    Ok(())
}

/// Repaint after one expansion, then give the user `delay` to cancel.
fn watch_step(term: &mut Terminal, grid: &Grid, delay: Duration) -> io::Result<Step> {
    term.draw(grid, "searching... (q / esc to cancel)")?;
    match term.poll_input(delay)? {
        Some(Input::Char('q') | Input::Escape) => Ok(Step::Cancel),
        _ => Ok(Step::Continue),
    }
}
