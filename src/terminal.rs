// Terminal mode switching for the full-screen UI
//
// Teardown is a list of independent steps: one failing never stops the rest.

use crate::errors::{FogError, FogResult};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// A named terminal operation
pub type Step<'a> = (&'static str, Box<dyn FnOnce() -> io::Result<()> + 'a>);

pub fn step<'a>(name: &'static str, f: impl FnOnce() -> io::Result<()> + 'a) -> Step<'a> {
    (name, Box::new(f))
}

/// Run every step in order, logging and collecting the failures
pub fn run_steps(steps: Vec<Step<'_>>) -> Vec<(&'static str, io::Error)> {
    let mut failures = Vec::new();
    for (name, f) in steps {
        if let Err(e) = f() {
            error!("terminal restore: {} failed: {}", name, e);
            failures.push((name, e));
        }
    }
    failures
}

/// First failure as the reported error
pub fn first_failure(failures: Vec<(&'static str, io::Error)>) -> FogResult<()> {
    match failures.into_iter().next() {
        Some((name, e)) => Err(FogError::Terminal(io::Error::new(
            e.kind(),
            format!("{}: {}", name, e),
        ))),
        None => Ok(()),
    }
}

fn mode_restore_steps<'a>() -> Vec<Step<'a>> {
    vec![
        step("disable raw mode", disable_raw_mode),
        step("leave alternate screen", || execute!(io::stdout(), LeaveAlternateScreen)),
        step("disable mouse capture", || execute!(io::stdout(), DisableMouseCapture)),
    ]
}

/// Raw mode, alternate screen and mouse capture. Backs out on failure.
pub fn setup_terminal() -> FogResult<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
        .and_then(|_| Terminal::new(CrosstermBackend::new(io::stdout())))
        .map_err(|e| {
            run_steps(mode_restore_steps());
            FogError::Terminal(e)
        })
}

/// Undo `setup_terminal`, attempting every step
pub fn restore_terminal(terminal: &mut Tui) -> FogResult<()> {
    let mut steps = mode_restore_steps();
    steps.push(step("show cursor", move || terminal.show_cursor()));
    first_failure(run_steps(steps))
}
