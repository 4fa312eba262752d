//! Terminal backend: raw mode acquisition and window size.
//!
//! `CrosstermBackend::enter_guard` switches the terminal into raw mode on the
//! alternate screen and returns a `TerminalGuard` that undoes it on drop, so
//! every exit path (normal quit, `?` propagation, panic unwind) leaves the
//! user's terminal usable.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;
use tracing::{debug, warn};

pub mod size;
pub use size::{parse_cursor_report, query_cursor_report, window_size};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard restoring the terminal when dropped.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter raw mode and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode().context("enable raw mode")?;
            execute!(stdout(), EnterAlternateScreen, Hide).context("enter alternate screen")?;
            self.entered = true;
            debug!(target: "terminal", "entered raw mode");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(
                stdout(),
                Clear(ClearType::All),
                MoveTo(0, 0),
                LeaveAlternateScreen,
                Show
            )?;
            disable_raw_mode()?;
            self.entered = false;
            debug!(target: "terminal", "left raw mode");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            warn!(target: "terminal", error = %e, "restore_failed");
        }
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.leave() {
            warn!(target: "terminal", error = %e, "restore_failed");
        }
    }
}
