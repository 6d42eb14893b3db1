//! `TerminalSession`: raw mode and the alternate screen for as long as
//! the value lives.

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use tracing::debug;

/// Guard over the terminal modes the display needs.
///
/// Dropping it restores the terminal, including on early returns and
/// panics that unwind through the owner.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
    size: (u16, u16),
}

impl TerminalSession {
    /// Enter raw mode, hide the cursor and optionally switch to the
    /// alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried or configured.
    /// Whatever was already changed is restored before returning.
    pub fn enter(alternate_screen: bool) -> io::Result<Self> {
        let size = terminal::size()?;
        terminal::enable_raw_mode()?;

        // From here on, Drop restores on failure.
        let session = Self {
            alternate_screen,
            size,
        };
        let mut stdout = io::stdout();
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide)?;

        debug!(width = size.0, height = size.1, "terminal:entered");
        Ok(session)
    }

    /// Terminal size at startup, in columns and rows.
    pub const fn size(&self) -> (u16, u16) {
        self.size
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        debug!("terminal:restored");
    }
}
