//! Screen output.

use crate::monitor::error::Result;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Sink for rendered screens and status messages.
pub trait Display {
    /// Clears the screen and writes `text` from the top-left corner.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written.
    fn show(&mut self, text: &str) -> Result<()>;

    /// Writes `text` below whatever is already on screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written.
    fn notify(&mut self, text: &str) -> Result<()>;
}

/// Display backed by a crossterm terminal.
///
/// Raw mode needs explicit `\r\n` line endings; plain `\n` in the rendered
/// text is translated on the way out.
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl TerminalDisplay<io::Stdout> {
    /// Creates a display writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Creates a display writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the display and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\r\n")?;
        }
        Ok(())
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn show(&mut self, text: &str) -> Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        self.out.queue(MoveTo(0, 0))?;
        self.write_lines(text)?;
        self.out.flush()?;
        Ok(())
    }

    fn notify(&mut self, text: &str) -> Result<()> {
        self.write_lines(text)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps the terminal in raw mode for as long as it lives.
///
/// Dropping the guard restores cooked mode, so every exit path out of the
/// sampling loop (quit, interrupt, error, panic unwinding) leaves the
/// terminal usable.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Enables raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin is not a terminal.
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("failed to restore terminal mode: {e}");
        }
    }
}
