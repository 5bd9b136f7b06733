//! Keyboard input for the sampling loop.

use crate::monitor::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// A key as seen by the sampling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    /// A printable character, lower-case normalized.
    Char(char),
    /// Ctrl+C.
    Interrupt,
}

/// Command resulting from a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop monitoring.
    Quit,
    /// Drop the rate baseline.
    Reset,
    /// Write a snapshot file.
    Save,
    /// Interrupt requested; shut down cleanly.
    Interrupt,
    /// No action.
    None,
}

/// Source of keystrokes with a bounded wait.
pub trait KeySource {
    /// Waits at most `timeout` for a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the input device cannot be read.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Keystroke>>;
}

/// Maps keystrokes to actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Handles a keystroke and returns the corresponding action.
    #[must_use]
    pub fn handle_key(&self, key: Keystroke) -> Action {
        match key {
            Keystroke::Interrupt => Action::Interrupt,
            Keystroke::Char('q') => Action::Quit,
            Keystroke::Char('r') => Action::Reset,
            Keystroke::Char('s') => Action::Save,
            Keystroke::Char(_) => Action::None,
        }
    }

    /// Converts a terminal key event into a keystroke.
    ///
    /// Releases and repeats are dropped, characters are lower-cased, and
    /// Ctrl+C becomes [`Keystroke::Interrupt`] since raw mode swallows the
    /// signal.
    #[must_use]
    pub fn translate(&self, event: KeyEvent) -> Option<Keystroke> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Keystroke::Interrupt),
                _ => None,
            };
        }

        match event.code {
            KeyCode::Char(c) => c.to_lowercase().next().map(Keystroke::Char),
            _ => None,
        }
    }
}

/// Key source reading crossterm events from the terminal.
#[derive(Debug, Default)]
pub struct TerminalKeys {
    handler: InputHandler,
}

impl TerminalKeys {
    /// Creates a key source. The terminal should already be in raw mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeySource for TerminalKeys {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Keystroke>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(self.handler.translate(key)),
            _ => Ok(None),
        }
    }
}
