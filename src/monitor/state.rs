//! State owned by the sampling loop.

use crate::monitor::types::Snapshot;

/// Lifecycle of the sampling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Sampling.
    #[default]
    Running,
    /// Quit requested, interrupted, or failed; the loop has exited.
    Stopped,
}

/// The rate baseline and loop lifecycle.
///
/// Only the previous snapshot is kept between ticks. It is replaced wholesale
/// after each successful acquisition and cleared by the reset command.
#[derive(Debug, Default)]
pub struct State {
    previous: Snapshot,
    loop_state: LoopState,
}

impl State {
    /// Creates a running state with an empty baseline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The baseline the next tick's rates are computed against.
    #[must_use]
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    /// Replaces the baseline with `current`.
    pub fn advance(&mut self, current: Snapshot) {
        self.previous = current;
    }

    /// Drops the baseline so the next tick computes no rates.
    pub fn reset(&mut self) {
        self.previous = Snapshot::new();
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    /// Returns true while the loop should keep sampling.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.loop_state == LoopState::Running
    }

    /// Signals that the loop should exit.
    pub fn stop(&mut self) {
        self.loop_state = LoopState::Stopped;
    }
}
