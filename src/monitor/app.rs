//! The sampling loop.

use crate::monitor::analyzer::detect_problems;
use crate::monitor::config::Config;
use crate::monitor::display::Display;
use crate::monitor::error::{MonitorError, Result};
use crate::monitor::input::{Action, InputHandler, KeySource};
use crate::monitor::persist::SnapshotSink;
use crate::monitor::rates::compute_rates;
use crate::monitor::render::{render, render_banner, render_unavailable};
use crate::monitor::state::State;
use crate::monitor::types::{CounterSource, Problem, Rates};

use chrono::Local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Pause between the startup banner and the first sample.
const STARTUP_PAUSE: Duration = Duration::from_secs(1);

/// What one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TickReport {
    /// Counters were read and the dashboard was drawn.
    Sampled {
        /// Rates computed against the previous baseline.
        rates: Rates,
        /// Problems found in the current snapshot.
        problems: Vec<Problem>,
    },
    /// Acquisition failed; nothing was computed and the baseline is unchanged.
    NoData {
        /// Why acquisition failed.
        reason: String,
    },
}

/// Network monitor: samples counters, draws the dashboard and handles
/// commands until told to stop.
pub struct Monitor<S, K, D, P> {
    config: Config,
    source: S,
    keys: K,
    display: D,
    sink: P,
    input: InputHandler,
    state: State,
    interrupted: Arc<AtomicBool>,
}

impl<S, K, D, P> Monitor<S, K, D, P>
where
    S: CounterSource,
    K: KeySource,
    D: Display,
    P: SnapshotSink,
{
    /// Creates a monitor, checking that `source` can work on this system.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityMissing` if the counter source is unavailable.
    pub fn new(config: Config, source: S, keys: K, display: D, sink: P) -> Result<Self> {
        if !source.is_available() {
            return Err(MonitorError::CapabilityMissing(source.id()));
        }

        Ok(Self {
            config,
            source,
            keys,
            display,
            sink,
            input: InputHandler::new(),
            state: State::new(),
            interrupted: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Shares an interrupt flag, raised from a signal handler, that stops the
    /// loop at the next poll.
    #[must_use]
    pub fn with_interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    /// Loop state and rate baseline.
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The display sink.
    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The snapshot sink.
    #[must_use]
    pub fn sink(&self) -> &P {
        &self.sink
    }

    /// Shows the startup banner and gives the operator a moment to read it.
    ///
    /// # Errors
    ///
    /// Returns an error if the display fails.
    pub fn announce(&mut self) -> Result<()> {
        self.display
            .show(&render_banner(self.config.global.interval_secs))?;
        std::thread::sleep(STARTUP_PAUSE);
        Ok(())
    }

    /// Runs until quit, interrupt, or a terminal failure.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal fails; the loop is stopped first.
    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "monitoring started, interval {}s",
            self.config.global.interval_secs
        );

        let result = self.run_loop();
        self.state.stop();
        result
    }

    fn run_loop(&mut self) -> Result<()> {
        while self.state.is_running() {
            if self.interrupt_requested() {
                self.dispatch(Action::Interrupt)?;
                break;
            }

            self.tick()?;

            let action = self.wait_for_command()?;
            self.dispatch(action)?;
        }
        Ok(())
    }

    /// Samples once: acquire, compute, detect, draw, then advance the
    /// baseline. A failed acquisition is reported and leaves the baseline
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error only if the display fails.
    pub fn tick(&mut self) -> Result<TickReport> {
        let countdown = self.config.global.interval_secs;
        let clock = Local::now().time();

        let current = match self.source.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("{e}");
                let reason = e.to_string();
                self.display
                    .show(&render_unavailable(&reason, countdown, clock))?;
                return Ok(TickReport::NoData { reason });
            }
        };

        let rates = compute_rates(&current, self.state.previous());
        let problems = detect_problems(&current, &rates);
        log::debug!(
            "tick: {} interfaces, {} rates, {} problems",
            current.len(),
            rates.len(),
            problems.len()
        );

        self.display
            .show(&render(&current, &rates, &problems, countdown, clock))?;
        self.state.advance(current);

        Ok(TickReport::Sampled { rates, problems })
    }

    /// Waits up to the sampling interval for a command key.
    ///
    /// Polls in slices of `poll_ms` so that an interrupt is noticed within
    /// one slice. The key source is polled at least once even with a zero
    /// interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the key source fails.
    pub fn wait_for_command(&mut self) -> Result<Action> {
        // None when the interval is past the clock's range: wait for a key.
        let deadline = Instant::now().checked_add(self.config.update_interval());
        let slice = self.config.poll_slice();

        loop {
            if self.interrupt_requested() {
                return Ok(Action::Interrupt);
            }

            let remaining =
                deadline.map_or(slice, |d| d.saturating_duration_since(Instant::now()));
            if let Some(key) = self.keys.poll_key(slice.min(remaining))? {
                match self.input.handle_key(key) {
                    Action::None => {}
                    action => return Ok(action),
                }
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Ok(Action::None);
            }
        }
    }

    /// Carries out a command.
    ///
    /// # Errors
    ///
    /// Returns an error only if the display fails. A failed save is reported
    /// on screen and the loop continues.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                log::info!("quit requested");
                self.display.notify("\nExiting...")?;
                self.state.stop();
            }
            Action::Interrupt => {
                log::info!("interrupted");
                self.display.notify("\nMonitoring stopped")?;
                self.state.stop();
            }
            Action::Reset => {
                self.state.reset();
                log::info!("rate baseline reset");
                self.display.notify("\n✓ Statistics reset")?;
                self.pause(1);
            }
            Action::Save => match self.sink.write_snapshot(Local::now(), self.state.previous()) {
                Ok(path) => {
                    self.display
                        .notify(&format!("\n✓ Statistics saved to file: {}", path.display()))?;
                    self.pause(1);
                }
                Err(e) => {
                    log::warn!("{e}");
                    self.display.notify(&format!("\n✗ Save failed: {e}"))?;
                    self.pause(2);
                }
            },
            Action::None => {}
        }
        Ok(())
    }

    fn pause(&self, factor: u32) {
        let pause = self.config.confirm_pause() * factor;
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }

    fn interrupt_requested(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }
}
