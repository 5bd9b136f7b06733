//! Terminal network-interface monitor.
//!
//! Samples per-interface byte and error counters at a fixed interval,
//! derives transfer rates from consecutive samples, flags interfaces that are
//! down, erroring or unusually busy, and redraws a plain-text dashboard. The
//! operator can quit, reset the rate baseline, or save a snapshot to a file
//! from the keyboard.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use netmon::monitor::prelude::*;
//!
//! let config = Config::load_or_default("~/.config/netmon/config.yaml")?;
//! let sink = FileSnapshotWriter::new(&config.global.output_dir);
//! let mut monitor = Monitor::new(
//!     config,
//!     NetworkCollector::new(),
//!     TerminalKeys::new(),
//!     TerminalDisplay::stdout(),
//!     sink,
//! )?;
//! monitor.run()?;
//! ```

// ============================================================================
// Error Types
// ============================================================================

pub mod error;
pub use error::{MonitorError, Result};

// ============================================================================
// Core Types
// ============================================================================

pub mod subprocess;
pub mod types;

pub use subprocess::{run_with_timeout, SubprocessResult};
pub use types::{
    CounterSource, InterfaceCounters, Problem, ProblemKind, RateRecord, Rates, Snapshot,
};

// ============================================================================
// Collectors
// ============================================================================

pub mod collectors;

// ============================================================================
// Analysis
// ============================================================================

pub mod analyzer;
pub mod rates;

pub use analyzer::{detect_problems, HIGH_RATE_THRESHOLD};
pub use rates::compute_rates;

// ============================================================================
// Presentation
// ============================================================================

pub mod display;
pub mod format;
pub mod render;

pub use display::{Display, RawModeGuard, TerminalDisplay};

// ============================================================================
// Configuration
// ============================================================================

pub mod config;

pub use config::Config;

// ============================================================================
// Application
// ============================================================================

pub mod app;
pub mod input;
pub mod persist;
pub mod state;

pub use app::{Monitor, TickReport};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for monitor functionality.
pub mod prelude {
    pub use super::app::{Monitor, TickReport};
    pub use super::collectors::NetworkCollector;
    pub use super::config::Config;
    pub use super::display::{Display, RawModeGuard, TerminalDisplay};
    pub use super::error::{MonitorError, Result};
    pub use super::input::{Action, KeySource, Keystroke, TerminalKeys};
    pub use super::persist::{FileSnapshotWriter, SnapshotSink};
    pub use super::types::{CounterSource, InterfaceCounters, Problem, ProblemKind, Snapshot};
}
