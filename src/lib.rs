//! # netmon
//!
//! Terminal monitor for network interfaces: byte counters, transfer rates,
//! link state and error detection, redrawn on a fixed interval.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use netmon::monitor::prelude::*;
//!
//! let mut monitor = Monitor::new(
//!     Config::new(),
//!     NetworkCollector::new(),
//!     TerminalKeys::new(),
//!     TerminalDisplay::stdout(),
//!     FileSnapshotWriter::new("."),
//! )?;
//! monitor.run()?;
//! ```
//!
//! ## Platforms
//!
//! - Linux: counters from `/proc/net/dev`
//! - macOS: counters from `netstat -ib`

#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod monitor;

pub use monitor::{MonitorError, Result};
