//! Core types for the network monitor.
//!
//! - [`InterfaceCounters`]: one interface's cumulative counters at one instant
//! - [`Snapshot`]: every interface's counters from a single acquisition
//! - [`RateRecord`]: throughput and error deltas derived from two snapshots
//! - [`Problem`]: an anomaly detected on one interface
//! - [`CounterSource`]: trait for counter acquisition implementations

use super::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Returns true for the local loopback interface.
///
/// Matches `lo` (Linux), `lo0` (BSD/macOS) and names starting with
/// `Loopback` (Windows).
#[must_use]
pub fn is_loopback(name: &str) -> bool {
    name == "lo" || name == "lo0" || name.starts_with("Loopback")
}

/// Cumulative counters for one interface, read at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceCounters {
    /// Interface name, the join key between samples.
    pub name: String,
    /// Whether the interface has at least one assigned address.
    pub is_up: bool,
    /// Total bytes transmitted.
    pub bytes_sent: u64,
    /// Total bytes received.
    pub bytes_received: u64,
    /// Total receive errors.
    pub errors_in: u64,
    /// Total transmit errors.
    pub errors_out: u64,
    /// When the counters were read.
    pub sampled_at: Instant,
}

impl InterfaceCounters {
    /// Creates an up interface with zeroed counters sampled at `sampled_at`.
    #[must_use]
    pub fn new(name: impl Into<String>, sampled_at: Instant) -> Self {
        Self {
            name: name.into(),
            is_up: true,
            bytes_sent: 0,
            bytes_received: 0,
            errors_in: 0,
            errors_out: 0,
            sampled_at,
        }
    }

    /// Sets the link state.
    #[must_use]
    pub fn up(mut self, is_up: bool) -> Self {
        self.is_up = is_up;
        self
    }

    /// Sets the cumulative byte counters.
    #[must_use]
    pub fn bytes(mut self, sent: u64, received: u64) -> Self {
        self.bytes_sent = sent;
        self.bytes_received = received;
        self
    }

    /// Sets the cumulative error counters.
    #[must_use]
    pub fn errors(mut self, errors_in: u64, errors_out: u64) -> Self {
        self.errors_in = errors_in;
        self.errors_out = errors_out;
        self
    }

    /// Returns true if either cumulative error counter is non-zero.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors_in > 0 || self.errors_out > 0
    }
}

/// Counters for every interface from one acquisition, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    interfaces: BTreeMap<String, InterfaceCounters>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an interface's counters.
    pub fn insert(&mut self, counters: InterfaceCounters) {
        self.interfaces.insert(counters.name.clone(), counters);
    }

    /// Gets one interface's counters by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InterfaceCounters> {
        self.interfaces.get(name)
    }

    /// Returns true if the interface is part of this snapshot.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.interfaces.contains_key(name)
    }

    /// Number of interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Returns true if there are no interfaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Iterates over interfaces in name order.
    pub fn iter(&self) -> impl Iterator<Item = &InterfaceCounters> {
        self.interfaces.values()
    }

    /// Iterates over non-loopback interfaces in name order.
    pub fn visible(&self) -> impl Iterator<Item = &InterfaceCounters> {
        self.iter().filter(|c| !is_loopback(&c.name))
    }
}

impl FromIterator<InterfaceCounters> for Snapshot {
    fn from_iter<I: IntoIterator<Item = InterfaceCounters>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for counters in iter {
            snapshot.insert(counters);
        }
        snapshot
    }
}

/// Throughput and error deltas for one interface between two snapshots.
///
/// Rates and deltas are signed: a counter that went backwards (interface
/// reset by the OS) shows up as a negative value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRecord {
    /// Upload rate in bytes/sec.
    pub sent_bytes_per_sec: f64,
    /// Download rate in bytes/sec.
    pub recv_bytes_per_sec: f64,
    /// Change in receive errors.
    pub errors_in_delta: i64,
    /// Change in transmit errors.
    pub errors_out_delta: i64,
}

/// Per-interface rates keyed by interface name.
pub type Rates = BTreeMap<String, RateRecord>;

/// The condition a [`Problem`] reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProblemKind {
    /// The interface has no assigned address.
    Down,
    /// Cumulative error counters are non-zero.
    Errors {
        /// Cumulative receive errors.
        errors_in: u64,
        /// Cumulative transmit errors.
        errors_out: u64,
    },
    /// Upload rate above the fixed threshold.
    HighOutbound {
        /// Observed upload rate in bytes/sec.
        bytes_per_sec: f64,
    },
    /// Download rate above the fixed threshold.
    HighInbound {
        /// Observed download rate in bytes/sec.
        bytes_per_sec: f64,
    },
}

/// An anomaly found on one interface during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Interface the problem was found on.
    pub interface: String,
    /// What was found.
    pub kind: ProblemKind,
}

impl Problem {
    /// Creates a problem for `interface`.
    #[must_use]
    pub fn new(interface: impl Into<String>, kind: ProblemKind) -> Self {
        Self {
            interface: interface.into(),
            kind,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProblemKind::Down => write!(f, "Interface {} is down", self.interface),
            ProblemKind::Errors {
                errors_in,
                errors_out,
            } => write!(
                f,
                "Errors on {}: in={}, out={}",
                self.interface, errors_in, errors_out
            ),
            ProblemKind::HighOutbound { .. } => {
                write!(f, "High outbound rate on {}", self.interface)
            }
            ProblemKind::HighInbound { .. } => {
                write!(f, "High inbound rate on {}", self.interface)
            }
        }
    }
}

/// Trait for counter acquisition.
///
/// Implementations read the operating system's per-interface counters. A
/// failed read is transient; [`CounterSource::is_available`] answers whether
/// reads can work at all on this system.
pub trait CounterSource {
    /// Returns the unique identifier for this source.
    fn id(&self) -> &'static str;

    /// Reads every interface's counters.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::AcquisitionFailed` if the OS query fails.
    fn snapshot(&mut self) -> Result<Snapshot>;

    /// Returns true if this source can run on the current system.
    fn is_available(&self) -> bool;

    /// Upper bound on how long one read may block.
    fn timeout_hint(&self) -> Duration {
        Duration::from_secs(5)
    }
}
