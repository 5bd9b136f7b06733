//! Anomaly detection over the current snapshot and its rates.
//!
//! Error detection looks at the cumulative counters, not at the per-tick
//! delta. Once an interface has logged a single error it is reported on
//! every tick until the counters are reset by the OS.

use crate::monitor::types::{Problem, ProblemKind, Rates, Snapshot};

/// Rate above which an interface is reported as busy: 10 MiB/s.
pub const HIGH_RATE_THRESHOLD: f64 = 10.0 * 1024.0 * 1024.0;

/// Returns the problems found in `current`, grouped per interface in name
/// order. The loopback interface is never reported.
#[must_use]
pub fn detect_problems(current: &Snapshot, rates: &Rates) -> Vec<Problem> {
    let mut problems = Vec::new();

    for counters in current.visible() {
        let name = &counters.name;

        if !counters.is_up {
            problems.push(Problem::new(name.as_str(), ProblemKind::Down));
        }

        if counters.has_errors() {
            problems.push(Problem::new(
                name.as_str(),
                ProblemKind::Errors {
                    errors_in: counters.errors_in,
                    errors_out: counters.errors_out,
                },
            ));
        }

        if let Some(rate) = rates.get(name) {
            if rate.sent_bytes_per_sec > HIGH_RATE_THRESHOLD {
                problems.push(Problem::new(
                    name.as_str(),
                    ProblemKind::HighOutbound {
                        bytes_per_sec: rate.sent_bytes_per_sec,
                    },
                ));
            }
            if rate.recv_bytes_per_sec > HIGH_RATE_THRESHOLD {
                problems.push(Problem::new(
                    name.as_str(),
                    ProblemKind::HighInbound {
                        bytes_per_sec: rate.recv_bytes_per_sec,
                    },
                ));
            }
        }
    }

    problems
}
