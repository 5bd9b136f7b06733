//! Rate calculation between two snapshots.
//!
//! Rates are not clamped. When the OS resets an interface its counters start
//! over from zero, and the next rate for that interface comes out negative.

use crate::monitor::types::{RateRecord, Rates, Snapshot};

/// Computes per-interface rates from `previous` to `current`.
///
/// A record is produced only for interfaces present in both snapshots whose
/// samples are strictly ordered in time. Everything else is skipped silently.
#[must_use]
pub fn compute_rates(current: &Snapshot, previous: &Snapshot) -> Rates {
    let mut rates = Rates::new();

    for curr in current.iter() {
        let Some(prev) = previous.get(&curr.name) else {
            continue;
        };
        let Some(elapsed) = curr.sampled_at.checked_duration_since(prev.sampled_at) else {
            continue;
        };
        let elapsed_secs = elapsed.as_secs_f64();
        if elapsed_secs <= 0.0 {
            continue;
        }

        let sent_delta = signed_delta(curr.bytes_sent, prev.bytes_sent);
        let recv_delta = signed_delta(curr.bytes_received, prev.bytes_received);

        rates.insert(
            curr.name.clone(),
            RateRecord {
                sent_bytes_per_sec: sent_delta as f64 / elapsed_secs,
                recv_bytes_per_sec: recv_delta as f64 / elapsed_secs,
                errors_in_delta: signed_delta(curr.errors_in, prev.errors_in),
                errors_out_delta: signed_delta(curr.errors_out, prev.errors_out),
            },
        );
    }

    rates
}

/// `current - previous` as a signed value, saturating at the `i64` range.
#[must_use]
pub fn signed_delta(current: u64, previous: u64) -> i64 {
    if current >= previous {
        i64::try_from(current - previous).unwrap_or(i64::MAX)
    } else {
        i64::try_from(previous - current).map_or(i64::MIN, |d| -d)
    }
}
