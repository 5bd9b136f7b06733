//! Text rendering of the dashboard.
//!
//! Rendering is pure: it builds the whole screen as a `String` and leaves
//! clearing and writing to a [`Display`](crate::monitor::display::Display).

use crate::monitor::format::{format_bytes, format_rate};
use crate::monitor::types::{Problem, Rates, Snapshot};
use chrono::NaiveTime;
use std::fmt::Write as FmtWrite;

/// Width of the horizontal rules.
pub const RULE_WIDTH: usize = 60;

/// The command legend shown at the bottom of every screen.
pub const COMMAND_LEGEND: &str = "Controls: [Q] Quit  [R] Reset  [S] Save";

const TITLE: &str = "NETWORK INTERFACE MONITOR";

/// Renders one dashboard screen.
///
/// The loopback interface is left out. Rate lines appear only for
/// interfaces that have a [`RateRecord`](crate::monitor::types::RateRecord).
#[must_use]
pub fn render(
    current: &Snapshot,
    rates: &Rates,
    problems: &[Problem],
    seconds_until_next_update: u64,
    clock: NaiveTime,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = String::new();

    let _ = writeln!(output, "{rule}");
    let _ = writeln!(output, "{TITLE} - {}", clock.format("%H:%M:%S"));
    let _ = writeln!(
        output,
        "STATUS: ACTIVE - next update in {seconds_until_next_update} sec"
    );
    let _ = writeln!(output, "{rule}");

    for counters in current.visible() {
        let (symbol, state) = if counters.is_up {
            ("[✓]", "ON")
        } else {
            ("[✗]", "OFF")
        };

        let _ = writeln!(output);
        let _ = writeln!(output, "{symbol} {} ({state})", counters.name);
        let _ = writeln!(output, "  Sent:     {}", format_bytes(counters.bytes_sent));
        let _ = writeln!(output, "  Received: {}", format_bytes(counters.bytes_received));

        if let Some(rate) = rates.get(&counters.name) {
            let _ = writeln!(
                output,
                "  Rate: ↑{} ↓{}",
                format_rate(rate.sent_bytes_per_sec),
                format_rate(rate.recv_bytes_per_sec)
            );
        }
    }

    if !problems.is_empty() {
        let alert = "!".repeat(RULE_WIDTH);
        let _ = writeln!(output);
        let _ = writeln!(output, "{alert}");
        let _ = writeln!(output, "PROBLEMS DETECTED:");
        for problem in problems {
            let _ = writeln!(output, "  ⚠ {problem}");
        }
        let _ = writeln!(output, "{alert}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "{COMMAND_LEGEND}");
    let _ = writeln!(output, "{rule}");

    output
}

/// Renders the screen shown when a tick could not read any counters.
#[must_use]
pub fn render_unavailable(
    reason: &str,
    seconds_until_next_update: u64,
    clock: NaiveTime,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = String::new();

    let _ = writeln!(output, "{rule}");
    let _ = writeln!(output, "{TITLE} - {}", clock.format("%H:%M:%S"));
    let _ = writeln!(
        output,
        "STATUS: NO DATA - retrying in {seconds_until_next_update} sec"
    );
    let _ = writeln!(output, "{rule}");
    let _ = writeln!(output);
    let _ = writeln!(output, "✗ Failed to read interface statistics: {reason}");
    let _ = writeln!(output);
    let _ = writeln!(output, "{COMMAND_LEGEND}");
    let _ = writeln!(output, "{rule}");

    output
}

/// Renders the banner printed once before the first sample.
#[must_use]
pub fn render_banner(interval_secs: u64) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = String::new();

    let _ = writeln!(output, "{rule}");
    let _ = writeln!(output, "{TITLE} (refresh: {interval_secs} sec)");
    let _ = writeln!(output, "{rule}");
    let _ = writeln!(output, "Tracks interface traffic and flags faults");
    let _ = writeln!(output);
    let _ = writeln!(output, "Controls:");
    let _ = writeln!(output, "  Q - Quit");
    let _ = writeln!(output, "  R - Reset statistics");
    let _ = writeln!(output, "  S - Save snapshot to file");
    let _ = writeln!(output);
    let _ = writeln!(output, "Collecting data...");

    output
}
