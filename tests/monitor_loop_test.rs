//! Sampling loop tests.
//!
//! Drives `Monitor` end to end with a scripted counter source, scripted
//! keystrokes and a recording display.
#![allow(clippy::unwrap_used)]

use netmon::monitor::prelude::*;
use netmon::monitor::{RateRecord, TickReport};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

// ============================================================================
// Fakes
// ============================================================================

/// Hands out prepared snapshots; fails once the script runs out.
struct ScriptedSource {
    script: VecDeque<Snapshot>,
}

impl ScriptedSource {
    fn new(snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        Self {
            script: snapshots.into_iter().collect(),
        }
    }
}

impl CounterSource for ScriptedSource {
    fn id(&self) -> &'static str {
        "scripted"
    }

    fn snapshot(&mut self) -> Result<Snapshot> {
        self.script.pop_front().ok_or_else(|| MonitorError::AcquisitionFailed {
            source_id: "scripted",
            message: "script exhausted".to_string(),
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// One entry per poll; `None` is a poll that saw no key.
#[derive(Default)]
struct ScriptedKeys(VecDeque<Option<Keystroke>>);

impl ScriptedKeys {
    fn new(polls: impl IntoIterator<Item = Option<Keystroke>>) -> Self {
        Self(polls.into_iter().collect())
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<Keystroke>> {
        Ok(self.0.pop_front().flatten())
    }
}

#[derive(Default)]
struct RecordingDisplay {
    screens: Vec<String>,
    notes: Vec<String>,
}

impl RecordingDisplay {
    fn saw(&self, needle: &str) -> bool {
        self.screens.iter().chain(&self.notes).any(|t| t.contains(needle))
    }
}

impl Display for RecordingDisplay {
    fn show(&mut self, text: &str) -> Result<()> {
        self.screens.push(text.to_string());
        Ok(())
    }

    fn notify(&mut self, text: &str) -> Result<()> {
        self.notes.push(text.to_string());
        Ok(())
    }
}

fn fast_config(output_dir: &std::path::Path) -> Config {
    let mut config = Config::new();
    config.global.interval_secs = 0;
    config.global.confirm_pause_ms = 0;
    config.global.output_dir = output_dir.to_path_buf();
    config
}

fn eth0(at: Instant, sent: u64, received: u64) -> Snapshot {
    std::iter::once(InterfaceCounters::new("eth0", at).bytes(sent, received)).collect()
}

type TestMonitor = Monitor<ScriptedSource, ScriptedKeys, RecordingDisplay, FileSnapshotWriter>;

fn monitor(dir: &std::path::Path, source: ScriptedSource, keys: ScriptedKeys) -> TestMonitor {
    Monitor::new(
        fast_config(dir),
        source,
        keys,
        RecordingDisplay::default(),
        FileSnapshotWriter::new(dir),
    )
    .unwrap()
}

// ============================================================================
// Ticks
// ============================================================================

/// 15 MiB sent in one second is flagged as high outbound, and nothing else.
#[test]
fn test_high_outbound_rate_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let t0 = Instant::now();
    let source = ScriptedSource::new([
        eth0(t0, 0, 0),
        eth0(t0 + Duration::from_secs(1), 15_728_640, 0),
    ]);
    let mut monitor = monitor(dir.path(), source, ScriptedKeys::default());

    let first = monitor.tick().unwrap();
    assert_eq!(
        first,
        TickReport::Sampled {
            rates: Default::default(),
            problems: vec![],
        }
    );

    let TickReport::Sampled { rates, problems } = monitor.tick().unwrap() else {
        panic!("second tick should sample");
    };

    let rate: &RateRecord = &rates["eth0"];
    assert!((rate.sent_bytes_per_sec - 15_728_640.0).abs() < 1e-6);
    assert_eq!(problems.len(), 1);
    assert_eq!(
        problems[0],
        Problem::new(
            "eth0",
            ProblemKind::HighOutbound {
                bytes_per_sec: rate.sent_bytes_per_sec,
            },
        )
    );
    assert!(monitor.display().saw("High outbound rate on eth0"));
    assert!(monitor.display().saw("Rate: ↑15.0 MB/s ↓0 B/s"));
}

/// A failed read shows the no-data screen and keeps the baseline.
#[test]
fn test_acquisition_failure_keeps_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let t0 = Instant::now();
    let source = ScriptedSource::new([eth0(t0, 100, 200)]);
    let mut monitor = monitor(dir.path(), source, ScriptedKeys::default());

    monitor.tick().unwrap();
    let report = monitor.tick().unwrap();

    assert!(matches!(report, TickReport::NoData { .. }));
    assert!(monitor.display().saw("STATUS: NO DATA"));
    let baseline = monitor.state().previous().get("eth0").unwrap();
    assert_eq!(baseline.bytes_sent, 100);
    assert_eq!(baseline.bytes_received, 200);
}

/// After a reset the next tick has nothing to compare against.
#[test]
fn test_reset_clears_rates() {
    let dir = tempfile::tempdir().unwrap();
    let t0 = Instant::now();
    let source = ScriptedSource::new([
        eth0(t0, 0, 0),
        eth0(t0 + Duration::from_secs(2), 2048, 4096),
    ]);
    let mut monitor = monitor(dir.path(), source, ScriptedKeys::default());

    monitor.tick().unwrap();
    monitor.dispatch(Action::Reset).unwrap();
    assert!(monitor.state().previous().is_empty());
    assert!(monitor.display().saw("✓ Statistics reset"));

    let TickReport::Sampled { rates, .. } = monitor.tick().unwrap() else {
        panic!("tick after reset should sample");
    };
    assert!(rates.is_empty());
    assert!(!monitor.display().saw("Rate:"));
}

/// Counters going backwards produce a negative rate, shown with a sign.
#[test]
fn test_counter_reset_shows_negative_rate() {
    let dir = tempfile::tempdir().unwrap();
    let t0 = Instant::now();
    let source = ScriptedSource::new([
        eth0(t0, 4096, 0),
        eth0(t0 + Duration::from_secs(1), 2048, 0),
    ]);
    let mut monitor = monitor(dir.path(), source, ScriptedKeys::default());

    monitor.tick().unwrap();
    let TickReport::Sampled { rates, problems } = monitor.tick().unwrap() else {
        panic!("second tick should sample");
    };

    assert!(rates["eth0"].sent_bytes_per_sec < 0.0);
    assert!(problems.is_empty());
    assert!(monitor.display().saw("↑-2.0 KB/s"));
}

// ============================================================================
// Commands
// ============================================================================

/// Save writes a snapshot file into the output directory and keeps running.
#[test]
fn test_save_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = ScriptedSource::new([eth0(Instant::now(), 1024, 2048)]);
    let mut monitor = monitor(dir.path(), source, ScriptedKeys::default());

    monitor.tick().unwrap();
    monitor.dispatch(Action::Save).unwrap();

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);

    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("network_stats_") && name.ends_with(".txt"), "got {name}");

    let body = std::fs::read_to_string(&files[0]).unwrap();
    assert!(body.starts_with("Network interface statistics - "));
    assert!(body.contains("eth0 (up): sent=1.0 KB received=2.0 KB"));

    assert!(monitor.state().is_running());
    assert!(monitor.display().saw("✓ Statistics saved to file"));
}

/// A save into a missing directory is reported and the loop carries on.
#[test]
fn test_save_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let mut monitor = Monitor::new(
        fast_config(&missing),
        ScriptedSource::new([eth0(Instant::now(), 0, 0)]),
        ScriptedKeys::default(),
        RecordingDisplay::default(),
        FileSnapshotWriter::new(&missing),
    )
    .unwrap();

    monitor.tick().unwrap();
    monitor.dispatch(Action::Save).unwrap();

    assert!(monitor.state().is_running());
    assert!(monitor.display().saw("✗ Save failed"));
}

/// Sample, sample, save, fail to sample, quit.
#[test]
fn test_full_session() {
    let dir = tempfile::tempdir().unwrap();
    let t0 = Instant::now();
    let source = ScriptedSource::new([
        eth0(t0, 0, 0),
        eth0(t0 + Duration::from_secs(1), 1024, 1024),
    ]);
    let keys = ScriptedKeys::new([
        None,
        Some(Keystroke::Char('s')),
        Some(Keystroke::Char('x')),
        Some(Keystroke::Char('q')),
    ]);
    let mut monitor = monitor(dir.path(), source, keys);

    monitor.run().unwrap();

    assert!(!monitor.state().is_running());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    let display = monitor.display();
    assert!(display.saw("Rate: ↑1.0 KB/s ↓1.0 KB/s"));
    assert!(display.saw("STATUS: NO DATA"));
    assert!(display.saw("Exiting..."));
    assert!(!display.saw("Monitoring stopped"));
}

/// Ctrl+C in raw mode arrives as a keystroke and stops the loop.
#[test]
fn test_ctrl_c_stops_loop() {
    let dir = tempfile::tempdir().unwrap();
    let source = ScriptedSource::new([eth0(Instant::now(), 0, 0)]);
    let keys = ScriptedKeys::new([Some(Keystroke::Interrupt)]);
    let mut monitor = monitor(dir.path(), source, keys);

    monitor.run().unwrap();

    assert!(!monitor.state().is_running());
    assert!(monitor.display().saw("Monitoring stopped"));
}

/// Loopback traffic is never shown or flagged.
#[test]
fn test_loopback_hidden() {
    let dir = tempfile::tempdir().unwrap();
    let t0 = Instant::now();
    let lo = |at, sent| -> Snapshot {
        [
            InterfaceCounters::new("lo", at).bytes(sent, sent).errors(5, 5),
            InterfaceCounters::new("eth0", at),
        ]
        .into_iter()
        .collect()
    };
    let source = ScriptedSource::new([
        lo(t0, 0),
        lo(t0 + Duration::from_secs(1), 50 * 1024 * 1024),
    ]);
    let mut monitor = monitor(dir.path(), source, ScriptedKeys::default());

    monitor.tick().unwrap();
    let TickReport::Sampled { problems, .. } = monitor.tick().unwrap() else {
        panic!("second tick should sample");
    };

    assert!(problems.is_empty());
    assert!(!monitor.display().saw("lo ("));
}
