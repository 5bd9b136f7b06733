//! Snapshot files written on the save command.

use crate::monitor::error::{MonitorError, Result};
use crate::monitor::format::format_bytes;
use crate::monitor::types::Snapshot;
use chrono::{DateTime, Local};
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

/// Destination for saved snapshots.
pub trait SnapshotSink {
    /// Persists `snapshot` as taken at `now` and returns where it went.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceFailed` if the snapshot cannot be written.
    fn write_snapshot(&mut self, now: DateTime<Local>, snapshot: &Snapshot) -> Result<PathBuf>;
}

/// Writes one text file per save into a directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotWriter {
    dir: PathBuf,
}

impl FileSnapshotWriter {
    /// Creates a writer targeting `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory files are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// File name for a snapshot saved at `now`, at second resolution.
#[must_use]
pub fn snapshot_file_name(now: DateTime<Local>) -> String {
    format!("network_stats_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Human-readable file body: a header line, a rule, then one line per
/// interface with its cumulative counters.
#[must_use]
pub fn snapshot_contents(now: DateTime<Local>, snapshot: &Snapshot) -> String {
    let mut body = String::new();

    let _ = writeln!(
        body,
        "Network interface statistics - {}",
        now.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(body, "{}", "=".repeat(50));

    for c in snapshot.visible() {
        let _ = writeln!(
            body,
            "{} ({}): sent={} received={} errors_in={} errors_out={}",
            c.name,
            if c.is_up { "up" } else { "down" },
            format_bytes(c.bytes_sent),
            format_bytes(c.bytes_received),
            c.errors_in,
            c.errors_out
        );
    }

    body
}

impl SnapshotSink for FileSnapshotWriter {
    fn write_snapshot(&mut self, now: DateTime<Local>, snapshot: &Snapshot) -> Result<PathBuf> {
        let path = self.dir.join(snapshot_file_name(now));

        std::fs::write(&path, snapshot_contents(now, snapshot)).map_err(|source| {
            MonitorError::PersistenceFailed {
                path: path.clone(),
                source,
            }
        })?;

        log::info!("snapshot saved to {}", path.display());
        Ok(path)
    }
}
