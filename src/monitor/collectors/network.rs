//! Per-interface network counter collector.
//!
//! Counters come from `/proc/net/dev` on Linux and `netstat -ib` on macOS.
//! Link state comes from the interface address table: an interface counts as
//! up when it has at least one IPv4 or IPv6 address assigned.

use crate::monitor::error::{MonitorError, Result};
#[cfg(target_os = "macos")]
use crate::monitor::subprocess::run_with_timeout;
use crate::monitor::types::{CounterSource, InterfaceCounters, Snapshot};
use std::collections::HashSet;
use std::time::Instant;

const SOURCE_ID: &str = "network";

/// Raw counters for one interface before link state is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetStats {
    /// Interface name.
    pub name: String,
    /// Bytes received.
    pub rx_bytes: u64,
    /// Receive errors.
    pub rx_errors: u64,
    /// Bytes transmitted.
    pub tx_bytes: u64,
    /// Transmit errors.
    pub tx_errors: u64,
}

impl NetStats {
    /// Attaches link state and a timestamp.
    #[must_use]
    pub fn into_counters(self, is_up: bool, sampled_at: Instant) -> InterfaceCounters {
        InterfaceCounters {
            name: self.name,
            is_up,
            bytes_sent: self.tx_bytes,
            bytes_received: self.rx_bytes,
            errors_in: self.rx_errors,
            errors_out: self.tx_errors,
            sampled_at,
        }
    }
}

/// Parses the contents of `/proc/net/dev`.
///
/// Two header lines, then one line per interface:
/// `name: rx_bytes rx_packets rx_errs rx_drop ... tx_bytes tx_packets tx_errs ...`
/// Malformed lines are skipped.
#[must_use]
pub fn parse_proc_net_dev(content: &str) -> Vec<NetStats> {
    let mut stats = Vec::new();

    for line in content.lines().skip(2) {
        let Some((name, fields)) = line.trim().split_once(':') else {
            continue;
        };

        let values: Vec<u64> = fields
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect();

        if values.len() < 16 {
            continue;
        }

        stats.push(NetStats {
            name: name.trim().to_string(),
            rx_bytes: values[0],
            rx_errors: values[2],
            tx_bytes: values[8],
            tx_errors: values[10],
        });
    }

    stats
}

/// Parses `netstat -ib` output.
///
/// Only link-level rows (`<Link#N>`) carry per-interface totals. Columns are
/// read from the right because the Address column is empty for interfaces
/// without a hardware address:
/// `... Ipkts Ierrs Ibytes Opkts Oerrs Obytes Coll`
#[must_use]
pub fn parse_netstat_ib(content: &str) -> Vec<NetStats> {
    let mut stats: Vec<NetStats> = Vec::new();

    for line in content.lines().skip(1) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 10 || !parts.iter().any(|p| p.starts_with("<Link#")) {
            continue;
        }

        let n = parts.len();
        let column = |offset: usize| parts[n - offset].parse::<u64>().ok();
        let (Some(ierrs), Some(ibytes), Some(oerrs), Some(obytes)) =
            (column(6), column(5), column(3), column(2))
        else {
            continue;
        };

        let name = parts[0].trim_end_matches('*').to_string();
        if stats.iter().any(|s| s.name == name) {
            continue;
        }

        stats.push(NetStats {
            name,
            rx_bytes: ibytes,
            rx_errors: ierrs,
            tx_bytes: obytes,
            tx_errors: oerrs,
        });
    }

    stats
}

/// Names of interfaces that currently have an address assigned.
fn addressed_interfaces() -> HashSet<String> {
    netdev::get_interfaces()
        .into_iter()
        .filter(|iface| !iface.ipv4.is_empty() || !iface.ipv6.is_empty())
        .map(|iface| iface.name)
        .collect()
}

/// Builds a snapshot from raw counters and the set of addressed interfaces.
#[must_use]
pub fn build_snapshot(
    stats: Vec<NetStats>,
    addressed: &HashSet<String>,
    sampled_at: Instant,
) -> Snapshot {
    stats
        .into_iter()
        .map(|s| {
            let is_up = addressed.contains(&s.name);
            s.into_counters(is_up, sampled_at)
        })
        .collect()
}

/// Counter source for network interfaces.
#[derive(Debug, Default)]
pub struct NetworkCollector {
    _private: (),
}

impl NetworkCollector {
    /// Creates a new network collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(target_os = "linux")]
    fn read_counters(&self) -> Result<Vec<NetStats>> {
        let content = std::fs::read_to_string("/proc/net/dev").map_err(|e| {
            MonitorError::AcquisitionFailed {
                source_id: SOURCE_ID,
                message: format!("failed to read /proc/net/dev: {e}"),
            }
        })?;

        Ok(parse_proc_net_dev(&content))
    }

    #[cfg(target_os = "macos")]
    fn read_counters(&self) -> Result<Vec<NetStats>> {
        let result = run_with_timeout("netstat", &["-ib"], self.timeout_hint());

        let content = result
            .success_stdout()
            .ok_or_else(|| MonitorError::AcquisitionFailed {
                source_id: SOURCE_ID,
                message: format!("netstat -ib {}", result.describe_failure()),
            })?;

        Ok(parse_netstat_ib(&content))
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn read_counters(&self) -> Result<Vec<NetStats>> {
        Err(MonitorError::AcquisitionFailed {
            source_id: SOURCE_ID,
            message: "no counter backend for this platform".to_string(),
        })
    }
}

impl CounterSource for NetworkCollector {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    fn snapshot(&mut self) -> Result<Snapshot> {
        let stats = self.read_counters()?;
        let sampled_at = Instant::now();
        let addressed = addressed_interfaces();

        let snapshot = build_snapshot(stats, &addressed, sampled_at);
        log::debug!("sampled {} interfaces", snapshot.len());
        Ok(snapshot)
    }

    fn is_available(&self) -> bool {
        #[cfg(target_os = "linux")]
        {
            std::path::Path::new("/proc/net/dev").exists()
        }
        #[cfg(target_os = "macos")]
        {
            true
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            false
        }
    }
}
