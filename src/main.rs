//! netmon: terminal network-interface monitor
//!
//! Run: `netmon [--interval SECS] [--config PATH] [--output-dir DIR]`
//!
//! Exit status is 0 after quit or Ctrl+C, 2 when this system exposes no
//! interface counters, and 1 for any other fatal error.

use anyhow::{Context, Result};
use clap::Parser;
use netmon::monitor::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const FOOTER: &str = "Network monitor closed.";

/// netmon: per-interface network traffic and fault monitor
#[derive(Parser, Debug)]
#[command(name = "netmon")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Terminal monitor for network interface traffic and faults", long_about = None)]
struct Cli {
    /// Seconds between samples (overrides the config file)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for saved snapshots (overrides the config file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => {
            println!("{FOOTER}");
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<MonitorError>() {
            Some(MonitorError::CapabilityMissing(source)) => {
                eprintln!("Error: no '{source}' counters are available on this system.");
                eprintln!("netmon reads /proc/net/dev on Linux and `netstat -ib` on macOS.");
                ExitCode::from(2)
            }
            _ => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::new(),
        },
    };

    if let Some(interval) = cli.interval {
        config.global.interval_secs = interval;
    }
    if let Some(dir) = &cli.output_dir {
        config.global.output_dir.clone_from(dir);
    }
    config.validate()?;

    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("failed to install signal handler")?;

    let sink = FileSnapshotWriter::new(&config.global.output_dir);
    let mut monitor = Monitor::new(
        config,
        NetworkCollector::new(),
        TerminalKeys::new(),
        TerminalDisplay::stdout(),
        sink,
    )?
    .with_interrupt_flag(interrupted);

    monitor.announce()?;

    let _raw = RawModeGuard::enable()?;
    monitor.run()?;

    Ok(())
}
