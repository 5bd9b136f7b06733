//! Error types for the network monitor.
//!
//! Only [`MonitorError::CapabilityMissing`] and [`MonitorError::Terminal`]
//! ever stop the sampling loop. Acquisition and persistence failures are
//! reported to the operator and the loop carries on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for monitoring operations.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The counter source cannot run on this system at all.
    #[error("counter source '{0}' is not available on this system")]
    CapabilityMissing(&'static str),

    /// A single acquisition attempt failed.
    #[error("failed to read counters from '{source_id}': {message}")]
    AcquisitionFailed {
        /// The counter source that failed.
        source_id: &'static str,
        /// Error message describing the failure.
        message: String,
    },

    /// Writing a snapshot file failed.
    #[error("failed to write snapshot file {}: {source}", path.display())]
    PersistenceFailed {
        /// The file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },

    /// Terminal input or output failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Result type alias for monitoring operations.
pub type Result<T> = std::result::Result<T, MonitorError>;
