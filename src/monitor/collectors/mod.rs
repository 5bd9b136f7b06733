//! Counter sources.

pub mod network;

pub use network::{NetStats, NetworkCollector};
