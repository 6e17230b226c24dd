//! Seed node bookkeeping
//!
//! Networking bootstraps from two sources supplied by the active profile:
//! - DNS seeds: hostnames resolving to known good nodes
//! - Fixed seeds: literal addresses, externally supplied via a config file

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// One week in seconds
const ONE_WEEK: i64 = 7 * 24 * 60 * 60;

// =============================================================================
// Seed Types
// =============================================================================

/// A DNS seed entry: a hostname that resolves to known good nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSeed {
    /// Short label used in logs
    pub name: String,
    /// Hostname to resolve
    pub host: String,
}

impl DnsSeed {
    pub fn new(name: &str, host: &str) -> Self {
        Self {
            name: name.to_string(),
            host: host.to_string(),
        }
    }
}

/// A fixed seed address with a staleness timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAddress {
    /// Socket address of the seed node
    pub addr: SocketAddr,
    /// When this address was last seen (Unix seconds)
    pub last_seen: i64,
}

impl SeedAddress {
    /// Record a configured seed as last seen one to two weeks before `now`,
    /// so the address manager does not prefer it over recently-seen peers.
    pub fn stale(addr: SocketAddr, now: i64) -> Self {
        let jitter = rand::thread_rng().gen_range(0..ONE_WEEK);
        Self {
            addr,
            last_seen: now - jitter - ONE_WEEK,
        }
    }
}

// =============================================================================
// Fixed-Seed Configuration
// =============================================================================

/// Errors loading the fixed-seed configuration file
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid seed address: {0}")]
    Addr(String),
}

/// Load fixed seed addresses from a JSON file containing an array of
/// `"ip:port"` strings.
pub fn load_fixed_seeds(path: &Path) -> Result<Vec<SocketAddr>, SeedError> {
    let data = fs::read_to_string(path)?;
    let entries: Vec<String> = serde_json::from_str(&data)?;

    entries
        .iter()
        .map(|entry| {
            entry
                .parse::<SocketAddr>()
                .map_err(|_| SeedError::Addr(entry.clone()))
        })
        .collect()
}
