//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

use crate::stampede::StampedeConfig;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// L1 entry TTL in seconds; bounds how stale a locally served value can be
    pub l1_ttl_secs: u64,
    /// Maximum number of entries the L1 store can hold
    pub l1_max_entries: usize,
    /// Stampede prevention parameters
    pub stampede: StampedeConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TIERED_L1_TIMEOUT` - L1 TTL in seconds (default: 5)
    /// - `TIERED_L1_MAX_ENTRIES` - Maximum L1 entries (default: 1000)
    /// - `STAMPEDE_BUFFER` - Extra physical TTL seconds beyond the logical TTL (default: 60)
    /// - `STAMPEDE_BETA` - XFetch beta, higher triggers recompute earlier (default: 1.0)
    /// - `STAMPEDE_DEFAULT_DELTA` - Fallback recomputation time estimate in seconds (default: 1.0)
    pub fn from_env() -> Self {
        Self {
            l1_ttl_secs: env::var("TIERED_L1_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            l1_max_entries: env::var("TIERED_L1_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            stampede: StampedeConfig {
                buffer_secs: env::var("STAMPEDE_BUFFER")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
                beta: env::var("STAMPEDE_BETA")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1.0),
                default_delta_secs: env::var("STAMPEDE_DEFAULT_DELTA")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1.0),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            l1_ttl_secs: 5,
            l1_max_entries: 1000,
            stampede: StampedeConfig::default(),
        }
    }
}
