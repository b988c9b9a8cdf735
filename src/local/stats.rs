//! L1 Statistics Module
//!
//! Tracks local-tier performance counters: hits, misses, and evictions.

use serde::Serialize;

// == L1 Stats ==
/// Local cache performance counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct L1Stats {
    /// Reads served from the local tier
    pub hits: u64,
    /// Reads that fell through to the remote tier
    pub misses: u64,
    /// Entries dropped to stay within the entry bound
    pub evictions: u64,
    /// Current number of live entries
    pub entries: usize,
}

impl L1Stats {
    // == Hit Rate ==
    /// Local hit rate: hits / (hits + misses), 0.0 with no reads.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Recorders ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
