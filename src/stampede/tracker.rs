//! Recomputation Tracker Module
//!
//! Measures how long cache recomputations actually take so the next
//! envelope for a key carries a realistic delta estimate.
//!
//! The scope is an explicit value owned and threaded by the calling
//! read/recompute/write pattern, one per execution context (one per thread
//! in blocking call trees, one per task in async ones), so concurrent
//! recomputations never overwrite each other's measurements. Lost scope
//! state is safe: the encoder falls back to the configured default delta.

use std::collections::HashMap;
use std::time::Instant;

// == Recomputation Scope ==
/// Per-execution-context map from key to recomputation start time.
#[derive(Debug, Default)]
pub struct RecomputationScope {
    pending: HashMap<String, Instant>,
}

impl RecomputationScope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Start ==
    /// Records that a recomputation for this key is starting now.
    pub fn record_start(&mut self, key: &str) {
        self.pending.insert(key.to_string(), Instant::now());
    }

    // == Take Delta ==
    /// Removes and returns the elapsed seconds since `record_start` for this
    /// key, or `None` if no recomputation was recorded in this scope.
    ///
    /// The measurement is consumed: a second call for the same key returns
    /// `None` until the next `record_start`. The caller feeds the result into
    /// the next envelope encode, so each window's estimate reflects the last
    /// actual recomputation cost (last-write-wins).
    pub fn take_delta(&mut self, key: &str) -> Option<f64> {
        self.pending
            .remove(key)
            .map(|start| start.elapsed().as_secs_f64())
    }

    /// Number of recomputations currently being timed.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is being timed.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
