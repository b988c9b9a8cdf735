//! L1 Entry Module
//!
//! A single local cache entry: value bytes plus insertion and expiry times.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::remote::Value;

// == L1 Entry ==
/// A mirrored value with its local lifetime. Every L1 entry expires; the TTL
/// is the store-wide L1 timeout, not the remote timeout of the value.
#[derive(Debug, Clone)]
pub struct L1Entry {
    /// The mirrored value bytes
    pub value: Value,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl L1Entry {
    /// Creates an entry expiring `ttl_secs` from now.
    pub fn new(value: Value, ttl_secs: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            inserted_at: now,
            expires_at: now + ttl_secs * 1000,
        }
    }

    /// An entry is expired once the current time reaches its expiry.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    /// Pushes the expiry `ttl_secs` from now, keeping the insertion time.
    pub fn refresh(&mut self, ttl_secs: u64) {
        self.expires_at = current_timestamp_ms() + ttl_secs * 1000;
    }

    /// Remaining lifetime in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
