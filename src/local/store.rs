//! Local Store Module
//!
//! The bounded L1 store: a map with a fixed per-store TTL, an entry-count
//! bound enforced by insertion-order eviction, and hit/miss accounting.
//!
//! The local tier is defined to never fail: running out of room evicts,
//! expired entries degrade to misses, and no operation returns an error.

use std::collections::{HashMap, VecDeque};

use crate::local::{L1Entry, L1Stats};
use crate::remote::Value;

// == L1 Lookup ==
/// Lookup result distinguishing "absent" from "present with an empty value".
/// A stored empty byte string is a `Hit`, never collapsed into `Miss`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum L1Lookup {
    /// A live entry was found
    Hit(Value),
    /// No live entry for the key
    Miss,
}

// == Local Cache ==
/// Bounded in-process store with a fixed TTL per entry.
#[derive(Debug)]
pub struct LocalCache {
    /// Key-value storage
    entries: HashMap<String, L1Entry>,
    /// Insertion order, oldest at the front; re-inserted keys move to the back
    order: VecDeque<String>,
    /// Performance counters
    stats: L1Stats,
    /// Maximum number of entries before eviction
    max_entries: usize,
    /// TTL in seconds applied to every entry
    ttl_secs: u64,
}

impl LocalCache {
    // == Constructor ==
    /// Creates a store holding at most `max_entries` entries, each expiring
    /// `ttl_secs` after insertion.
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            stats: L1Stats::default(),
            max_entries: max_entries.max(1),
            ttl_secs,
        }
    }

    // == Get ==
    /// Looks up a live entry. Expired entries are dropped and reported as a
    /// miss.
    pub fn get(&mut self, key: &str) -> L1Lookup {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.drop_key(key);
                self.stats.record_miss();
                L1Lookup::Miss
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                L1Lookup::Hit(value)
            }
            None => {
                self.stats.record_miss();
                L1Lookup::Miss
            }
        }
    }

    // == Insert ==
    /// Stores a value under the store-wide TTL, evicting when at capacity.
    /// Overwriting a key resets its TTL and moves it to the back of the
    /// eviction order.
    pub fn insert(&mut self, key: String, value: Value) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            // Prefer reclaiming dead entries over evicting live ones
            if self.purge_expired() == 0 {
                self.evict_oldest();
            }
        }

        self.entries
            .insert(key.clone(), L1Entry::new(value, self.ttl_secs));

        if is_overwrite {
            self.order.retain(|k| k != &key);
        }
        self.order.push_back(key);
    }

    // == Remove ==
    /// Removes an entry; true when a live or expired entry existed.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    // == Contains ==
    /// Presence check for a live entry. Expired entries are dropped and do
    /// not count. Does not touch hit/miss accounting.
    pub fn contains(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.drop_key(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    // == Refresh ==
    /// Resets the TTL of an existing live entry; never creates one.
    /// Returns true when an entry was refreshed.
    pub fn refresh(&mut self, key: &str) -> bool {
        let ttl_secs = self.ttl_secs;
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.refresh(ttl_secs);
                true
            }
            _ => false,
        }
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
        }
        if !expired.is_empty() {
            self.order.retain(|k| !expired.contains(k));
        }
        expired.len()
    }

    // == Stats ==
    /// Current counters with a live entry count.
    pub fn stats(&self) -> L1Stats {
        let mut stats = self.stats.clone();
        stats.entries = self.entries.len();
        stats
    }

    // == Length ==
    /// Current number of entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -- internals --

    fn drop_key(&mut self, key: &str) {
        self.entries.remove(key);
        self.order.retain(|k| k != key);
    }

    fn evict_oldest(&mut self) {
        while let Some(key) = self.order.pop_front() {
            if self.entries.remove(&key).is_some() {
                self.stats.record_eviction();
                return;
            }
        }
    }
}
