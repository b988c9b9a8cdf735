//! Tiered Cache Orchestrator
//!
//! Composes the local L1 store with a remote L2 backend behind the same
//! operation surface as the remote store, so it drops in for a plain L2-only
//! client. Scalar point operations are accelerated through L1; structural
//! operations bypass it; bulk/pattern operations clear it wholesale.
//!
//! Consistency contract: L1 never holds a value strictly newer than L2. A
//! value is mirrored only after L2 confirmed the write, and every
//! invalidating mutation evicts the local entry, so local staleness is
//! bounded by the L1 TTL. All failures originate in L2 and propagate
//! unchanged; the local tier never errors.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::Result;
use crate::local::{L1Lookup, L1Stats, LocalCache};
use crate::remote::{RemoteCache, SetOptions, SetOutcome, Value};

// == Tiered Cache ==
/// Two-tier cache: exclusive L1 ownership, shared L2 reference.
pub struct TieredCache<R: RemoteCache> {
    /// In-process mirror, serialized behind a mutex. Accessed only between
    /// suspension points, never across them.
    l1: Mutex<LocalCache>,
    /// Remote backend, the authority for every value
    l2: Arc<R>,
    config: Config,
}

impl<R: RemoteCache> TieredCache<R> {
    // == Constructor ==
    /// Creates a tiered cache in front of `l2`.
    pub fn new(l2: Arc<R>, config: Config) -> Self {
        let l1 = LocalCache::new(config.l1_max_entries, config.l1_ttl_secs);
        Self {
            l1: Mutex::new(l1),
            l2,
            config,
        }
    }

    /// Configuration this cache was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // -- L1 access helpers; the guard never crosses an await --

    fn l1(&self) -> MutexGuard<'_, LocalCache> {
        self.l1.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn l1_insert(&self, key: &str, value: &Value) {
        self.l1().insert(key.to_string(), value.clone());
    }

    fn l1_remove(&self, key: &str) {
        self.l1().remove(key);
    }

    fn l1_clear(&self) {
        self.l1().clear();
    }

    // =========================================================================
    // Scalar operations — L1 + L2
    // =========================================================================

    // == Get ==
    /// Fetches a value: L1 first, falling through to L2 on miss. An L2 hit
    /// repopulates L1 under the fixed L1 TTL; an L2 miss touches nothing.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        if let L1Lookup::Hit(value) = self.l1().get(key) {
            trace!(key, "l1 hit");
            return Ok(Some(value));
        }
        match self.l2.get(key).await? {
            Some(value) => {
                trace!(key, "l1 miss, l2 hit");
                self.l1_insert(key, &value);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // == Set ==
    /// Writes to L2, then mirrors into L1 only when the outcome is
    /// unambiguous: a plain write, or a conditional write confirmed as
    /// stored. A conditional write that also asks for the prior value back
    /// cannot confirm a store from its return signal alone, so that
    /// combination never touches L1 and the next read falls through to L2.
    pub async fn set(
        &self,
        key: &str,
        value: Value,
        timeout: Option<u64>,
        options: SetOptions,
    ) -> Result<SetOutcome> {
        let outcome = self.l2.set(key, value.clone(), timeout, options).await?;

        let conditional = options.only_if_absent || options.only_if_present;
        if conditional {
            if !options.return_previous && outcome.stored() {
                self.l1_insert(key, &value);
            }
        } else {
            self.l1_insert(key, &value);
        }
        Ok(outcome)
    }

    // == Add ==
    /// Store-if-absent; mirrors into L1 only when L2 reports the value was
    /// actually added.
    pub async fn add(&self, key: &str, value: Value, timeout: Option<u64>) -> Result<bool> {
        let added = self.l2.add(key, value.clone(), timeout).await?;
        if added {
            self.l1_insert(key, &value);
        }
        Ok(added)
    }

    // == Delete ==
    /// Evicts L1 unconditionally, then deletes from L2.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.l1_remove(key);
        self.l2.delete(key).await
    }

    // == Get Many ==
    /// Serves what L1 holds and fetches only the misses from L2,
    /// repopulating L1 with each fetched pair.
    pub async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>> {
        let mut results = HashMap::new();
        let mut missed: Vec<String> = Vec::new();
        {
            let mut l1 = self.l1();
            for key in keys {
                match l1.get(key) {
                    L1Lookup::Hit(value) => {
                        results.insert(key.clone(), value);
                    }
                    L1Lookup::Miss => missed.push(key.clone()),
                }
            }
        }

        if missed.is_empty() {
            return Ok(results);
        }
        trace!(hits = results.len(), misses = missed.len(), "get_many partition");

        let fetched = self.l2.get_many(&missed).await?;
        {
            let mut l1 = self.l1();
            for (key, value) in &fetched {
                l1.insert(key.clone(), value.clone());
            }
        }
        results.extend(fetched);
        Ok(results)
    }

    // == Set Many ==
    /// Writes the batch to L2 first; mirrors into L1 only once the whole
    /// batch succeeded, so a failed or cancelled L2 call leaves L1 untouched.
    pub async fn set_many(&self, data: HashMap<String, Value>, timeout: Option<u64>) -> Result<()> {
        self.l2.set_many(data.clone(), timeout).await?;

        let mut l1 = self.l1();
        for (key, value) in data {
            l1.insert(key, value);
        }
        Ok(())
    }

    // == Delete Many ==
    /// Evicts each key from L1, then deletes the batch from L2.
    pub async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        {
            let mut l1 = self.l1();
            for key in keys {
                l1.remove(key);
            }
        }
        self.l2.delete_many(keys).await
    }

    // == Has Key ==
    /// Existence check, answered from L1 when it holds a live entry.
    pub async fn has_key(&self, key: &str) -> Result<bool> {
        if self.l1().contains(key) {
            return Ok(true);
        }
        self.l2.has_key(key).await
    }

    // == Incr / Decr ==
    /// Evicts the L1 entry before the remote increment: the post-mutation
    /// value is not cheaply known locally, so the next read repopulates from
    /// L2.
    pub async fn incr(&self, key: &str, delta: i64) -> Result<i64> {
        self.l1_remove(key);
        self.l2.incr(key, delta).await
    }

    /// Decrement; same L1 eviction rule as [`Self::incr`].
    pub async fn decr(&self, key: &str, delta: i64) -> Result<i64> {
        self.l1_remove(key);
        self.l2.incr(key, -delta).await
    }

    // == Touch ==
    /// Refreshes the remote expiry; on success also refreshes the L1 entry's
    /// own TTL, but only if one already exists — never creates one.
    pub async fn touch(&self, key: &str, timeout: Option<u64>) -> Result<bool> {
        let touched = self.l2.touch(key, timeout).await?;
        if touched {
            self.l1().refresh(key);
        }
        Ok(touched)
    }

    // =========================================================================
    // Structural operations — bypass L1
    // =========================================================================
    // Partial mutation of a compound value cannot be mirrored into an
    // independently-bounded local copy without reimplementing the whole
    // mutation protocol, so these delegate straight to L2.

    /// Set a hash field. Bypasses L1.
    pub async fn hset(&self, key: &str, field: &str, value: Value) -> Result<bool> {
        self.l2.hset(key, field, value).await
    }

    /// Fetch a hash field. Bypasses L1.
    pub async fn hget(&self, key: &str, field: &str) -> Result<Option<Value>> {
        self.l2.hget(key, field).await
    }

    /// Remove hash fields. Bypasses L1.
    pub async fn hdel(&self, key: &str, fields: &[String]) -> Result<u64> {
        self.l2.hdel(key, fields).await
    }

    /// Prepend to a list. Bypasses L1.
    pub async fn lpush(&self, key: &str, values: Vec<Value>) -> Result<u64> {
        self.l2.lpush(key, values).await
    }

    /// Fetch a list slice. Bypasses L1.
    pub async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Value>> {
        self.l2.lrange(key, start, stop).await
    }

    /// Add set members. Bypasses L1.
    pub async fn sadd(&self, key: &str, members: Vec<Value>) -> Result<u64> {
        self.l2.sadd(key, members).await
    }

    /// Set membership test. Bypasses L1.
    pub async fn sismember(&self, key: &str, member: &[u8]) -> Result<bool> {
        self.l2.sismember(key, member).await
    }

    /// Add a scored sorted-set member. Bypasses L1.
    pub async fn zadd(&self, key: &str, score: f64, member: Value) -> Result<u64> {
        self.l2.zadd(key, score, member).await
    }

    /// Fetch a sorted-set score. Bypasses L1.
    pub async fn zscore(&self, key: &str, member: &[u8]) -> Result<Option<f64>> {
        self.l2.zscore(key, member).await
    }

    /// Append a stream entry. Bypasses L1.
    pub async fn xadd(&self, key: &str, fields: Vec<(String, Value)>) -> Result<String> {
        self.l2.xadd(key, fields).await
    }

    /// Stream length. Bypasses L1.
    pub async fn xlen(&self, key: &str) -> Result<u64> {
        self.l2.xlen(key).await
    }

    // =========================================================================
    // Bulk / pattern operations — clear L1 entirely
    // =========================================================================

    // == Delete Pattern ==
    /// Clears L1 wholesale before delegating: the local store cannot test
    /// arbitrary key patterns against its contents cheaply, and a full clear
    /// only costs re-fetches bounded by the L1 TTL.
    pub async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        debug!(pattern, "pattern delete, clearing l1");
        self.l1_clear();
        self.l2.delete_pattern(pattern).await
    }

    // == Clear ==
    /// Flushes both tiers.
    pub async fn clear(&self) -> Result<()> {
        debug!("clearing both tiers");
        self.l1_clear();
        self.l2.clear().await
    }

    // == Close ==
    /// Drops the local mirror and tears down the remote connection.
    pub async fn close(&self) -> Result<()> {
        self.l1_clear();
        self.l2.close().await
    }

    // =========================================================================
    // L1 introspection and maintenance
    // =========================================================================

    /// Local-tier hit/miss/eviction counters.
    pub fn l1_stats(&self) -> L1Stats {
        self.l1().stats()
    }

    /// Number of entries currently mirrored locally.
    pub fn l1_len(&self) -> usize {
        self.l1().len()
    }

    /// Whether the local tier holds a live entry for `key`.
    pub fn l1_contains(&self, key: &str) -> bool {
        self.l1().contains(key)
    }

    /// Drops expired local entries, returning how many were removed.
    /// Called periodically by [`crate::tasks::spawn_l1_cleanup`].
    pub fn purge_expired(&self) -> usize {
        self.l1().purge_expired()
    }
}
