//! Shared test fixtures: a call-counting in-memory fake of the remote
//! backend, plus tracing setup.

// Each integration test binary compiles its own copy of this module and
// uses a different subset of it.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tiercache::{CacheError, RemoteCache, Result, SetOptions, SetOutcome, Value};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// == Fake Remote State ==
#[derive(Default)]
struct RemoteState {
    kv: HashMap<String, Value>,
    ttls: HashMap<String, Option<u64>>,
    hashes: HashMap<String, HashMap<String, Value>>,
    lists: HashMap<String, Vec<Value>>,
    sets: HashMap<String, HashSet<Value>>,
    zsets: HashMap<String, HashMap<Value, f64>>,
    streams: HashMap<String, Vec<Vec<(String, Value)>>>,
}

// == Counting Remote ==
/// In-memory L2 fake that counts calls per operation so tests can assert
/// which tier served a read, and that can inject failures.
#[derive(Default)]
pub struct CountingRemote {
    state: Mutex<RemoteState>,
    pub get_calls: AtomicUsize,
    pub set_calls: AtomicUsize,
    pub get_many_calls: AtomicUsize,
    pub has_key_calls: AtomicUsize,
    pub last_get_many: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl CountingRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutates the backend out-of-band, bypassing the tiered cache.
    pub fn raw_insert(&self, key: &str, value: Value) {
        let mut state = self.state.lock().unwrap();
        state.kv.insert(key.to_string(), value);
        state.ttls.insert(key.to_string(), None);
    }

    /// Reads the backend out-of-band.
    pub fn raw_get(&self, key: &str) -> Option<Value> {
        self.state.lock().unwrap().kv.get(key).cloned()
    }

    /// The timeout the backend last stored for `key`.
    pub fn ttl_of(&self, key: &str) -> Option<Option<u64>> {
        self.state.lock().unwrap().ttls.get(key).cloned()
    }

    /// Makes every subsequent operation fail with a connection error.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn get_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(CacheError::Connection("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteCache for CountingRemote {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.check()?;
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().unwrap().kv.get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: Value,
        timeout: Option<u64>,
        options: SetOptions,
    ) -> Result<SetOutcome> {
        self.check()?;
        self.set_calls.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock().unwrap();
        let exists = state.kv.contains_key(key);
        let store = if options.only_if_absent {
            !exists
        } else if options.only_if_present {
            exists
        } else {
            true
        };
        let previous = state.kv.get(key).cloned();

        if store {
            state.kv.insert(key.to_string(), value);
            state.ttls.insert(key.to_string(), timeout);
        }

        if options.return_previous {
            Ok(SetOutcome::Previous(previous))
        } else if store {
            Ok(SetOutcome::Stored)
        } else {
            Ok(SetOutcome::NotStored)
        }
    }

    async fn add(&self, key: &str, value: Value, timeout: Option<u64>) -> Result<bool> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if state.kv.contains_key(key) {
            return Ok(false);
        }
        state.kv.insert(key.to_string(), value);
        state.ttls.insert(key.to_string(), timeout);
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.ttls.remove(key);
        Ok(state.kv.remove(key).is_some())
    }

    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>> {
        self.check()?;
        self.get_many_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_get_many.lock().unwrap() = keys.to_vec();

        let state = self.state.lock().unwrap();
        Ok(keys
            .iter()
            .filter_map(|key| state.kv.get(key).map(|v| (key.clone(), v.clone())))
            .collect())
    }

    async fn set_many(&self, data: HashMap<String, Value>, timeout: Option<u64>) -> Result<()> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        for (key, value) in data {
            state.ttls.insert(key.clone(), timeout);
            state.kv.insert(key, value);
        }
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let mut removed = 0;
        for key in keys {
            if state.kv.remove(key).is_some() {
                state.ttls.remove(key);
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn has_key(&self, key: &str) -> Result<bool> {
        self.check()?;
        self.has_key_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().unwrap().kv.contains_key(key))
    }

    async fn incr(&self, key: &str, delta: i64) -> Result<i64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let current = state
            .kv
            .get(key)
            .ok_or_else(|| CacheError::Backend(format!("key not found: {}", key)))?;
        let parsed: i64 = std::str::from_utf8(current)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| CacheError::NotAnInteger(key.to_string()))?;
        let next = parsed + delta;
        state.kv.insert(key.to_string(), next.to_string().into_bytes());
        Ok(next)
    }

    async fn touch(&self, key: &str, timeout: Option<u64>) -> Result<bool> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if state.kv.contains_key(key) {
            state.ttls.insert(key.to_string(), timeout);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn clear(&self) -> Result<()> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        *state = RemoteState::default();
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let matching: Vec<String> = state
            .kv
            .keys()
            .filter(|key| matches_pattern(key, pattern))
            .cloned()
            .collect();
        for key in &matching {
            state.kv.remove(key);
            state.ttls.remove(key);
        }
        Ok(matching.len() as u64)
    }

    async fn close(&self) -> Result<()> {
        self.check()?;
        Ok(())
    }

    async fn hset(&self, key: &str, field: &str, value: Value) -> Result<bool> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let hash = state.hashes.entry(key.to_string()).or_default();
        Ok(hash.insert(field.to_string(), value).is_none())
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<Value>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.hashes.get(key).and_then(|h| h.get(field).cloned()))
    }

    async fn hdel(&self, key: &str, fields: &[String]) -> Result<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let Some(hash) = state.hashes.get_mut(key) else {
            return Ok(0);
        };
        Ok(fields
            .iter()
            .filter(|f| hash.remove(f.as_str()).is_some())
            .count() as u64)
    }

    async fn lpush(&self, key: &str, values: Vec<Value>) -> Result<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let list = state.lists.entry(key.to_string()).or_default();
        for value in values {
            list.insert(0, value);
        }
        Ok(list.len() as u64)
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Value>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let Some(list) = state.lists.get(key) else {
            return Ok(Vec::new());
        };
        let len = list.len() as i64;
        let norm = |i: i64| if i < 0 { i + len } else { i };
        let start = norm(start).max(0);
        let stop = norm(stop).min(len - 1);
        if start > stop || start >= len {
            return Ok(Vec::new());
        }
        Ok(list[start as usize..=stop as usize].to_vec())
    }

    async fn sadd(&self, key: &str, members: Vec<Value>) -> Result<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let set = state.sets.entry(key.to_string()).or_default();
        Ok(members.into_iter().filter(|m| set.insert(m.clone())).count() as u64)
    }

    async fn sismember(&self, key: &str, member: &[u8]) -> Result<bool> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.sets.get(key).is_some_and(|s| s.contains(member)))
    }

    async fn zadd(&self, key: &str, score: f64, member: Value) -> Result<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let zset = state.zsets.entry(key.to_string()).or_default();
        Ok(if zset.insert(member, score).is_none() { 1 } else { 0 })
    }

    async fn zscore(&self, key: &str, member: &[u8]) -> Result<Option<f64>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.zsets.get(key).and_then(|z| z.get(member).copied()))
    }

    async fn xadd(&self, key: &str, fields: Vec<(String, Value)>) -> Result<String> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let stream = state.streams.entry(key.to_string()).or_default();
        stream.push(fields);
        Ok(format!("{}-0", stream.len()))
    }

    async fn xlen(&self, key: &str) -> Result<u64> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.streams.get(key).map_or(0, |s| s.len() as u64))
    }
}

fn matches_pattern(key: &str, pattern: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}
