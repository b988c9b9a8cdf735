//! Blocking Surface Module
//!
//! A thin synchronous wrapper over [`TieredCache`]. Every operation has one
//! async implementation; the blocking calling convention is derived by
//! driving that same future to completion on a runtime handle rather than
//! hand-duplicating each method body.
//!
//! Must be used from outside the runtime: calling these methods from within
//! an async context panics, as `Handle::block_on` does.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::error::Result;
use crate::remote::{RemoteCache, SetOptions, SetOutcome, Value};
use crate::tiered::TieredCache;

// == Blocking Cache ==
/// Blocking facade over a shared [`TieredCache`].
pub struct BlockingCache<R: RemoteCache> {
    inner: Arc<TieredCache<R>>,
    handle: Handle,
}

impl<R: RemoteCache> BlockingCache<R> {
    /// Wraps `inner`, executing its operations on `handle`.
    pub fn new(inner: Arc<TieredCache<R>>, handle: Handle) -> Self {
        Self { inner, handle }
    }

    /// The async cache this facade delegates to.
    pub fn inner(&self) -> &TieredCache<R> {
        &self.inner
    }

    // -- Scalar operations --

    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        self.handle.block_on(self.inner.get(key))
    }

    pub fn set(
        &self,
        key: &str,
        value: Value,
        timeout: Option<u64>,
        options: SetOptions,
    ) -> Result<SetOutcome> {
        self.handle.block_on(self.inner.set(key, value, timeout, options))
    }

    pub fn add(&self, key: &str, value: Value, timeout: Option<u64>) -> Result<bool> {
        self.handle.block_on(self.inner.add(key, value, timeout))
    }

    pub fn delete(&self, key: &str) -> Result<bool> {
        self.handle.block_on(self.inner.delete(key))
    }

    pub fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>> {
        self.handle.block_on(self.inner.get_many(keys))
    }

    pub fn set_many(&self, data: HashMap<String, Value>, timeout: Option<u64>) -> Result<()> {
        self.handle.block_on(self.inner.set_many(data, timeout))
    }

    pub fn delete_many(&self, keys: &[String]) -> Result<u64> {
        self.handle.block_on(self.inner.delete_many(keys))
    }

    pub fn has_key(&self, key: &str) -> Result<bool> {
        self.handle.block_on(self.inner.has_key(key))
    }

    pub fn incr(&self, key: &str, delta: i64) -> Result<i64> {
        self.handle.block_on(self.inner.incr(key, delta))
    }

    pub fn decr(&self, key: &str, delta: i64) -> Result<i64> {
        self.handle.block_on(self.inner.decr(key, delta))
    }

    pub fn touch(&self, key: &str, timeout: Option<u64>) -> Result<bool> {
        self.handle.block_on(self.inner.touch(key, timeout))
    }

    // -- Structural operations --

    pub fn hset(&self, key: &str, field: &str, value: Value) -> Result<bool> {
        self.handle.block_on(self.inner.hset(key, field, value))
    }

    pub fn hget(&self, key: &str, field: &str) -> Result<Option<Value>> {
        self.handle.block_on(self.inner.hget(key, field))
    }

    pub fn hdel(&self, key: &str, fields: &[String]) -> Result<u64> {
        self.handle.block_on(self.inner.hdel(key, fields))
    }

    pub fn lpush(&self, key: &str, values: Vec<Value>) -> Result<u64> {
        self.handle.block_on(self.inner.lpush(key, values))
    }

    pub fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Value>> {
        self.handle.block_on(self.inner.lrange(key, start, stop))
    }

    pub fn sadd(&self, key: &str, members: Vec<Value>) -> Result<u64> {
        self.handle.block_on(self.inner.sadd(key, members))
    }

    pub fn sismember(&self, key: &str, member: &[u8]) -> Result<bool> {
        self.handle.block_on(self.inner.sismember(key, member))
    }

    pub fn zadd(&self, key: &str, score: f64, member: Value) -> Result<u64> {
        self.handle.block_on(self.inner.zadd(key, score, member))
    }

    pub fn zscore(&self, key: &str, member: &[u8]) -> Result<Option<f64>> {
        self.handle.block_on(self.inner.zscore(key, member))
    }

    pub fn xadd(&self, key: &str, fields: Vec<(String, Value)>) -> Result<String> {
        self.handle.block_on(self.inner.xadd(key, fields))
    }

    pub fn xlen(&self, key: &str) -> Result<u64> {
        self.handle.block_on(self.inner.xlen(key))
    }

    // -- Bulk / lifecycle operations --

    pub fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        self.handle.block_on(self.inner.delete_pattern(pattern))
    }

    pub fn clear(&self) -> Result<()> {
        self.handle.block_on(self.inner.clear())
    }

    pub fn close(&self) -> Result<()> {
        self.handle.block_on(self.inner.close())
    }
}
