//! Remote Cache Interface
//!
//! Trait seam for the remote key-value store (L2). The store itself — wire
//! protocol, connection management, value serialization — is an external
//! collaborator; this crate only consumes the surface below and assumes
//! standard key-value-cache semantics for each operation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

// == Value Type ==
/// Cache values are opaque, already-serialized bytes.
pub type Value = Vec<u8>;

// == Set Options ==
/// Conditional-write options for `set`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Store only if the key is absent (NX)
    pub only_if_absent: bool,
    /// Store only if the key is present (XX)
    pub only_if_present: bool,
    /// Return the prior value instead of a stored/not-stored signal
    pub return_previous: bool,
}

// == Set Outcome ==
/// Result of a `set` as reported by the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// The new value was stored
    Stored,
    /// A conditional write did not store the value
    NotStored,
    /// The prior value, as requested via `return_previous`. Combined with a
    /// conditional write this does not reveal whether the new value was
    /// actually stored.
    Previous(Option<Value>),
}

impl SetOutcome {
    /// True only when the store was positively confirmed.
    pub fn stored(&self) -> bool {
        matches!(self, SetOutcome::Stored)
    }
}

// == Remote Cache Trait ==
/// Operation surface consumed from the remote store.
///
/// All operations are suspendable; the blocking calling convention is layered
/// on top by [`crate::blocking::BlockingCache`]. Implementations report
/// failures as [`crate::error::CacheError`], which the tiered cache propagates
/// unchanged.
#[async_trait]
pub trait RemoteCache: Send + Sync {
    // -- Scalar operations --

    /// Fetch a single value, `None` on miss.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store a value, optionally conditionally. `timeout` is seconds, `None`
    /// means no expiry.
    async fn set(
        &self,
        key: &str,
        value: Value,
        timeout: Option<u64>,
        options: SetOptions,
    ) -> Result<SetOutcome>;

    /// Store only if absent; true when the value was added.
    async fn add(&self, key: &str, value: Value, timeout: Option<u64>) -> Result<bool>;

    /// Remove a key; true when it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Fetch many keys; missing keys are absent from the result.
    async fn get_many(&self, keys: &[String]) -> Result<HashMap<String, Value>>;

    /// Store many pairs with one timeout.
    async fn set_many(&self, data: HashMap<String, Value>, timeout: Option<u64>) -> Result<()>;

    /// Remove many keys, returning how many existed.
    async fn delete_many(&self, keys: &[String]) -> Result<u64>;

    /// Existence check without fetching the value.
    async fn has_key(&self, key: &str) -> Result<bool>;

    /// Atomically add `delta` to an integer value, returning the new value.
    async fn incr(&self, key: &str, delta: i64) -> Result<i64>;

    /// Reset a key's expiry; true when the key existed.
    async fn touch(&self, key: &str, timeout: Option<u64>) -> Result<bool>;

    // -- Bulk / lifecycle operations --

    /// Remove every key in the store.
    async fn clear(&self) -> Result<()>;

    /// Remove keys matching a glob-style pattern, returning the count.
    async fn delete_pattern(&self, pattern: &str) -> Result<u64>;

    /// Tear down connections.
    async fn close(&self) -> Result<()>;

    // -- Structural operations (hashes, lists, sets, sorted sets, streams) --

    /// Set a hash field; true when the field is new.
    async fn hset(&self, key: &str, field: &str, value: Value) -> Result<bool>;

    /// Fetch a hash field.
    async fn hget(&self, key: &str, field: &str) -> Result<Option<Value>>;

    /// Remove hash fields, returning how many existed.
    async fn hdel(&self, key: &str, fields: &[String]) -> Result<u64>;

    /// Prepend values to a list, returning the new length.
    async fn lpush(&self, key: &str, values: Vec<Value>) -> Result<u64>;

    /// Fetch a list slice by inclusive indices (negative from the end).
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Value>>;

    /// Add members to a set, returning how many were new.
    async fn sadd(&self, key: &str, members: Vec<Value>) -> Result<u64>;

    /// Set membership test.
    async fn sismember(&self, key: &str, member: &[u8]) -> Result<bool>;

    /// Add a scored member to a sorted set, returning how many were new.
    async fn zadd(&self, key: &str, score: f64, member: Value) -> Result<u64>;

    /// Fetch a sorted-set member's score.
    async fn zscore(&self, key: &str, member: &[u8]) -> Result<Option<f64>>;

    /// Append an entry to a stream, returning its id.
    async fn xadd(&self, key: &str, fields: Vec<(String, Value)>) -> Result<String>;

    /// Stream length.
    async fn xlen(&self, key: &str) -> Result<u64>;
}
