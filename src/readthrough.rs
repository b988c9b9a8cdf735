//! Read-Through Module
//!
//! The read/recompute/write call pattern that consumes the envelope codec
//! and recomputation tracker: read the cache, recompute on miss or stampede
//! trigger, write the fresh value back inside a new envelope whose delta
//! estimate is the recomputation time just measured.

use std::future::Future;

use tracing::trace;

use crate::error::Result;
use crate::remote::{RemoteCache, SetOptions, Value};
use crate::stampede::{
    physical_timeout_secs, unwrap_envelope, wrap_envelope, RecomputationScope,
};
use crate::tiered::TieredCache;

// == Get Or Compute ==
/// Fetches `key` through the tiered cache, recomputing with `compute` when
/// the key is missing, logically expired, or probabilistically selected for
/// early recomputation by XFetch.
///
/// The recomputed value is wrapped in a fresh envelope carrying the measured
/// recomputation time and stored with the buffered physical timeout, so it
/// stays retrievable-but-stale past its logical deadline while the next
/// recomputation runs.
///
/// `scope` must be owned by the calling execution context; sharing one scope
/// across concurrent callers would let their timing measurements collide.
pub async fn get_or_compute<R, F, Fut>(
    cache: &TieredCache<R>,
    scope: &mut RecomputationScope,
    key: &str,
    timeout_secs: f64,
    compute: F,
) -> Result<Value>
where
    R: RemoteCache,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    let stampede = cache.config().stampede.clone();

    if let Some(raw) = cache.get(key).await? {
        let (payload, recompute) = unwrap_envelope(&raw, &stampede);
        if !recompute {
            return Ok(payload.to_vec());
        }
        trace!(key, "stale or early-expired value, recomputing");
    }

    scope.record_start(key);
    let value = compute().await?;
    let delta = scope.take_delta(key);

    let enveloped = wrap_envelope(&value, timeout_secs, &stampede, delta);
    let physical = physical_timeout_secs(timeout_secs, &stampede);
    cache
        .set(key, enveloped, Some(physical), SetOptions::default())
        .await?;

    Ok(value)
}
