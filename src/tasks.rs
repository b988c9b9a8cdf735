//! L1 Cleanup Task
//!
//! Background task that periodically removes expired local-tier entries.
//! The store also reclaims expired entries lazily on access; the sweeper
//! keeps cold keys from pinning memory between accesses.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::remote::RemoteCache;
use crate::tiered::TieredCache;

/// Spawns a background task that purges expired L1 entries every
/// `interval_secs` seconds.
///
/// Returns the task's JoinHandle so it can be aborted during shutdown.
pub fn spawn_l1_cleanup<R>(cache: Arc<TieredCache<R>>, interval_secs: u64) -> JoinHandle<()>
where
    R: RemoteCache + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting l1 cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();
            if removed > 0 {
                info!(removed, "l1 cleanup removed expired entries");
            } else {
                debug!("l1 cleanup found no expired entries");
            }
        }
    })
}
