//! Tiercache - a two-tier caching layer
//!
//! Puts a bounded, short-TTL in-process mirror (L1) in front of a remote
//! key-value store (L2) and prevents cache stampedes with XFetch
//! probabilistic early expiration.
//!
//! The L2 store is an external collaborator consumed through the
//! [`RemoteCache`] trait; this crate never implements the store itself.

pub mod blocking;
pub mod config;
pub mod error;
pub mod local;
pub mod readthrough;
pub mod remote;
pub mod stampede;
pub mod tasks;
pub mod tiered;

pub use blocking::BlockingCache;
pub use config::Config;
pub use error::{CacheError, Result};
pub use readthrough::get_or_compute;
pub use remote::{RemoteCache, SetOptions, SetOutcome, Value};
pub use stampede::{
    physical_timeout_secs, unwrap_envelope, wrap_envelope, RecomputationScope, StampedeConfig,
    ENVELOPE_MARKER, HEADER_SIZE,
};
pub use tasks::spawn_l1_cleanup;
pub use tiered::TieredCache;
