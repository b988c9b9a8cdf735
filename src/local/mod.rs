//! Local Cache Module (L1)
//!
//! A bounded, independently-TTL'd in-process store used as a short-lived
//! mirror of the remote cache. Strictly process-local; staleness is bounded
//! by its TTL.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, L1Entry};
pub use stats::L1Stats;
pub use store::{L1Lookup, LocalCache};
