//! Stampede Prevention Module
//!
//! Implements the XFetch algorithm (Vattani et al., VLDB 2015) for cache
//! stampede prevention. Values are wrapped in a lightweight binary envelope
//! carrying logical expiry and recomputation time metadata; a per-scope
//! tracker measures how long recomputations actually take.

mod envelope;
mod tracker;

// Re-export public types
pub use envelope::{
    physical_timeout_secs, unwrap_envelope, wrap_envelope, StampedeConfig, ENVELOPE_MARKER,
    HEADER_SIZE,
};
pub use tracker::RecomputationScope;
