//! Error types for the caching layer
//!
//! Provides unified error handling using thiserror.
//!
//! Every error originates in the remote (L2) backend and propagates through
//! the tiered cache unchanged. The local (L1) store has no error kind of its
//! own: any local resource issue degrades to a cache miss.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Backend is unreachable or the connection dropped
    #[error("backend connection error: {0}")]
    Connection(String),

    /// Backend rejected or failed the operation
    #[error("backend error: {0}")]
    Backend(String),

    /// Increment/decrement on a value that is not an integer
    #[error("value is not an integer: {0}")]
    NotAnInteger(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
