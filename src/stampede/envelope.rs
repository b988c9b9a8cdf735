//! Envelope Codec Module
//!
//! Pure encode/decode of a fixed-layout binary wrapper around an opaque
//! payload: `marker(4) ‖ logical_expiry_ms(u64 BE) ‖ delta_ms(u32 BE) ‖ payload`.
//!
//! The envelope wraps *after* serialization/compression, so the caller's
//! encode pipeline is unchanged and un-enveloped legacy values pass through
//! the decoder untouched.

use rand::Rng;

use crate::local::current_timestamp_ms;

// == Constants ==
/// Envelope marker: 4 bytes chosen to be invalid as the leading bytes of all
/// supported serialization formats (pickle=0x80, JSON=ASCII, msgpack=0x80+)
/// and all supported compression formats (gzip=0x1f, zlib=0x78, lz4=0x04,
/// lzma=0xfd, zstd=0x28).
pub const ENVELOPE_MARKER: [u8; 4] = [0x00, b'T', b'C', 0x01];

/// Fixed envelope header size: marker + expiry_ms(u64) + delta_ms(u32).
pub const HEADER_SIZE: usize = 4 + 8 + 4;

// == Stampede Config ==
/// Configuration for stampede prevention. Immutable value object.
#[derive(Debug, Clone, PartialEq)]
pub struct StampedeConfig {
    /// Extra TTL seconds added to the remote store expiry so a logically
    /// expired entry stays physically retrievable during recomputation
    pub buffer_secs: u64,
    /// XFetch beta parameter (higher = earlier recompute)
    pub beta: f64,
    /// Default recomputation time estimate in seconds
    pub default_delta_secs: f64,
}

impl Default for StampedeConfig {
    fn default() -> Self {
        Self {
            buffer_secs: 60,
            beta: 1.0,
            default_delta_secs: 1.0,
        }
    }
}

// == Encode ==
/// Wraps encoded value bytes in a stampede prevention envelope.
///
/// `timeout_secs` is the logical timeout and must be positive. `delta_seconds`
/// is the measured recomputation time; `None` falls back to
/// `config.default_delta_secs`.
pub fn wrap_envelope(
    value: &[u8],
    timeout_secs: f64,
    config: &StampedeConfig,
    delta_seconds: Option<f64>,
) -> Vec<u8> {
    debug_assert!(timeout_secs > 0.0, "envelope timeout must be positive");

    let now_ms = current_timestamp_ms();
    let logical_expiry_ms = now_ms + (timeout_secs * 1000.0).round() as u64;
    let delta = delta_seconds.unwrap_or(config.default_delta_secs);
    let delta_ms = (delta * 1000.0).round() as u32;

    let mut out = Vec::with_capacity(HEADER_SIZE + value.len());
    out.extend_from_slice(&ENVELOPE_MARKER);
    out.extend_from_slice(&logical_expiry_ms.to_be_bytes());
    out.extend_from_slice(&delta_ms.to_be_bytes());
    out.extend_from_slice(value);
    out
}

// == Decode ==
/// Unwraps an envelope, returning the payload and whether to recompute.
///
/// Bytes without the marker prefix, or shorter than the fixed header, are
/// treated as a legacy non-enveloped value and returned unchanged with
/// `false` - never an error.
pub fn unwrap_envelope<'a>(raw: &'a [u8], config: &StampedeConfig) -> (&'a [u8], bool) {
    // thread_rng yields [0, 1); flip to (0, 1] so ln() is defined
    let draw = 1.0 - rand::thread_rng().gen::<f64>();
    unwrap_at(raw, config, current_timestamp_ms(), draw)
}

/// Decode against an explicit clock and random draw.
fn unwrap_at<'a>(
    raw: &'a [u8],
    config: &StampedeConfig,
    now_ms: u64,
    draw: f64,
) -> (&'a [u8], bool) {
    if !raw.starts_with(&ENVELOPE_MARKER) || raw.len() < HEADER_SIZE {
        return (raw, false);
    }

    let mut expiry_buf = [0u8; 8];
    expiry_buf.copy_from_slice(&raw[4..12]);
    let logical_expiry_ms = u64::from_be_bytes(expiry_buf);

    let mut delta_buf = [0u8; 4];
    delta_buf.copy_from_slice(&raw[12..16]);
    let delta_ms = u32::from_be_bytes(delta_buf);

    let payload = &raw[HEADER_SIZE..];
    let remaining_ms = logical_expiry_ms as i64 - now_ms as i64;

    // Hard expiry: serve the stale payload, caller triggers a recompute
    if remaining_ms <= 0 {
        return (payload, true);
    }

    // XFetch: ln(draw) <= 0 for draw in (0, 1], so the threshold is <= 0 and
    // the early-recompute probability rises smoothly as remaining_ms
    // approaches delta_ms * beta
    if delta_ms > 0 {
        let threshold = delta_ms as f64 * config.beta * draw.ln();
        if remaining_ms as f64 + threshold <= 0.0 {
            return (payload, true);
        }
    }

    (payload, false)
}

// == Physical Timeout ==
/// Remote-store TTL for an enveloped value: the logical timeout plus the
/// configured buffer, so the key outlives its logical deadline.
pub fn physical_timeout_secs(timeout_secs: f64, config: &StampedeConfig) -> u64 {
    timeout_secs.ceil() as u64 + config.buffer_secs
}
