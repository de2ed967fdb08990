//! Request timestamp freshness validation.
//!
//! A request timestamp must lie within a symmetric tolerance window around
//! the current wall-clock time: stale requests and requests stamped far in
//! the future (clock skew abuse) are both rejected.
//!
//! # Known Limitation
//!
//! This is a pure freshness check with no state: two byte-identical requests
//! inside the window both pass. Replay protection here is bounded by the
//! window size, not eliminated - there is deliberately no nonce store.

use chrono::Utc;

/// Default tolerance window in seconds (5 minutes).
pub const DEFAULT_TOLERANCE_SECONDS: i64 = 300;

/// Check whether `timestamp_millis` is within `tolerance_seconds` of now.
pub fn is_within_tolerance(timestamp_millis: i64, tolerance_seconds: i64) -> bool {
    is_within_tolerance_at(Utc::now().timestamp_millis(), timestamp_millis, tolerance_seconds)
}

/// Window check against an explicit `now`. Widened to 128-bit arithmetic so
/// adversarial timestamps near `i64` limits cannot overflow the subtraction.
pub(crate) fn is_within_tolerance_at(
    now_millis: i64,
    timestamp_millis: i64,
    tolerance_seconds: i64,
) -> bool {
    let skew = (i128::from(now_millis) - i128::from(timestamp_millis)).unsigned_abs();
    skew <= i128::from(tolerance_seconds).unsigned_abs() * 1000
}
