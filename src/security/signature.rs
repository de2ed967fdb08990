//! HMAC-SHA512 request signatures.
//!
//! # Wire Format
//!
//! ```text
//! signature = hex(HMAC_SHA512(secret_key, timestamp_decimal_string + project_token))
//! ```
//!
//! The canonical message is the decimal string form of the timestamp
//! immediately followed by the project token, with no delimiter. Existing
//! clients sign exactly this byte sequence; the concatenation order is part
//! of the wire contract and must not change.
//!
//! # Security Features
//!
//! - **Constant-time comparison**: `verify` never compares secret-derived
//!   bytes with `==`; see [`constant_time_hex_eq`]
//! - **Distinct failure modes**: empty project token or secret key is an
//!   `InvalidArgument` error (a caller-configuration bug), not a `false`
//!   verification result

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::error::{AppError, AppResult};

type HmacSha512 = Hmac<Sha512>;

/// Length of a hex-encoded HMAC-SHA512 digest (64 bytes, two chars each).
pub const SIGNATURE_HEX_LEN: usize = 128;

/// Compute the hex-encoded HMAC-SHA512 signature for a request.
///
/// # Errors
///
/// Returns `AppError::InvalidArgument` when `project_token` or `secret_key`
/// is empty or blank. Both values come from configuration or trusted request
/// extraction, so an empty value here is a caller bug rather than a bad
/// client signature.
pub fn sign(timestamp_millis: i64, project_token: &str, secret_key: &str) -> AppResult<String> {
    if project_token.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "project token must not be empty".to_string(),
        ));
    }
    if secret_key.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "secret key must not be empty".to_string(),
        ));
    }

    let mut mac = HmacSha512::new_from_slice(secret_key.as_bytes())
        .map_err(|e| AppError::Internal(format!("HMAC key initialization failed: {e}")))?;
    mac.update(timestamp_millis.to_string().as_bytes());
    mac.update(project_token.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a client-provided hex signature against the expected one.
///
/// Recomputes the expected signature through [`sign`] - the single source of
/// truth for the canonical signing string - and compares the two encoded
/// byte sequences in constant time.
///
/// # Errors
///
/// Propagates `InvalidArgument` from [`sign`]; a verification mismatch is
/// `Ok(false)`, never an error.
pub fn verify(
    timestamp_millis: i64,
    project_token: &str,
    secret_key: &str,
    provided_hex: &str,
) -> AppResult<bool> {
    let expected = sign(timestamp_millis, project_token, secret_key)?;
    Ok(constant_time_hex_eq(
        expected.as_bytes(),
        provided_hex.as_bytes(),
    ))
}

/// Constant-time equality over two encoded signature byte strings.
///
/// `subtle::ConstantTimeEq` rejects unequal lengths without scanning, so a
/// length mismatch must not take that shortcut: a full-length comparison of
/// `expected` against itself is performed first, keeping the reject path's
/// cost independent of the provided value.
fn constant_time_hex_eq(expected: &[u8], provided: &[u8]) -> bool {
    if expected.len() != provided.len() {
        let _: bool = expected.ct_eq(expected).into();
        return false;
    }
    expected.ct_eq(provided).into()
}
