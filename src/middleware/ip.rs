//! Client IP extraction for security-event logging.
//!
//! Header priority:
//!
//! 1. `X-Forwarded-For` - first entry of the comma-separated list
//! 2. `X-Real-IP`
//! 3. Socket peer address (requires serving with
//!    `into_make_service_with_connect_info::<SocketAddr>()`)
//! 4. `"unknown"`
//!
//! # Security Warning
//!
//! The proxy headers are client-controlled. The extracted value is used for
//! log attribution only, never for authorization decisions; deploy behind a
//! reverse proxy that overwrites these headers if the logs must be trusted.

use std::borrow::Cow;
use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::Request;

/// Fallback value when no client IP can be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// Extract the client IP for log attribution.
///
/// Returns `Cow<'static, str>`: borrowed for the `"unknown"` fallback (no
/// allocation), owned otherwise.
pub fn client_ip<B>(req: &Request<B>) -> Cow<'static, str> {
    if let Some(forwarded) = req.headers().get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
        && !first.trim().is_empty()
    {
        return Cow::Owned(first.trim().to_string());
    }

    if let Some(real_ip) = req.headers().get("x-real-ip")
        && let Ok(value) = real_ip.to_str()
        && !value.trim().is_empty()
    {
        return Cow::Owned(value.trim().to_string());
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return Cow::Owned(addr.ip().to_string());
    }

    Cow::Borrowed(UNKNOWN_IP)
}
