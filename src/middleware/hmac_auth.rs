//! HMAC request authentication middleware.
//!
//! Verifies that every request to a protected path carries a valid, fresh,
//! HMAC-SHA512-signed proof of possession of the shared secret. Stateless:
//! the only shared data is the read-only [`SecurityPolicy`] behind an `Arc`.
//!
//! # Verification Sequence
//!
//! ```text
//! policy enabled? ──no──────────────────────────────▶ forward
//!    │yes
//! path protected & not public? ──no─────────────────▶ forward
//!    │yes
//! headers present ─▶ timestamp parses ─▶ fresh ─▶ signature valid ─▶ forward
//!    │                   │                │             │
//!    └───────────────────┴────────────────┴─────────────┴──▶ 401 envelope
//! ```
//!
//! The chain short-circuits on the first failure; a rejected request never
//! reaches the inner service, and exactly one well-formed JSON envelope is
//! written per rejection. Internal faults (a misconfigured codec, a crypto
//! backend failure) are caught and mapped to `SECURITY_ERROR` - they never
//! propagate past this layer.
//!
//! # Required Headers
//!
//! | Header | Meaning |
//! |---|---|
//! | `X-Access-Key` | caller identity; logged, not cryptographically checked |
//! | `X-Timestamp` | decimal Unix epoch milliseconds |
//! | `X-Project-Token` | token folded into the signed message |
//! | `X-Access-Sign` | hex HMAC-SHA512 signature |

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Json;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::response::IntoResponse;
use tower::{Layer, Service};
use tracing::{debug, error, warn};

use super::ip::client_ip;
use crate::metrics;
use crate::models::ApiResponse;
use crate::security::{SecurityPolicy, signature, timestamp};

/// Header carrying the caller's access key.
pub const ACCESS_KEY_HEADER: &str = "x-access-key";

/// Header carrying the request timestamp in epoch milliseconds.
pub const TIMESTAMP_HEADER: &str = "x-timestamp";

/// Header carrying the project token folded into the signed message.
pub const PROJECT_TOKEN_HEADER: &str = "x-project-token";

/// Header carrying the hex HMAC-SHA512 signature.
pub const SIGNATURE_HEADER: &str = "x-access-sign";

/// Generic message returned unless `detailed_errors` is enabled.
const GENERIC_REJECTION_MESSAGE: &str = "Authentication failed";

/// Why a request was rejected.
///
/// `MalformedTimestamp` and `StaleTimestamp` are distinct variants sharing
/// the `INVALID_TIMESTAMP` wire code: clients see one code, logs and
/// detailed messages keep the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingAccessKey,
    MissingTimestamp,
    MissingSignature,
    MissingProjectToken,
    MalformedTimestamp,
    StaleTimestamp,
    InvalidSignature,
    SecurityError,
}

impl RejectReason {
    /// Machine-readable code, always exposed to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingAccessKey => "MISSING_ACCESS_KEY",
            Self::MissingTimestamp => "MISSING_TIMESTAMP",
            Self::MissingSignature => "MISSING_SIGNATURE",
            Self::MissingProjectToken => "MISSING_PROJECT_TOKEN",
            Self::MalformedTimestamp | Self::StaleTimestamp => "INVALID_TIMESTAMP",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::SecurityError => "SECURITY_ERROR",
        }
    }

    /// Specific message, exposed only when `detailed_errors` is enabled.
    pub fn detail(&self) -> &'static str {
        match self {
            Self::MissingAccessKey => "Missing X-Access-Key header",
            Self::MissingTimestamp => "Missing X-Timestamp header",
            Self::MissingSignature => "Missing X-Access-Sign header",
            Self::MissingProjectToken => "Missing X-Project-Token header",
            Self::MalformedTimestamp => "Invalid timestamp format",
            Self::StaleTimestamp => "Request timestamp is too old or invalid",
            Self::InvalidSignature => "Invalid signature",
            Self::SecurityError => "Security validation failed",
        }
    }
}

/// Terminal result of running the verification sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Authenticated,
    Rejected(RejectReason),
}

/// Run the verification sequence against a request without consuming it.
///
/// Pure with respect to the request: headers and path are read, nothing is
/// modified. All side effects are log events and metrics.
pub fn authenticate<B>(policy: &SecurityPolicy, req: &Request<B>) -> VerificationOutcome {
    use VerificationOutcome::{Authenticated, Rejected};

    if !policy.enabled {
        return Authenticated;
    }

    let path = req.uri().path();
    if !policy.covers(path) {
        return Authenticated;
    }
    if let Some(pattern) = policy.public_match(path) {
        if policy.log_events {
            debug!(path, pattern, "Skipping authentication for public path");
        }
        return Authenticated;
    }

    let Some(access_key) = required_header(req, ACCESS_KEY_HEADER) else {
        return Rejected(RejectReason::MissingAccessKey);
    };
    let Some(timestamp_str) = required_header(req, TIMESTAMP_HEADER) else {
        return Rejected(RejectReason::MissingTimestamp);
    };
    let Some(provided_signature) = required_header(req, SIGNATURE_HEADER) else {
        return Rejected(RejectReason::MissingSignature);
    };
    let Some(project_token) = required_header(req, PROJECT_TOKEN_HEADER) else {
        return Rejected(RejectReason::MissingProjectToken);
    };

    let Ok(timestamp_millis) = timestamp_str.parse::<i64>() else {
        return Rejected(RejectReason::MalformedTimestamp);
    };

    if !timestamp::is_within_tolerance(timestamp_millis, policy.tolerance_seconds) {
        if policy.log_events {
            warn!(
                access_key,
                timestamp_millis,
                tolerance_seconds = policy.tolerance_seconds,
                "Request timestamp outside tolerance window"
            );
        }
        return Rejected(RejectReason::StaleTimestamp);
    }

    match signature::verify(
        timestamp_millis,
        project_token,
        &policy.secret_key,
        provided_signature,
    ) {
        Ok(true) => {
            if policy.log_events {
                debug!(
                    access_key,
                    client_ip = %client_ip(req),
                    "Valid HMAC signature"
                );
            }
            Authenticated
        }
        Ok(false) => {
            if policy.log_events {
                warn!(
                    access_key,
                    client_ip = %client_ip(req),
                    "Invalid HMAC signature"
                );
            }
            Rejected(RejectReason::InvalidSignature)
        }
        Err(e) => {
            // Caller-configuration bug or crypto fault; must not escape
            error!(error = %e, "Signature verification fault");
            Rejected(RejectReason::SecurityError)
        }
    }
}

/// Non-blank header value, or `None`.
fn required_header<'a, B>(req: &'a Request<B>, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Build the 401 envelope for a rejection.
fn rejection_response(policy: &SecurityPolicy, reason: RejectReason) -> Response<Body> {
    let message = if policy.detailed_errors {
        reason.detail()
    } else {
        GENERIC_REJECTION_MESSAGE
    };

    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(reason.code(), message)),
    )
        .into_response()
}

/// HMAC authentication layer.
///
/// Constructed once at router-build time from the shared policy; cloning is
/// an `Arc` bump.
#[derive(Clone)]
pub struct HmacAuth {
    policy: Arc<SecurityPolicy>,
}

impl HmacAuth {
    /// Create the layer from a shared policy.
    pub fn new(policy: Arc<SecurityPolicy>) -> Self {
        Self { policy }
    }

    /// Check whether authentication is enforced.
    pub fn is_enabled(&self) -> bool {
        self.policy.enabled
    }
}

impl<S> Layer<S> for HmacAuth {
    type Service = HmacAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HmacAuthService {
            inner,
            policy: self.policy.clone(),
        }
    }
}

/// HMAC authentication service wrapper.
#[derive(Clone)]
pub struct HmacAuthService<S> {
    inner: S,
    policy: Arc<SecurityPolicy>,
}

impl<S> Service<Request<Body>> for HmacAuthService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let policy = self.policy.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match authenticate(&policy, &req) {
                VerificationOutcome::Authenticated => {
                    metrics::record_auth_outcome("authenticated");
                    inner.call(req).await
                }
                VerificationOutcome::Rejected(reason) => {
                    metrics::record_auth_outcome("rejected");
                    metrics::record_auth_rejection(reason.code());

                    if policy.log_events {
                        warn!(
                            code = reason.code(),
                            detail = reason.detail(),
                            path = %req.uri().path(),
                            client_ip = %client_ip(&req),
                            "Authentication rejected"
                        );
                    }

                    Ok(rejection_response(&policy, reason))
                }
            }
        })
    }
}
