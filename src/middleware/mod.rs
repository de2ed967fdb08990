//! HTTP middleware for authentication and observability.
//!
//! # Architecture
//!
//! ```text
//! Request → HMAC Auth → Request ID → Trace → CORS → Handler → Response
//!              ↓
//!          401 envelope
//! ```
//!
//! The authentication layer is the outermost: a rejected request is answered
//! before any other processing happens and the chain stops there.

pub mod hmac_auth;
pub mod ip;
pub mod request_id;

pub use hmac_auth::{
    ACCESS_KEY_HEADER, HmacAuth, PROJECT_TOKEN_HEADER, RejectReason, SIGNATURE_HEADER,
    TIMESTAMP_HEADER, VerificationOutcome, authenticate,
};
pub use ip::{UNKNOWN_IP, client_ip};
pub use request_id::{REQUEST_ID_HEADER, RequestIdLayer};
