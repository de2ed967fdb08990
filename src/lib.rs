//! # HMAC Gate
//!
//! A stateless HMAC-SHA512 request authentication gateway built on Axum,
//! featuring:
//!
//! - **Signed requests**: `hex(HMAC_SHA512(secret, timestamp + project_token))`
//!   carried in headers, verified in constant time
//! - **Replay window**: symmetric timestamp tolerance (default 5 minutes)
//! - **Public allow-list**: Ant-style glob patterns (`?`, `*`, `**`)
//! - **Structured failures**: machine-readable codes in a stable JSON
//!   envelope, HTTP 401, configurable message detail
//! - **Observability**: request IDs, structured logging, Prometheus counters
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (HMAC Auth → Request ID → Trace → CORS)         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (public health/status/info, protected whoami)     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Security (signature, timestamp, path matcher, policy)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hmac_gate::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hmac_gate::AppError> {
//!     let config = Config::from_env()?;
//!     let state = AppState::new(config);
//!     let app = build_router(state);
//!
//!     // Bind a listener and serve...
//!     Ok(())
//! }
//! ```
//!
//! ## Signing a Request
//!
//! ```rust
//! use hmac_gate::security::sign;
//!
//! let timestamp = 1_700_000_000_000_i64; // epoch millis
//! let signature = sign(timestamp, "proj123", "s3cr3t-key-of-at-least-32-chars!!")?;
//! // Send as: X-Access-Key, X-Timestamp, X-Project-Token, X-Access-Sign
//! # Ok::<(), hmac_gate::AppError>(())
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod state;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use error::{AppError, AppResult};
pub use middleware::{HmacAuth, RejectReason, VerificationOutcome};
pub use routes::build_router;
pub use security::SecurityPolicy;
pub use state::AppState;
