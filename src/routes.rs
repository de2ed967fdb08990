//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (request order)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │  HMAC Auth       │ ← 401 if invalid (bypassed for public paths)
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │   Request ID     │ ← Adds X-Request-Id header
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← HTTP request/response logging
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │      CORS        │ ← Cross-origin headers
//! └────────┬─────────┘
//!          │
//!          ▼
//!      Handler
//! ```
//!
//! # Route Groups
//!
//! - `/api/v1/public/*` - health, status, info (on the default allow-list)
//! - `/api/v1/whoami` - protected reference endpoint

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::{HmacAuth, RequestIdLayer};
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
///
/// The authentication layer is always mounted; a disabled policy makes it a
/// pass-through, so the enabled/disabled decision lives in exactly one place
/// (the policy itself).
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors_allowed_origins);

    let auth = HmacAuth::new(state.policy());
    if auth.is_enabled() {
        info!(
            public_paths = ?state.policy().public_paths,
            "HMAC authentication enabled"
        );
    } else {
        info!("HMAC authentication disabled (SECURITY_ENABLED=false)");
    }

    Router::new()
        // Public endpoints (on the default allow-list)
        .route("/api/v1/public/health", get(handlers::health))
        .route("/api/v1/public/status", get(handlers::status))
        .route("/api/v1/public/info", get(handlers::info))
        // Protected endpoints
        .route("/api/v1/whoami", get(handlers::whoami))
        // Middleware stack (applied bottom to top; last layer runs first)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
        .layer(auth)
        .with_state(state)
}

/// Build CORS layer from configuration.
///
/// Using `*` (any origin) is convenient for development; specify explicit
/// origins in production.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    if allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
