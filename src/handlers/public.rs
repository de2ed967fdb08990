//! Public endpoints - the canonical occupants of the public-path allow-list.
//!
//! # Endpoints
//!
//! - `GET /api/v1/public/health` - liveness for monitors and load balancers
//! - `GET /api/v1/public/status` - operational status and feature switches
//! - `GET /api/v1/public/info` - API discovery, including how to authenticate
//!
//! All three are reachable without security headers because the default
//! `PUBLIC_PATHS` configuration includes `/api/v1/public/**`. None of them
//! exposes secrets; the info endpoint lists header *names* only.

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::{
    ACCESS_KEY_HEADER, PROJECT_TOKEN_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use crate::models::{ApiResponse, AuthInfo, FeatureFlags, HealthData, InfoData, StatusData};
use crate::state::AppState;

/// Service name reported by the public endpoints.
const SERVICE_NAME: &str = "hmac-gate";

/// Health check endpoint.
#[instrument]
pub async fn health() -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse::success(HealthData {
        status: "UP".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Service status endpoint with uptime and feature switches.
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Json<ApiResponse<StatusData>> {
    let policy = state.policy();

    Json(ApiResponse::success(StatusData {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "RUNNING".to_string(),
        uptime_seconds: state.uptime_seconds(),
        features: FeatureFlags {
            hmac_authentication: policy.enabled,
            security_event_logging: policy.log_events,
            detailed_errors: policy.detailed_errors,
        },
    }))
}

/// API information endpoint for discovery.
#[instrument(skip(state))]
pub async fn info(State(state): State<AppState>) -> Json<ApiResponse<InfoData>> {
    let policy = state.policy();

    Json(ApiResponse::success(InfoData {
        api_name: "HMAC Gate API".to_string(),
        version: "v1".to_string(),
        description: "HMAC-SHA512 authenticated API gateway".to_string(),
        authentication: AuthInfo {
            scheme: "HMAC-SHA512".to_string(),
            required_headers: vec![
                ACCESS_KEY_HEADER.to_string(),
                TIMESTAMP_HEADER.to_string(),
                PROJECT_TOKEN_HEADER.to_string(),
                SIGNATURE_HEADER.to_string(),
            ],
            public_paths: policy.public_paths.clone(),
        },
    }))
}
