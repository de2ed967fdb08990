//! Protected reference endpoint.
//!
//! `GET /api/v1/whoami` sits behind the authentication layer and reflects
//! what the middleware saw: the access key the caller presented and the
//! client IP derived from proxy headers. It exists to demonstrate that an
//! authenticated request reaches its handler with headers unchanged.

use axum::Json;
use axum::body::Body;
use axum::http::Request;
use tracing::instrument;

use crate::middleware::{ACCESS_KEY_HEADER, client_ip};
use crate::models::{ApiResponse, WhoamiData};

/// Reflect the caller's identity as seen by the gateway.
///
/// The access key is absent only when security is disabled; it reads as
/// `"anonymous"` then.
#[instrument(skip(req))]
pub async fn whoami(req: Request<Body>) -> Json<ApiResponse<WhoamiData>> {
    let access_key = req
        .headers()
        .get(ACCESS_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("anonymous")
        .to_string();

    let client_ip = client_ip(&req).into_owned();

    Json(ApiResponse::success(WhoamiData {
        access_key,
        client_ip,
    }))
}
