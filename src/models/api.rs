use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard API envelope used across endpoints, including authentication
/// rejections written by the middleware.
///
/// ```json
/// {"success": true, "code": "OK", "message": "Success", "data": {...}, "timestamp": "..."}
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Operation success flag
    pub success: bool,
    /// Application status code, "OK" on success
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response payload; `null` on errors
    pub data: Option<T>,
    /// Response timestamp (RFC 3339)
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope wrapping `data`.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "OK".to_string(),
            message: "Success".to_string(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    /// Error envelope with a machine-readable code and `null` data.
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            code: code.to_string(),
            message: message.to_string(),
            data: None,
            timestamp: Utc::now(),
        }
    }
}

/// Payload for `GET /api/v1/public/health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthData {
    /// Service health status ("UP")
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
}

/// Feature switches reported by the status endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Whether HMAC authentication is enforced
    pub hmac_authentication: bool,
    /// Whether security events are logged
    pub security_event_logging: bool,
    /// Whether detailed error messages are returned on rejection
    pub detailed_errors: bool,
}

/// Payload for `GET /api/v1/public/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusData {
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Operational status ("RUNNING")
    pub status: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Active feature switches
    pub features: FeatureFlags,
}

/// Authentication requirements advertised by the info endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthInfo {
    /// Signature scheme name
    pub scheme: String,
    /// Headers a signed request must carry
    pub required_headers: Vec<String>,
    /// Configured public path patterns (no authentication required)
    pub public_paths: Vec<String>,
}

/// Payload for `GET /api/v1/public/info`.
#[derive(Debug, Serialize, Deserialize)]
pub struct InfoData {
    /// API name
    pub api_name: String,
    /// API version
    pub version: String,
    /// Short description
    pub description: String,
    /// How to authenticate
    pub authentication: AuthInfo,
}

/// Payload for `GET /api/v1/whoami` (protected).
#[derive(Debug, Serialize, Deserialize)]
pub struct WhoamiData {
    /// Access key the caller presented
    pub access_key: String,
    /// Client IP as seen through proxy headers
    pub client_ip: String,
}
