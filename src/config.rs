//! Application configuration loaded from environment variables.
//!
//! All configuration is loaded once at process start with development
//! defaults; production deployments configure via environment variables or a
//! `.env` file. The security section becomes the immutable
//! [`SecurityPolicy`] shared with the middleware - there is no runtime
//! reconfiguration.
//!
//! # Security Configuration
//!
//! - `SECURITY_ENABLED`: master switch for the authentication layer
//! - `API_SECRET_KEY`: shared HMAC secret, required when security is enabled;
//!   store it in an environment variable or secret manager, never in code
//! - `TIMESTAMP_TOLERANCE_SECS`: replay window in seconds (default: 300)
//! - `PUBLIC_PATHS`: comma-separated Ant-style patterns that skip auth
//! - `PROTECTED_PATH_PREFIXES`: prefixes subject to authentication at all
//! - `LOG_SECURITY_EVENTS` / `DETAILED_ERROR_MESSAGES`: observability and
//!   information-disclosure switches

use std::env;

use crate::error::{AppError, AppResult};
use crate::security::{SecurityPolicy, default_public_paths, timestamp};

/// Minimum recommended secret length; shorter keys get a startup warning.
const RECOMMENDED_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 3000)
    pub port: u16,

    // =========================================================================
    // Security Configuration
    // =========================================================================
    /// Request authentication policy, shared read-only with the middleware
    pub security: SecurityPolicy,

    /// Comma-separated list of allowed CORS origins ("*" = any)
    pub cors_allowed_origins: Vec<String>,

    // =========================================================================
    // Observability Configuration
    // =========================================================================
    /// Log level (e.g., "info", "debug", "trace")
    pub log_level: String,

    /// Port for the Prometheus metrics endpoint (default: 9090, 0 = disabled)
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` when a value does not parse or when
    /// validation fails (non-positive tolerance, enabled security with no
    /// secret).
    pub fn from_env() -> AppResult<Self> {
        // Load an .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_env("PORT", 3000)?,

            security: SecurityPolicy {
                enabled: Self::parse_env("SECURITY_ENABLED", true)?,
                secret_key: env::var("API_SECRET_KEY").unwrap_or_default(),
                tolerance_seconds: Self::parse_env(
                    "TIMESTAMP_TOLERANCE_SECS",
                    timestamp::DEFAULT_TOLERANCE_SECONDS,
                )?,
                public_paths: Self::parse_path_list("PUBLIC_PATHS", default_public_paths()),
                protected_prefixes: Self::parse_path_list(
                    "PROTECTED_PATH_PREFIXES",
                    vec!["/api/".to_string()],
                ),
                log_events: Self::parse_env("LOG_SECURITY_EVENTS", true)?,
                detailed_errors: Self::parse_env("DETAILED_ERROR_MESSAGES", false)?,
            },

            cors_allowed_origins: Self::parse_cors_origins(),

            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            metrics_port: Self::parse_env("METRICS_PORT", 9090)?,
        };

        // Validate configuration before returning
        config.validate()?;

        if config.security.enabled && config.security.secret_key.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                "API_SECRET_KEY is shorter than {RECOMMENDED_SECRET_LEN} characters; \
                 use a longer randomly generated key"
            );
        }

        Ok(config)
    }

    /// Validate configuration values for consistency and correctness.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if validation fails.
    fn validate(&self) -> AppResult<()> {
        if self.security.tolerance_seconds <= 0 {
            return Err(AppError::ConfigError(format!(
                "TIMESTAMP_TOLERANCE_SECS must be positive, got {}",
                self.security.tolerance_seconds
            )));
        }

        if self.security.enabled && self.security.secret_key.trim().is_empty() {
            return Err(AppError::ConfigError(
                "API_SECRET_KEY is required when SECURITY_ENABLED=true".to_string(),
            ));
        }

        for prefix in &self.security.protected_prefixes {
            if !prefix.starts_with('/') {
                return Err(AppError::ConfigError(format!(
                    "PROTECTED_PATH_PREFIXES entries must start with '/', got {prefix:?}"
                )));
            }
        }

        Ok(())
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if Prometheus metrics export is enabled.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port > 0
    }

    /// Get the metrics endpoint address, or `None` when disabled.
    pub fn metrics_addr(&self) -> Option<std::net::SocketAddr> {
        if self.metrics_enabled() {
            Some(std::net::SocketAddr::from((
                [0, 0, 0, 0],
                self.metrics_port,
            )))
        } else {
            None
        }
    }

    /// Parse an environment variable into the specified type with a default value.
    fn parse_env<T>(name: &str, default: T) -> AppResult<T>
    where
        T: std::str::FromStr + ToString,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(val) => val
                .parse()
                .map_err(|e| AppError::ConfigError(format!("Invalid {name}: {e}"))),
            Err(_) => Ok(default),
        }
    }

    /// Parse a comma-separated path list, keeping only entries that start
    /// with '/'.
    fn parse_path_list(name: &str, default: Vec<String>) -> Vec<String> {
        match env::var(name) {
            Ok(val) => val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty() && s.starts_with('/'))
                .collect(),
            Err(_) => default,
        }
    }

    /// Parse CORS allowed origins from environment variable.
    fn parse_cors_origins() -> Vec<String> {
        env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Default configuration for testing and development.
///
/// Production deployments should use `Config::from_env()` instead. Note the
/// default policy carries no secret; enable-with-secret before serving.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            security: SecurityPolicy::default(),
            cors_allowed_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
            metrics_port: 9090,
        }
    }
}
