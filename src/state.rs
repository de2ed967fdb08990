//! Shared application state for Axum handlers.
//!
//! The state is intentionally small: the configuration and the security
//! policy are both immutable after startup, so cloning the state per request
//! is two `Arc` bumps and a `Copy`. No locks, no background tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::security::SecurityPolicy;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Security policy, shared with the authentication middleware
    policy: Arc<SecurityPolicy>,
    /// Timestamp when the application started
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state from configuration.
    ///
    /// The policy is lifted into its own `Arc` so the middleware does not
    /// retain the rest of the configuration.
    pub fn new(config: Config) -> Self {
        let policy = Arc::new(config.security.clone());
        Self {
            config: Arc::new(config),
            policy,
            started_at: Instant::now(),
        }
    }

    /// The shared security policy.
    pub fn policy(&self) -> Arc<SecurityPolicy> {
        self.policy.clone()
    }

    /// Get the application uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
