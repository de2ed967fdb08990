//! Immutable security policy shared across all requests.
//!
//! The policy is built once from configuration at process start and handed
//! to the middleware behind an `Arc`. Nothing mutates it afterwards; there
//! is no singleton lookup and no runtime reconfiguration.

use std::fmt;

use crate::security::{path, timestamp};

/// Process-wide authentication policy.
///
/// # Security Note
///
/// `secret_key` must never appear in logs or error bodies. The manual
/// `Debug` implementation below redacts it so that `{:?}` formatting of the
/// policy (or of anything containing it) cannot leak the key.
#[derive(Clone)]
pub struct SecurityPolicy {
    /// Master switch. When false the entire authentication layer is
    /// bypassed and every request is forwarded.
    pub enabled: bool,

    /// Shared HMAC secret. At least 32 characters recommended.
    pub secret_key: String,

    /// Timestamp tolerance in seconds for the replay window.
    pub tolerance_seconds: i64,

    /// Ant-style glob patterns for paths that skip authentication.
    /// Evaluated in order; the first match is reported as the reason.
    pub public_paths: Vec<String>,

    /// Only paths under one of these prefixes are examined at all.
    /// Everything else is forwarded untouched.
    pub protected_prefixes: Vec<String>,

    /// Emit structured log events for authentication outcomes.
    pub log_events: bool,

    /// Return the specific failure reason in the response body instead of
    /// the generic message. Leaks information; off by default.
    pub detailed_errors: bool,
}

impl SecurityPolicy {
    /// First configured public pattern matching `path`, if any.
    pub fn public_match(&self, path: &str) -> Option<&str> {
        self.public_paths
            .iter()
            .map(String::as_str)
            .find(|pattern| path::matches(pattern, path))
    }

    /// Whether `path` is on the public allow-list.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_match(path).is_some()
    }

    /// Whether `path` falls under a prefix this policy protects.
    pub fn covers(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

impl fmt::Debug for SecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityPolicy")
            .field("enabled", &self.enabled)
            .field("secret_key", &"<redacted>")
            .field("tolerance_seconds", &self.tolerance_seconds)
            .field("public_paths", &self.public_paths)
            .field("protected_prefixes", &self.protected_prefixes)
            .field("log_events", &self.log_events)
            .field("detailed_errors", &self.detailed_errors)
            .finish()
    }
}

/// Defaults mirror the production configuration surface, minus the secret.
/// Intended for tests and local development; `Config::validate` rejects an
/// enabled policy with an empty secret before the server starts.
impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            secret_key: String::new(),
            tolerance_seconds: timestamp::DEFAULT_TOLERANCE_SECONDS,
            public_paths: default_public_paths(),
            protected_prefixes: vec!["/api/".to_string()],
            log_events: true,
            detailed_errors: false,
        }
    }
}

/// Default public allow-list: the public controller plus bare health/status
/// aliases.
pub fn default_public_paths() -> Vec<String> {
    vec![
        "/api/v1/public/**".to_string(),
        "/api/v1/health".to_string(),
        "/api/v1/status".to_string(),
    ]
}
