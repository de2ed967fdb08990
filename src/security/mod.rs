//! Request authentication primitives.
//!
//! Leaf components composed by the authentication middleware:
//!
//! - **Signatures**: HMAC-SHA512 over `timestamp + project_token`, hex wire
//!   encoding, constant-time verification
//! - **Timestamps**: symmetric replay window around wall-clock time
//! - **Paths**: Ant-style glob matching for the public allow-list
//! - **Policy**: the immutable process-wide configuration value

pub mod path;
pub mod policy;
pub mod signature;
pub mod timestamp;

pub use policy::{SecurityPolicy, default_public_paths};
pub use signature::{SIGNATURE_HEX_LEN, sign, verify};
pub use timestamp::{DEFAULT_TOLERANCE_SECONDS, is_within_tolerance};
