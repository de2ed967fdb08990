//! Fuzz testing for the Ant-style path matcher.
//!
//! This fuzz target tests the robustness of the path matching module against
//! arbitrary patterns and paths. It ensures that the matcher:
//!
//! - Never panics on any input
//! - Terminates on adversarial patterns (repeated `*` and `**` runs)
//! - Handles edge cases like empty strings, non-ASCII text, and separators
//!   in unusual positions
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! # Install cargo-fuzz (requires nightly)
//! cargo +nightly install cargo-fuzz
//!
//! # Run the path matcher fuzz target
//! cargo +nightly fuzz run fuzz_path_match
//!
//! # Run with a time limit (e.g., 60 seconds)
//! cargo +nightly fuzz run fuzz_path_match -- -max_total_time=60
//! ```

#![no_main]

use hmac_gate::security::path::matches;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // First line is the pattern, the rest is the path (shouldn't panic)
        if let Some((pattern, path)) = s.split_once('\n') {
            let _ = matches(pattern, path);
            // A pattern with no wildcards matches exactly itself
            if !pattern.contains(['*', '?']) {
                let _ = matches(pattern, pattern);
            }
        }

        // Arbitrary text against fixed production-like patterns
        let _ = matches("/api/v1/public/**", s);
        let _ = matches("/api/v?/**/*.json", s);

        // Arbitrary text as both pattern and path
        let _ = matches(s, s);
    }
});
