//! Ant-style path pattern matching for the public-path allow-list.
//!
//! # Pattern Language
//!
//! - `?` matches exactly one character within a path segment
//! - `*` matches zero or more characters within a path segment
//! - `**` (as a whole segment) matches zero or more segments, separators
//!   included
//!
//! Examples:
//!
//! - `/api/v1/public/**` matches `/api/v1/public`, `/api/v1/public/health`,
//!   and `/api/v1/public/a/b/c`
//! - `/api/*/health` matches `/api/v1/health` but not `/api/v1/x/health`
//! - `/api/v?` matches `/api/v1` but not `/api/v10`
//!
//! Matching is case-sensitive and evaluated against the full request path.

/// Check whether `path` matches the Ant-style `pattern`.
pub fn matches(pattern: &str, path: &str) -> bool {
    // Absolute patterns only match absolute paths and vice versa.
    if pattern.starts_with('/') != path.starts_with('/') {
        return false;
    }

    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match_segments(&pattern_segments, &path_segments)
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    let Some((&first, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    if first == "**" {
        // Consume zero segments, or one and retry with the same pattern.
        if match_segments(rest, path) {
            return true;
        }
        return match path.split_first() {
            Some((_, tail)) => match_segments(pattern, tail),
            None => false,
        };
    }

    match path.split_first() {
        Some((&segment, tail)) => match_segment(first, segment) && match_segments(rest, tail),
        None => false,
    }
}

/// Glob match within a single segment: `?` is one character, `*` is any run
/// of characters. Separators never appear here - segments are already split.
fn match_segment(pattern: &str, segment: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let segment: Vec<char> = segment.chars().collect();
    match_chars(&pattern, &segment)
}

/// Two-pointer wildcard match with greedy `*` and single-point backtracking.
/// Quadratic worst case, so adversarial patterns cannot blow the stack or
/// take exponential time.
fn match_chars(pattern: &[char], text: &[char]) -> bool {
    let mut p = 0;
    let mut t = 0;
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(&'*') => {
                // Match empty first; grow on demand via backtracking
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&'?') => {
                p += 1;
                t += 1;
            }
            Some(&c) if text.get(t) == Some(&c) => {
                p += 1;
                t += 1;
            }
            _ => {
                let Some((star_p, star_t)) = backtrack else {
                    return false;
                };
                // Extend the last '*' by one character and retry
                p = star_p + 1;
                t = star_t + 1;
                backtrack = Some((star_p, star_t + 1));
            }
        }
    }

    // Only trailing stars may remain
    while pattern.get(p) == Some(&'*') {
        p += 1;
    }
    p == pattern.len()
}
