//! Shared grammar for `code_challenge` and `code_verifier`.
//!
//! RFC 7636 gives both parameters the same shape: 43 to 128 characters from
//! the unreserved set `[A-Z] / [a-z] / [0-9] / "-" / "." / "_" / "~"`.

/// Minimum accepted parameter length.
pub const MIN_LENGTH: usize = 43;

/// Maximum accepted parameter length.
pub const MAX_LENGTH: usize = 128;

/// Check a challenge or verifier value against the RFC grammar.
///
/// Pure and deterministic; the empty string fails the length rule. Absent
/// parameters are handled by the callers, an absent value is never valid.
pub fn is_valid(value: &str) -> bool {
    if value.len() < MIN_LENGTH || value.len() > MAX_LENGTH {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
}
