//! Verifier transport through a single-string authorization code store.
//!
//! The surrounding framework persists exactly one opaque `code` value per
//! grant. When PKCE is in play the token endpoint folds the verifier into
//! that value before handing it over, and the code store splits it back out
//! at redemption. Both directions of the contract live here so the encoding
//! stays bit-exact: one ASCII space, appended only when a verifier was
//! supplied.

use crate::error::PkceError;
use crate::syntax;

/// Separator between code and verifier in the combined value.
pub const VERIFIER_SEPARATOR: char = ' ';

/// Fold `code_verifier` into the outbound code value.
///
/// With no verifier the code passes through untouched. The separator must
/// not occur in the original code, otherwise the later split would be
/// ambiguous; the verifier grammar already excludes it, so only the code is
/// checked.
pub fn attach_verifier(code: &str, code_verifier: Option<&str>) -> Result<String, PkceError> {
    let Some(verifier) = code_verifier else {
        return Ok(code.to_string());
    };
    if code.contains(VERIFIER_SEPARATOR) {
        return Err(PkceError::MalformedCode);
    }
    if !syntax::is_valid(verifier) {
        return Err(PkceError::InvalidVerifierSyntax);
    }
    Ok(format!("{code}{VERIFIER_SEPARATOR}{verifier}"))
}

/// Split a combined value back into `(code, verifier)`.
///
/// Counterpart to [`attach_verifier`], run by the code store at redemption.
/// Splits on the first separator only; a value without a separator is a
/// bare code.
pub fn split_verifier(encoded: &str) -> (&str, Option<&str>) {
    match encoded.split_once(VERIFIER_SEPARATOR) {
        Some((code, verifier)) => (code, Some(verifier)),
        None => (encoded, None),
    }
}
