//! Client-side helpers: verifier generation and S256 challenge derivation.

// [library] Base64 encoding for PKCE code verifiers - RFC 7636 requires base64url without padding
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

// [library] Cryptographically secure random number generation for code verifiers
use rand::{distributions::Alphanumeric, Rng};

use crate::error::PkceError;
use crate::methods::S256ChallengeMethod;
use crate::syntax;

// [security] Generate a cryptographically secure PKCE code verifier
// 32 random bytes encode to a 43-character base64url string, the RFC minimum
pub fn generate_code_verifier() -> String {
    let random_bytes: Vec<u8> = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .collect();

    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Derive the S256 code challenge a client sends at the authorize step.
///
/// Validates the verifier first so a client cannot start a flow it could
/// never finish.
pub fn create_code_challenge(code_verifier: &str) -> Result<String, PkceError> {
    if !syntax::is_valid(code_verifier) {
        return Err(PkceError::InvalidVerifierSyntax);
    }
    Ok(S256ChallengeMethod::derive(code_verifier))
}
