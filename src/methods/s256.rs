// [library] Base64 encoding for PKCE code challenges - RFC 7636 requires base64url without padding
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

// [library] SHA-256 cryptographic hash function for the S256 method
use sha2::{Digest, Sha256};

use super::CodeChallengeMethod;

/// `S256` method: `code_challenge = BASE64URL-NOPAD(SHA256(ASCII(verifier)))`.
#[derive(Debug, Default, Clone, Copy)]
pub struct S256ChallengeMethod;

impl S256ChallengeMethod {
    /// Derive the challenge a client would send for `code_verifier`.
    pub(crate) fn derive(code_verifier: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(code_verifier.as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

impl CodeChallengeMethod for S256ChallengeMethod {
    fn id(&self) -> &str {
        "S256"
    }

    fn verify(&self, code_verifier: &str, code_challenge: &str) -> bool {
        code_challenge == Self::derive(code_verifier)
    }
}
