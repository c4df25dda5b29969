// [library] Structured error handling with automatic trait derivation
use thiserror::Error;

/// Failure kinds for PKCE parameter handling.
///
/// Every variant is a client-input error and must surface as a client-facing
/// rejection, never as a server error: callers map all of them to the OAuth2
/// `invalid_request` family. A verifier that simply does not match its
/// challenge is *not* an error (see
/// [`PkceOutcome::Verified`](crate::evaluator::PkceOutcome)); it maps to
/// `invalid_grant`, indistinguishable from an unknown or expired
/// authorization code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PkceError {
    /// A `code_challenge` was stored at authorize time but no
    /// `code_verifier` arrived with the token request.
    #[error("code_challenge parameter present but code_verifier is missing")]
    MissingVerifier,

    /// A `code_verifier` arrived but no `code_challenge` was stored.
    #[error("code_verifier parameter present but code_challenge is missing")]
    MissingChallenge,

    #[error("code_challenge must be 43-128 characters from [A-Za-z0-9._~-]")]
    InvalidChallengeSyntax,

    #[error("code_verifier must be 43-128 characters from [A-Za-z0-9._~-]")]
    InvalidVerifierSyntax,

    /// The resolved `code_challenge_method` id is not registered.
    #[error("unsupported code_challenge_method: {0}")]
    UnsupportedMethod(String),

    /// The raw authorization code already contains the verifier separator,
    /// so the combined value could not be split back unambiguously.
    #[error("authorization code contains the verifier separator character")]
    MalformedCode,
}

impl PkceError {
    /// OAuth2 error code the enclosing endpoint should emit for this kind.
    ///
    /// All kinds describe a malformed or unsupported request. A negative
    /// match verdict is reported separately and maps to `invalid_grant`.
    pub fn oauth_error_code(&self) -> &'static str {
        "invalid_request"
    }
}
