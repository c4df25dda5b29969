//! Decision procedure binding the authorize-step challenge to the
//! token-step verifier.

use std::collections::HashMap;

// [library] Structured logging for the audit trail on rejected redemptions
use tracing::{debug, warn};

use crate::error::PkceError;
use crate::registry::MethodRegistry;
use crate::syntax;

/// Authorize-request parameter carrying the challenge value.
pub const CODE_CHALLENGE: &str = "code_challenge";

/// Authorize-request parameter selecting the challenge method.
pub const CODE_CHALLENGE_METHOD: &str = "code_challenge_method";

/// Token-request parameter carrying the verifier secret.
pub const CODE_VERIFIER: &str = "code_verifier";

/// Method applied when `code_challenge_method` is absent or empty.
pub const DEFAULT_METHOD: &str = "plain";

/// Successful evaluation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PkceOutcome {
    /// Neither challenge nor verifier was supplied; the flow proceeds as a
    /// plain authorization code grant.
    NoPkceUsed,
    /// PKCE was used; the boolean is the match verdict. `Verified(false)`
    /// is a well-formed request whose secret did not match. Callers report
    /// it as `invalid_grant`, exactly like an unknown or expired code, so
    /// the response does not reveal which check failed.
    Verified(bool),
}

/// Evaluates PKCE parameters for a single code redemption.
///
/// Stateless apart from the immutable method registry; one instance serves
/// arbitrarily many concurrent redemptions.
#[derive(Debug)]
pub struct PkceEvaluator {
    registry: MethodRegistry,
}

impl PkceEvaluator {
    pub fn new(registry: MethodRegistry) -> Self {
        Self { registry }
    }

    /// Registry this evaluator resolves method ids against.
    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Evaluate the stored authorize-request parameters against the
    /// verifier presented at the token endpoint.
    ///
    /// The challenge and verifier must appear together or not at all; one
    /// without the other is an error, never a silent no-PKCE outcome. An
    /// empty verifier counts as absent. An empty `code_challenge` value
    /// counts as present and fails the syntax check.
    pub fn evaluate(
        &self,
        request_parameters: &HashMap<String, String>,
        code_verifier: Option<&str>,
    ) -> Result<PkceOutcome, PkceError> {
        let code_challenge = request_parameters.get(CODE_CHALLENGE).map(String::as_str);
        let code_verifier = code_verifier.filter(|v| !v.is_empty());

        // Presence symmetry first: both, neither, or a hard error
        let (code_challenge, code_verifier) = match (code_challenge, code_verifier) {
            (None, None) => {
                debug!("no PKCE parameters, proceeding as plain authorization code grant");
                return Ok(PkceOutcome::NoPkceUsed);
            }
            (Some(_), None) => {
                warn!("code_challenge stored for this code but no code_verifier supplied");
                return Err(PkceError::MissingVerifier);
            }
            (None, Some(_)) => {
                warn!("code_verifier supplied but no code_challenge stored for this code");
                return Err(PkceError::MissingChallenge);
            }
            (Some(challenge), Some(verifier)) => (challenge, verifier),
        };

        if !syntax::is_valid(code_challenge) {
            warn!("stored code_challenge fails the length or character rules");
            return Err(PkceError::InvalidChallengeSyntax);
        }

        let method_id = request_parameters
            .get(CODE_CHALLENGE_METHOD)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_METHOD);

        let method = self.registry.get(method_id).ok_or_else(|| {
            warn!(method = %method_id, "unsupported code_challenge_method");
            PkceError::UnsupportedMethod(method_id.to_string())
        })?;

        if !syntax::is_valid(code_verifier) {
            warn!("code_verifier fails the length or character rules");
            return Err(PkceError::InvalidVerifierSyntax);
        }

        let matched = method.verify(code_verifier, code_challenge);
        debug!(method = %method_id, matched, "PKCE evaluation complete");
        Ok(PkceOutcome::Verified(matched))
    }

    /// Validate PKCE parameters at authorize time, before a code is minted.
    ///
    /// A method without a challenge is rejected; a challenge alone is fine
    /// since the verifier only arrives at the token step. Applies the same
    /// syntax, default-method and registry rules as [`Self::evaluate`], so
    /// a request that passes here can only fail redemption on the verifier.
    pub fn validate_authorize_request(
        &self,
        code_challenge: Option<&str>,
        code_challenge_method: Option<&str>,
    ) -> Result<(), PkceError> {
        let method = code_challenge_method.filter(|m| !m.is_empty());
        let challenge = match code_challenge {
            None if method.is_some() => {
                warn!("code_challenge_method supplied without a code_challenge");
                return Err(PkceError::MissingChallenge);
            }
            None => return Ok(()),
            Some(challenge) => challenge,
        };

        if !syntax::is_valid(challenge) {
            warn!("code_challenge fails the length or character rules");
            return Err(PkceError::InvalidChallengeSyntax);
        }

        let method_id = method.unwrap_or(DEFAULT_METHOD);
        if !self.registry.is_supported(method_id) {
            warn!(method = %method_id, "unsupported code_challenge_method at authorize time");
            return Err(PkceError::UnsupportedMethod(method_id.to_string()));
        }
        Ok(())
    }
}

impl Default for PkceEvaluator {
    /// Evaluator over the canonical `plain` + `S256` method set.
    fn default() -> Self {
        Self::new(MethodRegistry::default_set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 7636 Appendix B example pair
    const VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    const CHALLENGE: &str = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";

    fn params(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_parameters_is_no_pkce() {
        let evaluator = PkceEvaluator::default();
        assert_eq!(
            evaluator.evaluate(&params(&[]), None),
            Ok(PkceOutcome::NoPkceUsed)
        );
    }

    #[test]
    fn test_empty_verifier_counts_as_absent() {
        let evaluator = PkceEvaluator::default();
        assert_eq!(
            evaluator.evaluate(&params(&[]), Some("")),
            Ok(PkceOutcome::NoPkceUsed)
        );
        assert_eq!(
            evaluator.evaluate(&params(&[(CODE_CHALLENGE, CHALLENGE)]), Some("")),
            Err(PkceError::MissingVerifier)
        );
    }

    #[test]
    fn test_challenge_without_verifier_is_an_error() {
        let evaluator = PkceEvaluator::default();
        assert_eq!(
            evaluator.evaluate(&params(&[(CODE_CHALLENGE, CHALLENGE)]), None),
            Err(PkceError::MissingVerifier)
        );
    }

    #[test]
    fn test_verifier_without_challenge_is_an_error() {
        let evaluator = PkceEvaluator::default();
        assert_eq!(
            evaluator.evaluate(&params(&[]), Some(VERIFIER)),
            Err(PkceError::MissingChallenge)
        );
    }

    #[test]
    fn test_empty_challenge_value_counts_as_present() {
        let evaluator = PkceEvaluator::default();
        assert_eq!(
            evaluator.evaluate(&params(&[(CODE_CHALLENGE, "")]), Some(VERIFIER)),
            Err(PkceError::InvalidChallengeSyntax)
        );
        assert_eq!(
            evaluator.evaluate(&params(&[(CODE_CHALLENGE, "")]), None),
            Err(PkceError::MissingVerifier)
        );
    }

    #[test]
    fn test_invalid_challenge_syntax() {
        let evaluator = PkceEvaluator::default();
        let short = &CHALLENGE[..42];
        assert_eq!(
            evaluator.evaluate(&params(&[(CODE_CHALLENGE, short)]), Some(VERIFIER)),
            Err(PkceError::InvalidChallengeSyntax)
        );
    }

    #[test]
    fn test_invalid_verifier_syntax() {
        let evaluator = PkceEvaluator::default();
        let bad_verifier = format!("{}%", &VERIFIER[..42]);
        assert_eq!(
            evaluator.evaluate(
                &params(&[(CODE_CHALLENGE, CHALLENGE)]),
                Some(bad_verifier.as_str())
            ),
            Err(PkceError::InvalidVerifierSyntax)
        );
    }

    #[test]
    fn test_unsupported_method() {
        let evaluator = PkceEvaluator::default();
        let request = params(&[
            (CODE_CHALLENGE, CHALLENGE),
            (CODE_CHALLENGE_METHOD, "bogus"),
        ]);
        assert_eq!(
            evaluator.evaluate(&request, Some(VERIFIER)),
            Err(PkceError::UnsupportedMethod("bogus".to_string()))
        );
    }

    #[test]
    fn test_absent_empty_and_explicit_plain_methods_agree() {
        let evaluator = PkceEvaluator::default();
        let expected = Ok(PkceOutcome::Verified(true));

        let absent = params(&[(CODE_CHALLENGE, VERIFIER)]);
        let empty = params(&[(CODE_CHALLENGE, VERIFIER), (CODE_CHALLENGE_METHOD, "")]);
        let explicit = params(&[
            (CODE_CHALLENGE, VERIFIER),
            (CODE_CHALLENGE_METHOD, "plain"),
        ]);

        assert_eq!(evaluator.evaluate(&absent, Some(VERIFIER)), expected);
        assert_eq!(evaluator.evaluate(&empty, Some(VERIFIER)), expected);
        assert_eq!(evaluator.evaluate(&explicit, Some(VERIFIER)), expected);
    }

    #[test]
    fn test_s256_match() {
        let evaluator = PkceEvaluator::default();
        let request = params(&[
            (CODE_CHALLENGE, CHALLENGE),
            (CODE_CHALLENGE_METHOD, "S256"),
        ]);
        assert_eq!(
            evaluator.evaluate(&request, Some(VERIFIER)),
            Ok(PkceOutcome::Verified(true))
        );
    }

    #[test]
    fn test_s256_mismatch_is_a_negative_verdict_not_an_error() {
        let evaluator = PkceEvaluator::default();
        let request = params(&[
            (CODE_CHALLENGE, CHALLENGE),
            (CODE_CHALLENGE_METHOD, "S256"),
        ]);
        // The challenge echoed back as the verifier is well-formed but wrong
        assert_eq!(
            evaluator.evaluate(&request, Some(CHALLENGE)),
            Ok(PkceOutcome::Verified(false))
        );
    }

    #[test]
    fn test_plain_mismatch_is_a_negative_verdict() {
        let evaluator = PkceEvaluator::default();
        let request = params(&[(CODE_CHALLENGE, CHALLENGE)]);
        assert_eq!(
            evaluator.evaluate(&request, Some(VERIFIER)),
            Ok(PkceOutcome::Verified(false))
        );
    }

    #[test]
    fn test_authorize_validation_accepts_no_pkce() {
        let evaluator = PkceEvaluator::default();
        assert_eq!(evaluator.validate_authorize_request(None, None), Ok(()));
    }

    #[test]
    fn test_authorize_validation_accepts_challenge_with_supported_methods() {
        let evaluator = PkceEvaluator::default();
        assert_eq!(
            evaluator.validate_authorize_request(Some(CHALLENGE), Some("S256")),
            Ok(())
        );
        assert_eq!(
            evaluator.validate_authorize_request(Some(CHALLENGE), None),
            Ok(())
        );
        assert_eq!(
            evaluator.validate_authorize_request(Some(CHALLENGE), Some("")),
            Ok(())
        );
    }

    #[test]
    fn test_authorize_validation_rejects_method_without_challenge() {
        let evaluator = PkceEvaluator::default();
        assert_eq!(
            evaluator.validate_authorize_request(None, Some("S256")),
            Err(PkceError::MissingChallenge)
        );
    }

    #[test]
    fn test_authorize_validation_rejects_bad_challenge_and_method() {
        let evaluator = PkceEvaluator::default();
        assert_eq!(
            evaluator.validate_authorize_request(Some("too-short"), Some("S256")),
            Err(PkceError::InvalidChallengeSyntax)
        );
        assert_eq!(
            evaluator.validate_authorize_request(Some(CHALLENGE), Some("S512")),
            Err(PkceError::UnsupportedMethod("S512".to_string()))
        );
    }
}
