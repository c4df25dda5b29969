use super::CodeChallengeMethod;

/// `plain` method: the challenge is the verifier itself.
///
/// Weakest of the registered methods, kept because the RFC makes it the
/// default when a client sends a `code_challenge` without naming a method.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainChallengeMethod;

impl CodeChallengeMethod for PlainChallengeMethod {
    fn id(&self) -> &str {
        "plain"
    }

    fn verify(&self, code_verifier: &str, code_challenge: &str) -> bool {
        code_challenge == code_verifier
    }
}
