// [rust] Challenge method implementations - one file per registered method
pub mod plain;
pub mod s256;

pub use plain::PlainChallengeMethod;
pub use s256::S256ChallengeMethod;

/// A registered `code_challenge_method`.
///
/// Implementations compare the token-step `code_verifier` against the
/// authorize-step `code_challenge`:
/// `code_challenge = code_challenge_method(code_verifier)`.
///
/// The contract is two operations and stays that way; the evaluator resolves
/// implementations by id through the registry and never names a concrete
/// method.
pub trait CodeChallengeMethod: Send + Sync {
    /// Method identifier this implementation registers under,
    /// e.g. `"plain"` or `"S256"`. Ids are case-sensitive.
    fn id(&self) -> &str;

    /// True when `code_challenge` equals this method's transform of
    /// `code_verifier`. Never panics and never errors; both inputs have
    /// already passed the parameter grammar when called by the evaluator.
    fn verify(&self, code_verifier: &str, code_challenge: &str) -> bool;
}
