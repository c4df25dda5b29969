//! PKCE (RFC 7636) validation core for the OAuth2 authorization code grant.
//!
//! Binds the `code_challenge` captured at the authorize step to the
//! `code_verifier` presented at the token step, so an intercepted
//! authorization code cannot be redeemed without the original secret.
//! The crate owns the decision logic only: code issuance and persistence,
//! client authentication, redirect URI handling and HTTP routing belong to
//! the surrounding server.

pub mod config; // Environment-driven method set and evaluator construction
pub mod error; // PKCE error taxonomy
pub mod evaluator; // Decision procedure spanning the authorize and token steps
pub mod generate; // Client-side verifier and challenge helpers
pub mod methods; // Challenge method implementations (plain, S256)
pub mod registry; // Method id -> implementation lookup
pub mod syntax; // Shared parameter grammar for challenge and verifier
pub mod transport; // Verifier-in-code encoding for single-string code stores

// [rust] Re-export the main entry points for a flat namespace
pub use config::PkceConfig;
pub use error::PkceError;
pub use evaluator::{PkceEvaluator, PkceOutcome};
pub use methods::{CodeChallengeMethod, PlainChallengeMethod, S256ChallengeMethod};
pub use registry::{MethodRegistry, MethodRegistryBuilder};
