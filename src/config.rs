// [library] Error handling - anyhow provides flexible error types at the configuration boundary
use anyhow::{bail, Result};

use crate::evaluator::PkceEvaluator;
use crate::methods::{CodeChallengeMethod, PlainChallengeMethod, S256ChallengeMethod};
use crate::registry::MethodRegistry;

/// PKCE configuration, loaded once at startup before serving traffic.
#[derive(Debug, Clone)]
pub struct PkceConfig {
    // [business] Method ids the server advertises and accepts
    pub challenge_methods: Vec<String>,
}

impl PkceConfig {
    /// Load configuration from environment variables.
    ///
    /// `PKCE_CHALLENGE_METHODS` is a comma-separated list of method ids and
    /// defaults to `plain,S256`. An unknown id fails construction here
    /// rather than surfacing on the first request.
    pub fn from_env() -> Result<Self> {
        // [library] Load .env file if present - useful for development environments
        dotenvy::dotenv().ok();

        let challenge_methods: Vec<String> = std::env::var("PKCE_CHALLENGE_METHODS")
            .unwrap_or_else(|_| "plain,S256".to_string())
            .split(',') // [rust] String splitting on comma delimiter
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        for id in &challenge_methods {
            if builtin_method(id).is_none() {
                bail!("unknown code_challenge_method in PKCE_CHALLENGE_METHODS: {id}");
            }
        }

        tracing::info!(
            "PKCE config loaded - challenge methods: {}",
            challenge_methods.join(", ")
        );

        Ok(Self { challenge_methods })
    }

    /// Build an evaluator over the configured method set.
    ///
    /// The registry always ends up with a `plain` entry, so the RFC default
    /// method resolves even under a trimmed-down configuration.
    pub fn build_evaluator(&self) -> PkceEvaluator {
        let mut builder = MethodRegistry::builder();
        for id in &self.challenge_methods {
            if let Some(method) = builtin_method(id) {
                builder = builder.register(method);
            }
        }
        PkceEvaluator::new(builder.build())
    }
}

impl Default for PkceConfig {
    fn default() -> Self {
        Self {
            challenge_methods: vec!["plain".to_string(), "S256".to_string()],
        }
    }
}

fn builtin_method(id: &str) -> Option<Box<dyn CodeChallengeMethod>> {
    match id {
        "plain" => Some(Box::new(PlainChallengeMethod)),
        "S256" => Some(Box::new(S256ChallengeMethod)),
        _ => None,
    }
}
