//! Lookup from `code_challenge_method` id to implementation.

use std::collections::{HashMap, HashSet};
use std::fmt;

// [library] Structured logging for configuration-time diagnostics
use tracing::warn;

use crate::methods::{CodeChallengeMethod, PlainChallengeMethod, S256ChallengeMethod};

/// Registered challenge methods, keyed by their case-sensitive id.
///
/// Built once through [`MethodRegistryBuilder`] and read-only afterwards, so
/// it can be shared across request threads without coordination. Changing
/// the method set at runtime means building a fresh registry and swapping it
/// behind an `Arc`, never mutating in place.
pub struct MethodRegistry {
    methods: HashMap<String, Box<dyn CodeChallengeMethod>>,
}

impl MethodRegistry {
    pub fn builder() -> MethodRegistryBuilder {
        MethodRegistryBuilder::default()
    }

    /// The canonical configuration: `plain` and `S256`.
    pub fn default_set() -> Self {
        Self::builder().register(Box::new(S256ChallengeMethod)).build()
    }

    /// Resolve a method id. Unknown ids resolve to `None`.
    pub fn get(&self, id: &str) -> Option<&dyn CodeChallengeMethod> {
        self.methods.get(id).map(Box::as_ref)
    }

    pub fn is_supported(&self, id: &str) -> bool {
        self.methods.contains_key(id)
    }

    /// Ids of every registered method, e.g. for discovery metadata.
    pub fn supported_ids(&self) -> HashSet<&str> {
        self.methods.keys().map(String::as_str).collect()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::default_set()
    }
}

// [rust] Manual Debug - trait objects carry no Debug, the ids are what matters
impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("MethodRegistry").field("methods", &ids).finish()
    }
}

/// Builder for [`MethodRegistry`].
///
/// `build` guarantees a `plain` entry: the built-in plain method is inserted
/// when the caller has not registered one of their own.
#[derive(Default)]
pub struct MethodRegistryBuilder {
    methods: HashMap<String, Box<dyn CodeChallengeMethod>>,
}

impl MethodRegistryBuilder {
    /// Register a method under its own id.
    ///
    /// Registering an id that is already present replaces the earlier entry;
    /// the replacement is logged. This is the only mutation the registry
    /// exposes, and only before `build`.
    pub fn register(mut self, method: Box<dyn CodeChallengeMethod>) -> Self {
        let id = method.id().to_string();
        if self.methods.insert(id.clone(), method).is_some() {
            warn!(method = %id, "replacing previously registered code_challenge_method");
        }
        self
    }

    pub fn build(mut self) -> MethodRegistry {
        self.methods
            .entry("plain".to_string())
            .or_insert_with(|| Box::new(PlainChallengeMethod));
        MethodRegistry { methods: self.methods }
    }
}
