//! Unique name issuing for generated identifiers
//!
//! The [`UniqueNamer`] is the single naming authority for one build run.
//! It normalizes candidates to PascalCase identifiers and guarantees that
//! every name it issues is unique within its namespace: one namespace for
//! class names, one for context names, and one per scope for property
//! names. Naming never fails; degenerate candidates fall back to a
//! generated placeholder.

use heck::ToPascalCase;
use std::collections::{HashMap, HashSet};

// ============================================================================
// UniqueNamer
// ============================================================================

/// Issues collision-free PascalCase identifiers from per-purpose namespaces.
///
/// A class name and a context name derived from the same table never
/// collide with each other, but two tables normalizing to the same class
/// name are disambiguated with a numeric suffix. Property names are
/// unique only within their own scope (the owning entity's class name).
///
/// One namer serves exactly one build run; construct a fresh one per run
/// so issued-name state never leaks across builds.
#[derive(Debug, Default)]
pub struct UniqueNamer {
    /// Names issued from the class-name namespace
    class_names: HashSet<String>,

    /// Names issued from the context-name namespace
    context_names: HashSet<String>,

    /// Names issued per scope (scope = owning entity class name)
    scoped_names: HashMap<String, HashSet<String>>,

    /// Counter for placeholder names generated from degenerate candidates
    placeholder_counter: u32,
}

impl UniqueNamer {
    /// Create a fresh namer with empty namespaces
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a unique class name for the candidate
    pub fn unique_class_name(&mut self, candidate: &str) -> String {
        let base = self.normalize(candidate);
        Self::issue(&mut self.class_names, base)
    }

    /// Issue a unique context name for the candidate
    pub fn unique_context_name(&mut self, candidate: &str) -> String {
        let base = self.normalize(candidate);
        Self::issue(&mut self.context_names, base)
    }

    /// Issue a name unique within the given scope
    pub fn unique_name(&mut self, scope: &str, candidate: &str) -> String {
        let base = self.normalize(candidate);
        let issued = self.scoped_names.entry(scope.to_string()).or_default();
        Self::issue(issued, base)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Normalize a candidate to a PascalCase identifier, falling back to a
    /// generated placeholder when nothing usable remains.
    fn normalize(&mut self, candidate: &str) -> String {
        let pascal = candidate.to_pascal_case();

        let starts_valid = pascal
            .chars()
            .next()
            .map(|c| c.is_alphabetic() || c == '_')
            .unwrap_or(false);

        if starts_valid {
            pascal
        } else {
            self.placeholder_counter += 1;
            format!("Generated{}", self.placeholder_counter)
        }
    }

    /// Record and return the first unused name derived from `base` by
    /// appending the suffixes `2, 3, …`.
    fn issue(issued: &mut HashSet<String>, base: String) -> String {
        let mut name = base.clone();
        let mut suffix = 2u32;
        while issued.contains(&name) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }
        issued.insert(name.clone());
        name
    }
}

// ============================================================================
// Tests
// ============================================================================
