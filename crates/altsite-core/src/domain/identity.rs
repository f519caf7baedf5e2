//! The `Identity` value object and the rewrite rule set derived from a pair
//! of identities.
//!
//! An `Identity` is the domain/hostname string embedded in site content
//! (`findtorontoevents.ca`). A `RewriteRules` value is the ordered list of
//! literal replacements that retargets content from one identity to another.
//!
//! # Rule ordering
//!
//! Order matters: the scheme-qualified URL forms are longer and more specific
//! than the bare hostname, so they must be applied first. Applying the bare
//! rule to `https://example.com` after the scheme rule already ran would
//! corrupt the scheme (`https://alt.https://alt.orgom`-style artifacts).
//!
//! # Idempotence
//!
//! Applying a rule set twice equals applying it once: after the first pass no
//! source-identity pattern remains in the content, so the second pass finds
//! nothing to replace. This makes re-running a deployment safe.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── Identity ──────────────────────────────────────────────────────────────────

/// A validated bare hostname embedded in content, subject to rewriting.
///
/// Guaranteed on construction: non-empty, no whitespace, no scheme separator
/// (`:`), no path separator (`/`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Validate and wrap a hostname string.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        let reject = |reason: &str| DomainError::InvalidIdentity {
            value: value.clone(),
            reason: reason.into(),
        };

        if value.trim().is_empty() {
            return Err(reject("identity cannot be empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(reject("identity cannot contain whitespace"));
        }
        if value.contains(':') {
            return Err(reject("identity must not include a scheme or port"));
        }
        if value.contains('/') {
            return Err(reject("identity must not include a path"));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identity {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

// ── Rewrite rules ─────────────────────────────────────────────────────────────

/// Ordered literal string replacements derived from a (source, target)
/// identity pair.
///
/// Seven forms, most specific first:
///
/// 1. `https://www.X` → `https://www.Y`
/// 2. `http://www.X`  → `http://www.Y`
/// 3. `https://X`     → `https://Y`
/// 4. `http://X`      → `http://Y`
/// 5. `'X'`           → `'Y'`   (hostname comparisons in scripts)
/// 6. `"X"`           → `"Y"`
/// 7. `X`             → `Y`    (bare fallback: display text, branding)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRules {
    rules: Vec<(String, String)>,
}

impl RewriteRules {
    /// Build the rule set for rewriting `source` references into `target`.
    pub fn derive(source: &Identity, target: &Identity) -> Result<Self, DomainError> {
        if source == target {
            return Err(DomainError::IdentitiesEqual {
                identity: source.to_string(),
            });
        }

        let (s, t) = (source.as_str(), target.as_str());
        let rules = vec![
            (format!("https://www.{s}"), format!("https://www.{t}")),
            (format!("http://www.{s}"), format!("http://www.{t}")),
            (format!("https://{s}"), format!("https://{t}")),
            (format!("http://{s}"), format!("http://{t}")),
            (format!("'{s}'"), format!("'{t}'")),
            (format!("\"{s}\""), format!("\"{t}\"")),
            (s.to_owned(), t.to_owned()),
        ];

        Ok(Self { rules })
    }

    /// Apply every rule in order, returning the rewritten content.
    pub fn apply(&self, content: &str) -> String {
        let mut out = content.to_owned();
        for (old, new) in &self.rules {
            out = out.replace(old, new);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
