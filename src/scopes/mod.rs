//! Scope risk classification
//!
//! A static catalog mapping OAuth scope names to a risk tier, a description,
//! and the concrete capabilities the scope grants. Scopes missing from the
//! catalog are treated as unknown and flagged for manual review - never
//! assumed safe.

use serde::Serialize;
use std::collections::HashMap;

mod catalog;

#[cfg(test)]
mod tests;

pub use catalog::SCOPE_CATALOG;

/// How dangerous a scope is if the token leaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "LOW"),
            RiskTier::Medium => write!(f, "MEDIUM"),
            RiskTier::High => write!(f, "HIGH"),
        }
    }
}

/// Catalog entry for one scope.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScopeInfo {
    pub risk: RiskTier,
    pub description: &'static str,
    pub capabilities: &'static [&'static str],
}

/// Look up a scope in the catalog. None means the scope is unknown to us.
pub fn lookup(scope: &str) -> Option<&'static ScopeInfo> {
    SCOPE_CATALOG.get(scope)
}

/// Scopes that permit permanent data destruction. The analyzer never issues
/// such calls; the detail view carries an explicit blocked-operations notice.
pub fn is_destructive(scope: &str) -> bool {
    matches!(scope, "delete_repo" | "delete:packages")
}

/// All catalog entries of a given tier, sorted by scope name.
pub fn scopes_by_tier(tier: RiskTier) -> Vec<(&'static str, &'static ScopeInfo)> {
    let mut entries: Vec<_> = SCOPE_CATALOG
        .iter()
        .filter(|(_, info)| info.risk == tier)
        .map(|(name, info)| (*name, info))
        .collect();
    entries.sort_by_key(|(name, _)| *name);
    entries
}

/// Convenience handle used by tests and rendering.
pub fn catalog() -> &'static HashMap<&'static str, ScopeInfo> {
    &SCOPE_CATALOG
}
