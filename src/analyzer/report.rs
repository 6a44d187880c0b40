//! Analysis report assembly
//!
//! Pure aggregation: no network calls happen here. A report is immutable
//! once built and safe to serialize for `--format json`.

use crate::github::types::{
    Gist, OrgConfig, PublicKey, RepoConfig, Repository, Organization, User, VariableEntry,
};
use crate::github::QuotaSnapshot;
use crate::scanner;
use crate::scopes::{self, RiskTier};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-repo and per-org variable/secret collections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VariableInventory {
    pub repositories: BTreeMap<String, Vec<VariableEntry>>,
    pub organizations: BTreeMap<String, Vec<VariableEntry>>,
    pub total_count: usize,
}

impl VariableInventory {
    /// Record a repo's entries; empty collections contribute nothing.
    pub fn add_repository(&mut self, full_name: &str, entries: Vec<VariableEntry>) {
        if !entries.is_empty() {
            self.total_count += entries.len();
            self.repositories.insert(full_name.to_string(), entries);
        }
    }

    pub fn add_organization(&mut self, login: &str, entries: Vec<VariableEntry>) {
        if !entries.is_empty() {
            self.total_count += entries.len();
            self.organizations.insert(login.to_string(), entries);
        }
    }
}

/// Per-repo and per-org configuration findings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigurationInventory {
    pub repositories: BTreeMap<String, RepoConfig>,
    pub organizations: BTreeMap<String, OrgConfig>,
    pub total_count: usize,
}

impl ConfigurationInventory {
    pub fn add_repository(&mut self, full_name: &str, config: RepoConfig) {
        if config.is_populated() {
            self.total_count += 1;
            self.repositories.insert(full_name.to_string(), config);
        }
    }

    pub fn add_organization(&mut self, login: &str, config: OrgConfig) {
        if config.is_populated() {
            self.total_count += 1;
            self.organizations.insert(login.to_string(), config);
        }
    }
}

/// Immutable result of analyzing one token.
///
/// Only the redacted preview of the token is ever stored.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub token_preview: String,
    pub valid: bool,
    pub token_kind: String,
    pub user: Option<User>,
    pub scopes: Vec<String>,
    pub repositories: Vec<Repository>,
    pub organizations: Vec<Organization>,
    pub gists: Vec<Gist>,
    pub public_keys: Vec<PublicKey>,
    pub variables: VariableInventory,
    pub configuration: ConfigurationInventory,
    pub rate_limit: QuotaSnapshot,
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Report for a token that failed validation: error set, everything
    /// enumerable empty.
    pub fn invalid(token: &str, error: String, rate_limit: QuotaSnapshot) -> Self {
        Self {
            token_preview: scanner::redact(token),
            valid: false,
            token_kind: kind_label(token),
            user: None,
            scopes: Vec::new(),
            repositories: Vec::new(),
            organizations: Vec::new(),
            gists: Vec::new(),
            public_keys: Vec::new(),
            variables: VariableInventory::default(),
            configuration: ConfigurationInventory::default(),
            rate_limit,
            error: Some(error),
        }
    }

    /// Risk partition of this report's scopes.
    pub fn risk_summary(&self) -> RiskSummary {
        RiskSummary::for_scopes(&self.scopes)
    }
}

/// Human-readable label for a token's family.
pub fn kind_label(token: &str) -> String {
    scanner::classify(token)
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| "Unknown token".to_string())
}

/// Granted scopes partitioned by risk tier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RiskSummary {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
    pub unknown: Vec<String>,
}

impl RiskSummary {
    pub fn for_scopes(scopes: &[String]) -> Self {
        let mut summary = Self::default();
        for scope in scopes {
            match scopes::lookup(scope).map(|info| info.risk) {
                Some(RiskTier::High) => summary.high.push(scope.clone()),
                Some(RiskTier::Medium) => summary.medium.push(scope.clone()),
                Some(RiskTier::Low) => summary.low.push(scope.clone()),
                None => summary.unknown.push(scope.clone()),
            }
        }
        summary
    }

    /// Whether the token has privileges worth an explicit warning.
    pub fn has_elevated(&self) -> bool {
        !self.high.is_empty() || !self.medium.is_empty()
    }
}
