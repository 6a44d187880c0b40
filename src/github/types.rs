//! Response models for the subset of the GitHub API the analyzer reads
//!
//! Fields the analyzer never looks at are simply not modeled; serde ignores
//! the rest of each payload. Almost everything is optional because the same
//! endpoints answer very differently depending on token grants.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The authenticated user behind a token (`/user`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub avatar_url: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
}

/// A repository the token can see (`/user/repos`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
    pub html_url: Option<String>,
    pub owner: Option<RepoOwner>,
    pub permissions: Option<RepoPermissions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// The caller's effective permission bitmap on a repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoPermissions {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub pull: bool,
}

/// An organization membership (`/user/orgs`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub login: String,
    pub description: Option<String>,
}

/// A gist (`/gists`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    pub html_url: Option<String>,
}

/// An SSH public key on the account (`/user/keys`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKey {
    pub id: u64,
    pub key: String,
    pub title: Option<String>,
}

/// Page shapes for Actions variables/secrets/environments listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariablesPage {
    #[serde(default)]
    pub variables: Vec<RawVariable>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretsPage {
    #[serde(default)]
    pub secrets: Vec<RawSecret>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentsPage {
    #[serde(default)]
    pub environments: Vec<Environment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Environment {
    pub name: String,
}

/// A variable as the API returns it - values are present for variables.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVariable {
    pub name: String,
    pub value: Option<String>,
    pub visibility: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A secret as the API returns it - names and metadata only, never values.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSecret {
    pub name: String,
    pub visibility: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Where a collected variable or secret entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    RepositoryVariable,
    RepositorySecret,
    EnvironmentVariable,
    EnvironmentSecret,
    OrganizationVariable,
    OrganizationSecret,
}

/// One collected CI/CD variable or secret.
///
/// `value` is always None for secrets: the API never returns secret values,
/// only names and timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct VariableEntry {
    pub name: String,
    pub value: Option<String>,
    pub kind: VariableKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Basic repository settings from `/repos/{full_name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSettings {
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
    pub permissions: Option<RepoPermissions>,
    pub security_and_analysis: Option<Value>,
    pub allow_forking: Option<bool>,
    pub allow_merge_commit: Option<bool>,
    pub allow_squash_merge: Option<bool>,
    pub allow_rebase_merge: Option<bool>,
    pub delete_branch_on_merge: Option<bool>,
}

/// Repo-level Actions policy (`/repos/{full}/actions/permissions`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsPermissions {
    pub enabled: Option<bool>,
    pub allowed_actions: Option<String>,
    pub selected_actions_url: Option<String>,
}

/// Org-level Actions policy (`/orgs/{login}/actions/permissions`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgActionsPermissions {
    pub enabled_repositories: Option<String>,
    pub allowed_actions: Option<String>,
    pub selected_actions_url: Option<String>,
}

/// Allowlist details when `allowed_actions` is "selected".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedActions {
    pub github_owned_allowed: Option<bool>,
    pub verified_allowed: Option<bool>,
    #[serde(default)]
    pub patterns_allowed: Vec<String>,
}

/// Default workflow token policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowPermissions {
    pub default_workflow_permissions: Option<String>,
    pub can_approve_pull_request_reviews: Option<bool>,
}

/// Which repositories an org's Actions policy covers.
#[derive(Debug, Clone, Serialize)]
pub struct OrgEnabledRepositories {
    pub total_count: u64,
    /// Truncated to the first 10 entries
    pub repositories: Vec<String>,
}

/// Everything gathered about one repository's configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoConfig {
    pub basic: Option<RepoSettings>,
    pub actions_permissions: Option<ActionsPermissions>,
    pub selected_actions: Option<SelectedActions>,
    pub workflow_permissions: Option<WorkflowPermissions>,
    pub has_admin_access: bool,
}

impl RepoConfig {
    /// Whether anything useful was gathered.
    pub fn is_populated(&self) -> bool {
        self.basic.is_some()
            || self.actions_permissions.is_some()
            || self.workflow_permissions.is_some()
    }
}

/// Everything gathered about one organization's configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrgConfig {
    pub actions_permissions: Option<OrgActionsPermissions>,
    pub repositories_permissions: Option<OrgEnabledRepositories>,
    pub selected_actions: Option<SelectedActions>,
    pub workflow_permissions: Option<WorkflowPermissions>,
}

impl OrgConfig {
    pub fn is_populated(&self) -> bool {
        self.actions_permissions.is_some() || self.workflow_permissions.is_some()
    }
}
