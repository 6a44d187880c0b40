//! Token analysis engine
//!
//! Orchestrates everything a token can reach: identity, repositories,
//! organizations, gists, SSH keys, CI/CD variables and secret names, and
//! security-relevant configuration. Every sub-step is individually
//! fault-tolerant - a missing grant on one resource degrades that resource
//! to "no data" and never aborts the rest of the run. Fixed caps bound the
//! number of remote calls regardless of how much a token can see.

mod batch;
mod progress;
mod report;

#[cfg(test)]
mod tests;

pub use batch::{quick_check, scan_tokens, QuickCheck, BATCH_PACING, QUICK_CHECK_CONCURRENCY, SCAN_PACING};
pub use progress::{ProgressEvent, TOTAL_STEPS};
pub use report::{
    kind_label, AnalysisReport, ConfigurationInventory, RiskSummary, VariableInventory,
};

use crate::github::types::{
    ActionsPermissions, EnvironmentsPage, Gist, OrgActionsPermissions, OrgConfig,
    OrgEnabledRepositories, Organization, PublicKey, RepoConfig, RepoSettings, Repository,
    SecretsPage, SelectedActions, User, VariableEntry, VariableKind, VariablesPage,
    WorkflowPermissions,
};
use crate::github::{parse_scopes, ApiError, Transport};
use crate::scanner;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Page size for every paginated listing.
pub const PER_PAGE: usize = 100;
/// Gists are a secondary signal; never fetch more than this many pages.
pub const GIST_PAGE_CAP: u32 = 5;
/// Repositories checked for variables/secrets.
pub const VARIABLE_REPO_CAP: usize = 10;
/// Organizations checked for variables/secrets.
pub const VARIABLE_ORG_CAP: usize = 5;
/// Repositories checked for configuration.
pub const CONFIG_REPO_CAP: usize = 5;
/// Organizations checked for configuration.
pub const CONFIG_ORG_CAP: usize = 3;
/// Repositories listed in an org's Actions repository policy.
pub const ORG_PERMISSION_REPO_CAP: usize = 10;

/// Whether the scope set unlocks the variables/secrets sweep.
///
/// Deliberately a substring check, so `repo`, `repo:status` and
/// `repo_deployment` all pass. Matching the gate exactly would change
/// which tokens get the sweep.
pub fn has_variables_scope(scopes: &[String]) -> bool {
    scopes.iter().any(|scope| {
        scope.contains("repo") || scope.contains("admin:org") || scope.contains("write:org")
    })
}

/// Whether the scope set unlocks the configuration sweep. Same substring
/// semantics as [`has_variables_scope`].
pub fn has_config_scope(scopes: &[String]) -> bool {
    scopes.iter().any(|scope| {
        scope.contains("repo") || scope.contains("admin:org") || scope.contains("admin:repo_hook")
    })
}

/// Bounded, partial-failure-tolerant enumeration for one token.
pub struct Analyzer<'a, T: Transport> {
    api: &'a T,
}

impl<'a, T: Transport> Analyzer<'a, T> {
    pub fn new(api: &'a T) -> Self {
        Self { api }
    }

    async fn fetch_json<D: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<D, ApiError> {
        let response = self.api.get(path, Some(token)).await?;
        serde_json::from_value(response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Validate a token: one `/user` call yielding identity and granted
    /// scopes. The only step whose failure is terminal for an analysis.
    pub async fn validate(&self, token: &str) -> Result<(User, Vec<String>), ApiError> {
        let response = self.api.get("/user", Some(token)).await?;
        let user: User = serde_json::from_value(response.body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let scopes = parse_scopes(response.oauth_scopes.as_deref());
        Ok((user, scopes))
    }

    /// All repositories the token can list, paginated until a short or
    /// empty page. The callback fires with (page, cumulative count) before
    /// each page fetch and once after the last.
    pub async fn repositories<F>(&self, token: &str, mut on_page: F) -> Vec<Repository>
    where
        F: FnMut(u32, usize),
    {
        let mut all: Vec<Repository> = Vec::new();
        let mut page: u32 = 1;

        loop {
            on_page(page, all.len());

            let path = format!("/user/repos?per_page={}&page={}", PER_PAGE, page);
            let repos: Vec<Repository> = match self.fetch_json(&path, token).await {
                Ok(repos) => repos,
                Err(e) => {
                    warn!("could not fetch repositories (page {}): {}", page, e);
                    break;
                }
            };

            if repos.is_empty() {
                break;
            }
            let short_page = repos.len() < PER_PAGE;
            all.extend(repos);
            if short_page {
                break;
            }
            page += 1;
        }

        on_page(page, all.len());
        all
    }

    /// Organizations the user belongs to. Best-effort: tokens routinely
    /// lack org read access and that is not an error.
    pub async fn organizations(&self, token: &str) -> Vec<Organization> {
        match self.fetch_json("/user/orgs", token).await {
            Ok(orgs) => orgs,
            Err(e) => {
                warn!("could not fetch organizations: {}", e);
                Vec::new()
            }
        }
    }

    /// Gists, paginated but hard-capped at [`GIST_PAGE_CAP`] pages.
    pub async fn gists<F>(&self, token: &str, mut on_page: F) -> Vec<Gist>
    where
        F: FnMut(u32, u32),
    {
        let mut all: Vec<Gist> = Vec::new();
        let mut page: u32 = 1;

        while page <= GIST_PAGE_CAP {
            on_page(page - 1, GIST_PAGE_CAP);

            let path = format!("/gists?per_page={}&page={}", PER_PAGE, page);
            let gists: Vec<Gist> = match self.fetch_json(&path, token).await {
                Ok(gists) => gists,
                Err(e) => {
                    warn!("could not fetch gists (page {}): {}", page, e);
                    break;
                }
            };

            if gists.is_empty() {
                break;
            }
            let short_page = gists.len() < PER_PAGE;
            all.extend(gists);
            if short_page {
                break;
            }
            page += 1;
        }

        all
    }

    /// SSH public keys on the account.
    pub async fn public_keys(&self, token: &str) -> Vec<PublicKey> {
        match self.fetch_json("/user/keys", token).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("could not fetch public keys: {}", e);
                Vec::new()
            }
        }
    }

    /// Repo-level Actions variables, secret names, and per-environment
    /// variables/secret names. Each sub-fetch fails independently.
    pub async fn repository_variables(&self, token: &str, full_name: &str) -> Vec<VariableEntry> {
        let mut entries = Vec::new();

        match self
            .fetch_json::<VariablesPage>(&format!("/repos/{}/actions/variables", full_name), token)
            .await
        {
            Ok(page) => {
                for var in page.variables {
                    entries.push(VariableEntry {
                        name: var.name,
                        value: var.value,
                        kind: VariableKind::RepositoryVariable,
                        environment: None,
                        visibility: None,
                        created_at: var.created_at,
                        updated_at: var.updated_at,
                    });
                }
            }
            Err(e) => warn!("could not fetch variables for {}: {}", full_name, e),
        }

        match self
            .fetch_json::<SecretsPage>(&format!("/repos/{}/actions/secrets", full_name), token)
            .await
        {
            Ok(page) => {
                for secret in page.secrets {
                    entries.push(VariableEntry {
                        name: secret.name,
                        // Secret values are never returned by the API
                        value: None,
                        kind: VariableKind::RepositorySecret,
                        environment: None,
                        visibility: None,
                        created_at: secret.created_at,
                        updated_at: secret.updated_at,
                    });
                }
            }
            Err(e) => warn!("could not fetch secrets for {}: {}", full_name, e),
        }

        match self
            .fetch_json::<EnvironmentsPage>(&format!("/repos/{}/environments", full_name), token)
            .await
        {
            Ok(page) => {
                for env in page.environments {
                    self.environment_variables(token, full_name, &env.name, &mut entries)
                        .await;
                }
            }
            Err(e) => warn!("could not fetch environments for {}: {}", full_name, e),
        }

        entries
    }

    async fn environment_variables(
        &self,
        token: &str,
        full_name: &str,
        env_name: &str,
        entries: &mut Vec<VariableEntry>,
    ) {
        match self
            .fetch_json::<VariablesPage>(
                &format!("/repos/{}/environments/{}/variables", full_name, env_name),
                token,
            )
            .await
        {
            Ok(page) => {
                for var in page.variables {
                    entries.push(VariableEntry {
                        name: var.name,
                        value: var.value,
                        kind: VariableKind::EnvironmentVariable,
                        environment: Some(env_name.to_string()),
                        visibility: None,
                        created_at: var.created_at,
                        updated_at: var.updated_at,
                    });
                }
            }
            Err(e) => warn!(
                "could not fetch environment variables for {}/{}: {}",
                full_name, env_name, e
            ),
        }

        match self
            .fetch_json::<SecretsPage>(
                &format!("/repos/{}/environments/{}/secrets", full_name, env_name),
                token,
            )
            .await
        {
            Ok(page) => {
                for secret in page.secrets {
                    entries.push(VariableEntry {
                        name: secret.name,
                        value: None,
                        kind: VariableKind::EnvironmentSecret,
                        environment: Some(env_name.to_string()),
                        visibility: None,
                        created_at: secret.created_at,
                        updated_at: secret.updated_at,
                    });
                }
            }
            Err(e) => warn!(
                "could not fetch environment secrets for {}/{}: {}",
                full_name, env_name, e
            ),
        }
    }

    /// Org-level Actions variables and secret names.
    pub async fn organization_variables(&self, token: &str, login: &str) -> Vec<VariableEntry> {
        let mut entries = Vec::new();

        match self
            .fetch_json::<VariablesPage>(&format!("/orgs/{}/actions/variables", login), token)
            .await
        {
            Ok(page) => {
                for var in page.variables {
                    entries.push(VariableEntry {
                        name: var.name,
                        value: var.value,
                        kind: VariableKind::OrganizationVariable,
                        environment: None,
                        visibility: var.visibility,
                        created_at: var.created_at,
                        updated_at: var.updated_at,
                    });
                }
            }
            Err(e) => warn!("could not fetch organization variables for {}: {}", login, e),
        }

        match self
            .fetch_json::<SecretsPage>(&format!("/orgs/{}/actions/secrets", login), token)
            .await
        {
            Ok(page) => {
                for secret in page.secrets {
                    entries.push(VariableEntry {
                        name: secret.name,
                        value: None,
                        kind: VariableKind::OrganizationSecret,
                        environment: None,
                        visibility: secret.visibility,
                        created_at: secret.created_at,
                        updated_at: secret.updated_at,
                    });
                }
            }
            Err(e) => warn!("could not fetch organization secrets for {}: {}", login, e),
        }

        entries
    }

    /// Repository configuration: basic settings always; Actions and
    /// workflow policy only when the basic settings show admin access.
    pub async fn repository_config(&self, token: &str, full_name: &str) -> RepoConfig {
        let mut config = RepoConfig::default();

        match self
            .fetch_json::<RepoSettings>(&format!("/repos/{}", full_name), token)
            .await
        {
            Ok(settings) => {
                config.has_admin_access = settings
                    .permissions
                    .as_ref()
                    .map(|p| p.admin)
                    .unwrap_or(false);
                config.basic = Some(settings);
            }
            Err(e) => warn!("could not fetch basic config for {}: {}", full_name, e),
        }

        if config.has_admin_access {
            match self
                .fetch_json::<ActionsPermissions>(
                    &format!("/repos/{}/actions/permissions", full_name),
                    token,
                )
                .await
            {
                Ok(perms) => config.actions_permissions = Some(perms),
                Err(e) => warn!("could not fetch actions permissions for {}: {}", full_name, e),
            }

            match self
                .fetch_json::<SelectedActions>(
                    &format!("/repos/{}/actions/permissions/selected-actions", full_name),
                    token,
                )
                .await
            {
                Ok(selected) => config.selected_actions = Some(selected),
                Err(e) => warn!("could not fetch selected actions for {}: {}", full_name, e),
            }

            match self
                .fetch_json::<WorkflowPermissions>(
                    &format!("/repos/{}/actions/permissions/workflow", full_name),
                    token,
                )
                .await
            {
                Ok(workflow) => config.workflow_permissions = Some(workflow),
                Err(e) => warn!("could not fetch workflow permissions for {}: {}", full_name, e),
            }
        }

        config
    }

    /// Organization configuration: four independent fetches.
    pub async fn organization_config(&self, token: &str, login: &str) -> OrgConfig {
        let mut config = OrgConfig::default();

        match self
            .fetch_json::<OrgActionsPermissions>(
                &format!("/orgs/{}/actions/permissions", login),
                token,
            )
            .await
        {
            Ok(perms) => config.actions_permissions = Some(perms),
            Err(e) => warn!("could not fetch org actions permissions for {}: {}", login, e),
        }

        match self
            .api
            .get(&format!("/orgs/{}/actions/permissions/repositories", login), Some(token))
            .await
        {
            Ok(response) => {
                config.repositories_permissions = Some(enabled_repositories(&response.body))
            }
            Err(e) => warn!(
                "could not fetch org repositories permissions for {}: {}",
                login, e
            ),
        }

        match self
            .fetch_json::<SelectedActions>(
                &format!("/orgs/{}/actions/permissions/selected-actions", login),
                token,
            )
            .await
        {
            Ok(selected) => config.selected_actions = Some(selected),
            Err(e) => warn!("could not fetch org selected actions for {}: {}", login, e),
        }

        match self
            .fetch_json::<WorkflowPermissions>(
                &format!("/orgs/{}/actions/permissions/workflow", login),
                token,
            )
            .await
        {
            Ok(workflow) => config.workflow_permissions = Some(workflow),
            Err(e) => warn!("could not fetch org workflow permissions for {}: {}", login, e),
        }

        config
    }

    /// Full analysis of one token: validation, then every enumeration step
    /// in order, with progress events before each phase.
    pub async fn analyze<F>(&self, token: &str, mut progress: F) -> AnalysisReport
    where
        F: FnMut(ProgressEvent),
    {
        let preview = scanner::redact(token);
        progress(ProgressEvent::new(0, "Initializing token analysis...", &preview));

        progress(ProgressEvent::new(
            1,
            "Validating token and fetching user info...",
            &preview,
        ));
        let (user, scopes) = match self.validate(token).await {
            Ok(result) => result,
            Err(e) => {
                return AnalysisReport::invalid(token, e.to_string(), self.api.quota());
            }
        };

        progress(ProgressEvent::new(
            2,
            "Analyzing token scopes and permissions...",
            &preview,
        ));

        progress(ProgressEvent::new(3, "Fetching accessible repositories...", &preview));
        let repositories = self
            .repositories(token, |page, count| {
                progress(ProgressEvent::new(
                    3,
                    format!(
                        "Fetching accessible repositories... (page {}, {} repos found)",
                        page, count
                    ),
                    &preview,
                ));
            })
            .await;

        progress(ProgressEvent::new(4, "Fetching user organizations...", &preview));
        let organizations = self.organizations(token).await;

        let gists = if scopes.iter().any(|s| s == "gist") {
            progress(ProgressEvent::new(5, "Fetching accessible gists...", &preview));
            self.gists(token, |current, total| {
                progress(ProgressEvent::new(
                    5,
                    format!("Fetching accessible gists... ({}/{} pages)", current, total),
                    &preview,
                ));
            })
            .await
        } else {
            progress(ProgressEvent::new(5, "Skipping gists (no gist scope)...", &preview));
            Vec::new()
        };

        let public_keys = if scopes
            .iter()
            .any(|s| s == "admin:public_key" || s == "read:public_key")
        {
            progress(ProgressEvent::new(6, "Fetching SSH public keys...", &preview));
            self.public_keys(token).await
        } else {
            progress(ProgressEvent::new(
                6,
                "Skipping public keys (no key scope)...",
                &preview,
            ));
            Vec::new()
        };

        let mut variables = VariableInventory::default();
        if has_variables_scope(&scopes) {
            let eligible: Vec<&Repository> = repositories
                .iter()
                .take(VARIABLE_REPO_CAP)
                .filter(|repo| {
                    repo.permissions
                        .as_ref()
                        .map(|p| p.admin || p.push)
                        .unwrap_or(false)
                })
                .collect();

            for (i, repo) in eligible.iter().enumerate() {
                progress(ProgressEvent::new(
                    7,
                    format!(
                        "Analyzing variables and secrets... ({}/{} repositories)",
                        i + 1,
                        eligible.len()
                    ),
                    &preview,
                ));
                let entries = self.repository_variables(token, &repo.full_name).await;
                variables.add_repository(&repo.full_name, entries);
            }

            let orgs_to_check: Vec<&Organization> =
                organizations.iter().take(VARIABLE_ORG_CAP).collect();
            for (i, org) in orgs_to_check.iter().enumerate() {
                progress(ProgressEvent::new(
                    7,
                    format!(
                        "Analyzing variables and secrets... ({}/{} organizations)",
                        i + 1,
                        orgs_to_check.len()
                    ),
                    &preview,
                ));
                let entries = self.organization_variables(token, &org.login).await;
                variables.add_organization(&org.login, entries);
            }
        } else {
            progress(ProgressEvent::new(
                7,
                "Skipping variables (no actions scope)...",
                &preview,
            ));
        }

        let mut configuration = ConfigurationInventory::default();
        if has_config_scope(&scopes) {
            for (i, repo) in repositories.iter().take(CONFIG_REPO_CAP).enumerate() {
                progress(ProgressEvent::new(
                    8,
                    format!(
                        "Analyzing security configuration... ({}/{} repositories)",
                        i + 1,
                        repositories.len().min(CONFIG_REPO_CAP)
                    ),
                    &preview,
                ));
                let config = self.repository_config(token, &repo.full_name).await;
                configuration.add_repository(&repo.full_name, config);
            }

            for (i, org) in organizations.iter().take(CONFIG_ORG_CAP).enumerate() {
                progress(ProgressEvent::new(
                    8,
                    format!(
                        "Analyzing security configuration... ({}/{} organizations)",
                        i + 1,
                        organizations.len().min(CONFIG_ORG_CAP)
                    ),
                    &preview,
                ));
                let config = self.organization_config(token, &org.login).await;
                configuration.add_organization(&org.login, config);
            }
        } else {
            progress(ProgressEvent::new(
                8,
                "Skipping configuration (no config scope)...",
                &preview,
            ));
        }

        progress(ProgressEvent::new(9, "Completing analysis...", &preview));

        AnalysisReport {
            token_preview: preview,
            valid: true,
            token_kind: kind_label(token),
            user: Some(user),
            scopes,
            repositories,
            organizations,
            gists,
            public_keys,
            variables,
            configuration,
            rate_limit: self.api.quota(),
            error: None,
        }
    }
}

/// Decode an org's Actions repository policy, truncating the repository
/// list to the first [`ORG_PERMISSION_REPO_CAP`] names.
fn enabled_repositories(body: &Value) -> OrgEnabledRepositories {
    let total_count = body
        .get("total_count")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let repositories = body
        .get("repositories")
        .and_then(Value::as_array)
        .map(|repos| {
            repos
                .iter()
                .take(ORG_PERMISSION_REPO_CAP)
                .filter_map(|repo| repo.get("full_name").and_then(Value::as_str))
                .map(|name| name.to_string())
                .collect()
        })
        .unwrap_or_default();

    OrgEnabledRepositories {
        total_count,
        repositories,
    }
}
