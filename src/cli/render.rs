//! Terminal rendering of analysis results
//!
//! Everything user-facing funnels through here: full reports, quick-check
//! lines, and the scope catalog views. Remote-originated text (logins,
//! descriptions) is printed as plain data.

use super::Output;
use crate::analyzer::{AnalysisReport, QuickCheck, RiskSummary};
use crate::github::types::VariableKind;
use crate::scopes::{self, RiskTier};

/// Render a full analysis report.
pub fn report(output: &Output, report: &AnalysisReport) {
    if report.valid {
        output.status_indicator("Valid", &report.token_preview, true);
    } else {
        output.status_indicator("Invalid", &report.token_preview, false);
    }

    if let Some(error) = &report.error {
        output.error(error);
    }

    output.key_value("Token Type:", &report.token_kind, false);
    output.key_value("Token Preview:", &report.token_preview, false);

    if let Some(user) = &report.user {
        output.key_value("Username:", &user.login, true);
        output.key_value("Name:", user.name.as_deref().unwrap_or("Not specified"), false);
        if let Some(account_type) = &user.account_type {
            output.key_value("Account Type:", account_type, false);
        }
        if let Some(public_repos) = user.public_repos {
            output.key_value("Public Repos:", &public_repos.to_string(), false);
        }
        if let Some(followers) = user.followers {
            output.key_value("Followers:", &followers.to_string(), false);
        }
    }

    let reset = report
        .rate_limit
        .reset
        .map(|epoch| format!("resets at epoch {}", epoch))
        .unwrap_or_else(|| "reset unknown".to_string());
    output.key_value(
        "API Quota:",
        &format!("{} remaining ({})", report.rate_limit.remaining, reset),
        false,
    );

    if !report.valid {
        return;
    }

    render_scopes(output, report);
    render_organizations(output, report);
    render_repositories(output, report);
    render_variables(output, report);
    render_configuration(output, report);
}

fn render_scopes(output: &Output, report: &AnalysisReport) {
    output.section_header("🔑 Token Scopes & Risk Analysis");

    if report.scopes.is_empty() {
        output.warning(
            "No scopes detected - this might be a fine-grained token with repository-specific permissions",
        );
        return;
    }

    let summary = report.risk_summary();
    if summary.has_elevated() {
        output.warning("This token has elevated privileges that could be dangerous if compromised!");
    }

    for scope in &summary.high {
        output.list_item(&format!("{} [HIGH RISK]", scope));
    }
    for scope in &summary.medium {
        output.list_item(&format!("{} [MEDIUM RISK]", scope));
    }
    for scope in &summary.low {
        output.list_item(&format!("{} [LOW RISK]", scope));
    }
    for scope in &summary.unknown {
        output.list_item(&format!("{} [UNKNOWN - review manually]", scope));
    }

    render_risk_counts(output, &summary);
}

fn render_risk_counts(output: &Output, summary: &RiskSummary) {
    let mut parts = Vec::new();
    if !summary.high.is_empty() {
        parts.push(format!("🔴 {} High Risk", summary.high.len()));
    }
    if !summary.medium.is_empty() {
        parts.push(format!("🟡 {} Medium Risk", summary.medium.len()));
    }
    if !summary.low.is_empty() {
        parts.push(format!("🟢 {} Low Risk", summary.low.len()));
    }
    if !summary.unknown.is_empty() {
        parts.push(format!("⚪ {} Unknown", summary.unknown.len()));
    }
    if !parts.is_empty() {
        output.key_value("Risk Summary:", &parts.join(" | "), false);
        output.indent("Run `tokenscope scopes <scope>` for detailed capabilities and risks");
    }
}

fn render_organizations(output: &Output, report: &AnalysisReport) {
    if report.organizations.is_empty() {
        return;
    }
    output.count("🏢", "Organizations", report.organizations.len());
    for org in &report.organizations {
        output.list_item(&org.login);
    }
}

const REPO_DISPLAY_LIMIT: usize = 20;

fn render_repositories(output: &Output, report: &AnalysisReport) {
    if report.repositories.is_empty() {
        return;
    }

    let private = report.repositories.iter().filter(|r| r.private).count();
    let public = report.repositories.len() - private;

    output.count("📁", "Accessible Repositories", report.repositories.len());
    output.key_value(
        "Visibility:",
        &format!("🔒 Private: {} | 🔓 Public: {}", private, public),
        false,
    );

    for repo in report.repositories.iter().take(REPO_DISPLAY_LIMIT) {
        let label = if repo.private { "Private" } else { "Public" };
        output.list_item(&format!("{} ({})", repo.full_name, label));
    }
    if report.repositories.len() > REPO_DISPLAY_LIMIT {
        output.indent(&format!(
            "... and {} more repositories",
            report.repositories.len() - REPO_DISPLAY_LIMIT
        ));
    }
}

fn variable_kind_label(kind: VariableKind) -> &'static str {
    match kind {
        VariableKind::RepositoryVariable => "repo variable",
        VariableKind::RepositorySecret => "repo secret",
        VariableKind::EnvironmentVariable => "env variable",
        VariableKind::EnvironmentSecret => "env secret",
        VariableKind::OrganizationVariable => "org variable",
        VariableKind::OrganizationSecret => "org secret",
    }
}

fn render_variables(output: &Output, report: &AnalysisReport) {
    if report.variables.total_count == 0 {
        return;
    }

    output.count("🔧", "CI/CD Variables & Secrets", report.variables.total_count);

    let sections = report
        .variables
        .repositories
        .iter()
        .chain(report.variables.organizations.iter());
    for (owner, entries) in sections {
        output.step(owner);
        for entry in entries {
            let value = entry.value.as_deref().unwrap_or("(value hidden)");
            let scope = entry
                .environment
                .as_deref()
                .map(|env| format!(" @{}", env))
                .unwrap_or_default();
            output.list_item(&format!(
                "{} = {} [{}{}]",
                entry.name,
                value,
                variable_kind_label(entry.kind),
                scope
            ));
        }
    }
}

fn render_configuration(output: &Output, report: &AnalysisReport) {
    if report.configuration.total_count == 0 {
        return;
    }

    output.count(
        "⚙️",
        "Security Configuration",
        report.configuration.total_count,
    );

    for (full_name, config) in &report.configuration.repositories {
        output.step(full_name);
        if let Some(basic) = &config.basic {
            let mut flags = Vec::new();
            flags.push(if basic.private { "private" } else { "public" });
            if basic.archived {
                flags.push("archived");
            }
            if basic.disabled {
                flags.push("disabled");
            }
            output.list_item(&format!("Settings: {}", flags.join(", ")));
        }
        output.list_item(&format!(
            "Admin access: {}",
            if config.has_admin_access { "yes" } else { "no" }
        ));
        if let Some(actions) = &config.actions_permissions {
            output.list_item(&format!(
                "Actions: enabled={}, allowed={}",
                actions.enabled.map(|b| b.to_string()).unwrap_or_else(|| "?".into()),
                actions.allowed_actions.as_deref().unwrap_or("?")
            ));
        }
        if let Some(workflow) = &config.workflow_permissions {
            output.list_item(&format!(
                "Workflow token: {} (can approve PRs: {})",
                workflow.default_workflow_permissions.as_deref().unwrap_or("?"),
                workflow
                    .can_approve_pull_request_reviews
                    .map(|b| b.to_string())
                    .unwrap_or_else(|| "?".into())
            ));
        }
    }

    for (login, config) in &report.configuration.organizations {
        output.step(&format!("org: {}", login));
        if let Some(actions) = &config.actions_permissions {
            output.list_item(&format!(
                "Actions: repositories={}, allowed={}",
                actions.enabled_repositories.as_deref().unwrap_or("?"),
                actions.allowed_actions.as_deref().unwrap_or("?")
            ));
        }
        if let Some(repos) = &config.repositories_permissions {
            output.list_item(&format!(
                "Covered repositories: {} total, first {} listed",
                repos.total_count,
                repos.repositories.len()
            ));
        }
        if let Some(workflow) = &config.workflow_permissions {
            output.list_item(&format!(
                "Workflow token: {}",
                workflow.default_workflow_permissions.as_deref().unwrap_or("?")
            ));
        }
    }
}

/// Render one incremental quick-check result.
pub fn quick_check_line(output: &Output, check: &QuickCheck) {
    let detail = match (&check.login, &check.error) {
        (Some(login), _) => format!("@{}", login),
        (None, Some(error)) => error.clone(),
        (None, None) => String::new(),
    };
    output.status_indicator(
        if check.valid { "Valid" } else { "Invalid" },
        &format!("{} {} {}", check.token_preview, check.token_kind, detail),
        check.valid,
    );
}

/// Render the detail view for one scope: description, capabilities, and the
/// appropriate warning tier.
pub fn scope_detail(output: &Output, scope: &str) {
    match scopes::lookup(scope) {
        Some(info) => {
            let emoji = match info.risk {
                RiskTier::High => "🔴",
                RiskTier::Medium => "🟡",
                RiskTier::Low => "🟢",
            };
            output.header(&format!("{} {} ({} RISK)", emoji, scope, info.risk));
            output.info(info.description);

            output.section_header("What this scope allows:");
            for capability in info.capabilities {
                output.list_item(capability);
            }

            if scopes::is_destructive(scope) {
                output.blank_line();
                output.warning(
                    "🚫 Destructive Operations Blocked: this scope allows permanent deletion of data. \
                     All destructive operations are blocked by this tool for safety.",
                );
            } else if info.risk == RiskTier::High {
                output.blank_line();
                output.warning(
                    "High Risk Scope: this permission grants significant access that could be dangerous \
                     if the token is compromised. Consider more restrictive scopes if possible.",
                );
            }
        }
        None => {
            output.header(&format!("⚪ {} (UNKNOWN SCOPE)", scope));
            output.info("This scope is not recognized in our database. It may be a new or deprecated scope.");
            output.warning(
                "Unknown Scope: not in the risk assessment database. \
                 Exercise caution and verify its capabilities before use.",
            );
        }
    }
}

/// Render the whole catalog grouped by tier.
pub fn scope_catalog(output: &Output) {
    for tier in [RiskTier::High, RiskTier::Medium, RiskTier::Low] {
        let entries = scopes::scopes_by_tier(tier);
        output.section_header(&format!("{} RISK ({})", tier, entries.len()));
        for (name, info) in entries {
            output.key_value(name, info.description, tier == RiskTier::High);
        }
    }
    output.blank_line();
    output.info("Run `tokenscope scopes <scope>` for capabilities and warnings");
}
