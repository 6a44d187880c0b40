//! Analyzer tests
//!
//! All enumeration behavior is exercised against an in-memory transport:
//! pagination termination, cost caps, scope gating, and partial-failure
//! degradation, with the call log asserting exactly which endpoints were hit.

use super::*;
use crate::github::{ApiError, ApiResponse, QuotaSnapshot, Transport};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

enum Route {
    Ok(Value),
    Status(u16),
}

struct FakeApi {
    routes: HashMap<String, Route>,
    oauth_scopes: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            routes: HashMap::new(),
            oauth_scopes: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_scopes(mut self, scopes: &str) -> Self {
        self.oauth_scopes = Some(scopes.to_string());
        self
    }

    fn route(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_string(), Route::Ok(body));
        self
    }

    fn fail(mut self, path: &str, status: u16) -> Self {
        self.routes.insert(path.to_string(), Route::Status(status));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_matching(&self, fragment: &str) -> usize {
        self.calls()
            .iter()
            .filter(|path| path.contains(fragment))
            .count()
    }
}

impl Transport for FakeApi {
    async fn get(&self, path: &str, _token: Option<&str>) -> Result<ApiResponse, ApiError> {
        self.calls.lock().unwrap().push(path.to_string());
        match self.routes.get(path) {
            Some(Route::Ok(body)) => Ok(ApiResponse {
                status: 200,
                body: body.clone(),
                oauth_scopes: self.oauth_scopes.clone(),
            }),
            Some(Route::Status(status)) => Err(ApiError::from_status(*status, "simulated")),
            None => Err(ApiError::NotFound),
        }
    }

    fn quota(&self) -> QuotaSnapshot {
        QuotaSnapshot {
            remaining: 4999,
            reset: Some(1_700_000_000),
        }
    }
}

fn token() -> String {
    format!("ghp_{}", "t".repeat(36))
}

fn user_json() -> Value {
    json!({ "login": "octocat", "name": "Octo Cat", "type": "User" })
}

fn repo_json(full_name: &str, admin: bool, push: bool) -> Value {
    json!({
        "name": full_name.split('/').next_back().unwrap(),
        "full_name": full_name,
        "private": false,
        "permissions": { "admin": admin, "push": push, "pull": true }
    })
}

fn repo_page(count: usize, admin: bool) -> Value {
    let repos: Vec<Value> = (0..count)
        .map(|i| repo_json(&format!("octocat/repo-{}", i), admin, true))
        .collect();
    Value::Array(repos)
}

fn no_progress(_: ProgressEvent) {}

#[tokio::test]
async fn test_validate_parses_user_and_scopes() {
    let api = FakeApi::new()
        .with_scopes("repo, gist")
        .route("/user", user_json());
    let analyzer = Analyzer::new(&api);

    let (user, scopes) = analyzer.validate(&token()).await.unwrap();
    assert_eq!(user.login, "octocat");
    assert_eq!(scopes, vec!["repo", "gist"]);
}

#[tokio::test]
async fn test_pagination_stops_on_short_page() {
    let api = FakeApi::new()
        .route("/user/repos?per_page=100&page=1", repo_page(100, false))
        .route("/user/repos?per_page=100&page=2", repo_page(30, false));
    let analyzer = Analyzer::new(&api);

    let repos = analyzer.repositories(&token(), |_, _| {}).await;
    assert_eq!(repos.len(), 130);
    assert_eq!(api.calls_matching("/user/repos"), 2);
}

#[tokio::test]
async fn test_pagination_stops_on_empty_page() {
    let api = FakeApi::new()
        .route("/user/repos?per_page=100&page=1", repo_page(100, false))
        .route("/user/repos?per_page=100&page=2", json!([]));
    let analyzer = Analyzer::new(&api);

    let repos = analyzer.repositories(&token(), |_, _| {}).await;
    assert_eq!(repos.len(), 100);
    // Page 3 must never be requested
    assert_eq!(api.calls_matching("/user/repos"), 2);
}

#[tokio::test]
async fn test_pagination_progress_callback_fires_per_page() {
    let api = FakeApi::new()
        .route("/user/repos?per_page=100&page=1", repo_page(100, false))
        .route("/user/repos?per_page=100&page=2", repo_page(5, false));
    let analyzer = Analyzer::new(&api);

    let mut seen = Vec::new();
    analyzer
        .repositories(&token(), |page, count| seen.push((page, count)))
        .await;

    // Before page 1, before page 2, and a final update
    assert_eq!(seen, vec![(1, 0), (2, 100), (2, 105)]);
}

#[tokio::test]
async fn test_gists_never_exceed_five_pages() {
    let mut api = FakeApi::new();
    // The source claims endless full pages
    for page in 1..=20 {
        let gists: Vec<Value> = (0..100)
            .map(|i| json!({ "id": format!("g{}-{}", page, i), "public": true }))
            .collect();
        api = api.route(
            &format!("/gists?per_page=100&page={}", page),
            Value::Array(gists),
        );
    }
    let analyzer = Analyzer::new(&api);

    let gists = analyzer.gists(&token(), |_, _| {}).await;
    assert_eq!(api.calls_matching("/gists"), 5);
    assert_eq!(gists.len(), 500);
}

#[tokio::test]
async fn test_invalid_token_yields_invalid_report() {
    let api = FakeApi::new().fail("/user", 401);
    let analyzer = Analyzer::new(&api);

    let report = analyzer.analyze(&token(), no_progress).await;

    assert!(!report.valid);
    assert_eq!(
        report.error.as_deref(),
        Some("Invalid token or insufficient permissions")
    );
    assert!(report.repositories.is_empty());
    assert!(report.organizations.is_empty());
    assert!(report.gists.is_empty());
    assert!(report.public_keys.is_empty());
    // Only the validation call went out
    assert_eq!(api.calls(), vec!["/user"]);
}

#[tokio::test]
async fn test_org_failure_does_not_fail_analysis() {
    let api = FakeApi::new()
        .with_scopes("")
        .route("/user", user_json())
        .route("/user/repos?per_page=100&page=1", repo_page(3, false))
        .fail("/user/orgs", 403);
    let analyzer = Analyzer::new(&api);

    let report = analyzer.analyze(&token(), no_progress).await;

    assert!(report.valid);
    assert_eq!(report.repositories.len(), 3);
    assert!(report.organizations.is_empty());
    assert!(report.error.is_none());
}

#[tokio::test]
async fn test_repo_scope_substring_gates_variables_and_config() {
    // "repo" contains "repo" - both sweeps must be attempted
    let api = FakeApi::new()
        .with_scopes("repo")
        .route("/user", user_json())
        .route("/user/repos?per_page=100&page=1", repo_page(2, true))
        .route("/user/orgs", json!([]));
    let analyzer = Analyzer::new(&api);

    analyzer.analyze(&token(), no_progress).await;

    assert!(api.calls_matching("/actions/variables") > 0);
    assert!(api.calls_matching("/repos/octocat/repo-0") > 0);
}

#[tokio::test]
async fn test_user_email_scope_skips_variables_and_config() {
    let api = FakeApi::new()
        .with_scopes("user:email")
        .route("/user", user_json())
        .route("/user/repos?per_page=100&page=1", repo_page(2, true))
        .route("/user/orgs", json!([]));
    let analyzer = Analyzer::new(&api);

    analyzer.analyze(&token(), no_progress).await;

    assert_eq!(api.calls_matching("/actions/"), 0);
    assert_eq!(api.calls_matching("/repos/"), 0);
}

#[tokio::test]
async fn test_repo_status_scope_passes_substring_gate() {
    assert!(has_variables_scope(&["repo:status".to_string()]));
    assert!(has_config_scope(&["repo_deployment".to_string()]));
    assert!(!has_variables_scope(&["user:email".to_string()]));
    assert!(!has_config_scope(&["gist".to_string()]));
    assert!(has_variables_scope(&["write:org".to_string()]));
    assert!(has_config_scope(&["admin:repo_hook".to_string()]));
}

#[tokio::test]
async fn test_variables_total_count_matches_entries() {
    let api = FakeApi::new()
        .with_scopes("repo")
        .route("/user", user_json())
        .route(
            "/user/repos?per_page=100&page=1",
            json!([repo_json("octocat/app", true, true)]),
        )
        .route("/user/orgs", json!([{ "login": "acme" }]))
        .route(
            "/repos/octocat/app/actions/variables",
            json!({ "variables": [
                { "name": "DEPLOY_ENV", "value": "prod" },
                { "name": "REGION", "value": "eu-west-1" }
            ]}),
        )
        .route(
            "/repos/octocat/app/actions/secrets",
            json!({ "secrets": [{ "name": "DEPLOY_KEY" }] }),
        )
        .route("/repos/octocat/app/environments", json!({ "environments": [] }))
        .route(
            "/orgs/acme/actions/variables",
            json!({ "variables": [{ "name": "ORG_VAR", "value": "1", "visibility": "all" }] }),
        )
        .route("/orgs/acme/actions/secrets", json!({ "secrets": [] }))
        .route("/repos/octocat/app", repo_json("octocat/app", true, true));
    let analyzer = Analyzer::new(&api);

    let report = analyzer.analyze(&token(), no_progress).await;

    let repo_entries: usize = report
        .variables
        .repositories
        .values()
        .map(|v| v.len())
        .sum();
    let org_entries: usize = report
        .variables
        .organizations
        .values()
        .map(|v| v.len())
        .sum();
    assert_eq!(report.variables.total_count, repo_entries + org_entries);
    assert_eq!(report.variables.total_count, 4);

    // Secret values never come back from the API
    let app_vars = &report.variables.repositories["octocat/app"];
    let secret = app_vars.iter().find(|e| e.name == "DEPLOY_KEY").unwrap();
    assert!(secret.value.is_none());
}

#[tokio::test]
async fn test_environment_variables_are_collected() {
    let api = FakeApi::new()
        .route(
            "/repos/octocat/app/actions/variables",
            json!({ "variables": [] }),
        )
        .route("/repos/octocat/app/actions/secrets", json!({ "secrets": [] }))
        .route(
            "/repos/octocat/app/environments",
            json!({ "environments": [{ "name": "production" }] }),
        )
        .route(
            "/repos/octocat/app/environments/production/variables",
            json!({ "variables": [{ "name": "ENV_URL", "value": "https://prod" }] }),
        )
        .route(
            "/repos/octocat/app/environments/production/secrets",
            json!({ "secrets": [{ "name": "ENV_TOKEN" }] }),
        );
    let analyzer = Analyzer::new(&api);

    let entries = analyzer.repository_variables(&token(), "octocat/app").await;

    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .all(|e| e.environment.as_deref() == Some("production")));
    let secret = entries.iter().find(|e| e.name == "ENV_TOKEN").unwrap();
    assert!(secret.value.is_none());
}

#[tokio::test]
async fn test_non_admin_repo_skips_gated_config() {
    let api = FakeApi::new().route(
        "/repos/octocat/lib",
        repo_json("octocat/lib", false, true),
    );
    let analyzer = Analyzer::new(&api);

    let config = analyzer.repository_config(&token(), "octocat/lib").await;

    assert!(config.basic.is_some());
    assert!(!config.has_admin_access);
    assert!(config.actions_permissions.is_none());
    assert!(config.workflow_permissions.is_none());
    // Only the basic settings call went out
    assert_eq!(api.calls(), vec!["/repos/octocat/lib"]);
}

#[tokio::test]
async fn test_admin_repo_fetches_gated_config() {
    let api = FakeApi::new()
        .route("/repos/octocat/infra", repo_json("octocat/infra", true, true))
        .route(
            "/repos/octocat/infra/actions/permissions",
            json!({ "enabled": true, "allowed_actions": "selected" }),
        )
        .route(
            "/repos/octocat/infra/actions/permissions/selected-actions",
            json!({ "github_owned_allowed": true, "verified_allowed": false, "patterns_allowed": ["octocat/*"] }),
        )
        .route(
            "/repos/octocat/infra/actions/permissions/workflow",
            json!({ "default_workflow_permissions": "read", "can_approve_pull_request_reviews": false }),
        );
    let analyzer = Analyzer::new(&api);

    let config = analyzer.repository_config(&token(), "octocat/infra").await;

    assert!(config.has_admin_access);
    assert_eq!(
        config.actions_permissions.as_ref().and_then(|p| p.enabled),
        Some(true)
    );
    assert_eq!(
        config
            .selected_actions
            .as_ref()
            .map(|s| s.patterns_allowed.clone()),
        Some(vec!["octocat/*".to_string()])
    );
    assert_eq!(
        config
            .workflow_permissions
            .as_ref()
            .and_then(|w| w.default_workflow_permissions.as_deref()),
        Some("read")
    );
}

#[tokio::test]
async fn test_org_config_truncates_repository_list() {
    let repos: Vec<Value> = (0..25)
        .map(|i| json!({ "full_name": format!("acme/repo-{}", i) }))
        .collect();
    let api = FakeApi::new()
        .fail("/orgs/acme/actions/permissions", 403)
        .route(
            "/orgs/acme/actions/permissions/repositories",
            json!({ "total_count": 25, "repositories": repos }),
        )
        .fail("/orgs/acme/actions/permissions/selected-actions", 403)
        .route(
            "/orgs/acme/actions/permissions/workflow",
            json!({ "default_workflow_permissions": "write" }),
        );
    let analyzer = Analyzer::new(&api);

    let config = analyzer.organization_config(&token(), "acme").await;

    // Each sub-fetch is independent: two failed, two succeeded
    assert!(config.actions_permissions.is_none());
    assert!(config.selected_actions.is_none());
    let repos_perms = config.repositories_permissions.unwrap();
    assert_eq!(repos_perms.total_count, 25);
    assert_eq!(repos_perms.repositories.len(), ORG_PERMISSION_REPO_CAP);
    assert!(config.workflow_permissions.is_some());
}

#[tokio::test]
async fn test_variable_sweep_respects_repo_cap_and_permissions() {
    // 15 repos, all with push access: only the first 10 may be swept
    let mut api = FakeApi::new()
        .with_scopes("repo")
        .route("/user", user_json())
        .route("/user/repos?per_page=100&page=1", repo_page(15, false))
        .route("/user/orgs", json!([]));
    for i in 0..15 {
        api = api
            .route(
                &format!("/repos/octocat/repo-{}/actions/variables", i),
                json!({ "variables": [] }),
            )
            .route(
                &format!("/repos/octocat/repo-{}/actions/secrets", i),
                json!({ "secrets": [] }),
            )
            .route(
                &format!("/repos/octocat/repo-{}/environments", i),
                json!({ "environments": [] }),
            );
    }
    let analyzer = Analyzer::new(&api);

    analyzer.analyze(&token(), no_progress).await;

    assert_eq!(api.calls_matching("/actions/variables"), 10);
}

#[tokio::test(start_paused = true)]
async fn test_quick_check_batches_of_five_with_one_delay() {
    let api = FakeApi::new().route("/user", user_json());
    let tokens: Vec<String> = (0..7)
        .map(|i| format!("ghp_{}{}", i, "a".repeat(35)))
        .collect();

    let start = tokio::time::Instant::now();
    let mut results = Vec::new();
    quick_check(&api, &tokens, |check| results.push(check)).await;

    // 7 tokens, cap 5: two batches, so exactly one inter-batch delay
    assert_eq!(results.len(), 7);
    assert_eq!(start.elapsed(), BATCH_PACING);
    assert!(results.iter().all(|r| r.valid));
    assert_eq!(api.calls_matching("/user"), 7);
}

#[tokio::test(start_paused = true)]
async fn test_quick_check_single_batch_has_no_delay() {
    let api = FakeApi::new().route("/user", user_json());
    let tokens: Vec<String> = (0..5)
        .map(|i| format!("ghp_{}{}", i, "b".repeat(35)))
        .collect();

    let start = tokio::time::Instant::now();
    quick_check(&api, &tokens, |_| {}).await;

    assert_eq!(start.elapsed(), Duration::from_millis(0));
}

#[tokio::test]
async fn test_quick_check_reports_invalid_tokens() {
    let api = FakeApi::new().fail("/user", 401);
    let tokens = vec![token()];

    let mut results = Vec::new();
    quick_check(&api, &tokens, |check| results.push(check)).await;

    assert_eq!(results.len(), 1);
    assert!(!results[0].valid);
    assert!(results[0].login.is_none());
    assert_eq!(
        results[0].error.as_deref(),
        Some("Invalid token or insufficient permissions")
    );
}

#[tokio::test(start_paused = true)]
async fn test_scan_paces_between_tokens() {
    let api = FakeApi::new()
        .with_scopes("")
        .route("/user", user_json())
        .route("/user/repos?per_page=100&page=1", json!([]))
        .route("/user/orgs", json!([]));
    let tokens = vec![
        format!("ghp_{}", "x".repeat(36)),
        format!("ghp_{}", "y".repeat(36)),
    ];

    let start = tokio::time::Instant::now();
    let reports = scan_tokens(&api, &tokens, |_| {}).await;

    assert_eq!(reports.len(), 2);
    // One pause between two tokens, none after the last
    assert_eq!(start.elapsed(), SCAN_PACING);
}

#[tokio::test]
async fn test_progress_steps_cover_full_range() {
    let api = FakeApi::new()
        .with_scopes("")
        .route("/user", user_json())
        .route("/user/repos?per_page=100&page=1", json!([]))
        .route("/user/orgs", json!([]));
    let analyzer = Analyzer::new(&api);

    let mut steps = Vec::new();
    analyzer
        .analyze(&token(), |event| {
            assert_eq!(event.total_steps, TOTAL_STEPS);
            steps.push(event.step);
        })
        .await;

    assert_eq!(steps.first(), Some(&0));
    assert_eq!(steps.last(), Some(&9));
    for window in steps.windows(2) {
        assert!(window[1] >= window[0], "steps must be monotonic: {:?}", steps);
    }
}
