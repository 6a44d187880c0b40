//! Rate-limit-aware HTTP client for the GitHub REST API

use super::{ApiError, ApiResponse, QuotaSnapshot, Transport};
use crate::config::ApiConfig;
use crate::scanner;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::sync::Mutex;

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Client for the GitHub REST API.
///
/// Constructed once per session and passed by reference into everything that
/// talks to the API. Tracks the advisory rate-limit state from response
/// headers. Never retries; pacing decisions belong to the caller.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    quota: Mutex<QuotaSnapshot>,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            quota: Mutex::new(QuotaSnapshot::default()),
        })
    }

    /// Request headers for a call; fine-grained tokens use a different
    /// Accept value and an explicit API version header.
    fn headers(token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        if let Some(token) = token {
            if let Ok(value) = HeaderValue::from_str(&format!("token {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
            if scanner::is_fine_grained(token) {
                headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
                headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
            }
        }

        headers
    }

    /// Record the rate-limit headers of a response. Absent or unparsable
    /// headers count as an exhausted window with unknown reset.
    fn record_quota(&self, headers: &reqwest::header::HeaderMap) {
        let remaining = headers
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let reset = headers
            .get("X-RateLimit-Reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let mut quota = self.quota.lock().unwrap();
        *quota = QuotaSnapshot { remaining, reset };
    }
}

impl Transport for ApiClient {
    async fn get(&self, path: &str, token: Option<&str>) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .headers(Self::headers(token))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        self.record_quota(response.headers());

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        let oauth_scopes = response
            .headers()
            .get("X-OAuth-Scopes")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let body = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
            oauth_scopes,
        })
    }

    fn quota(&self) -> QuotaSnapshot {
        *self.quota.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_token() -> String {
        format!("ghp_{}", "a".repeat(36))
    }

    fn fine_grained_token() -> String {
        format!("github_pat_{}", "b".repeat(82))
    }

    #[test]
    fn test_classic_header_dialect() {
        let token = classic_token();
        let headers = ApiClient::headers(Some(&token));

        assert_eq!(
            headers.get(ACCEPT).unwrap(),
            "application/vnd.github.v3+json"
        );
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap(),
            format!("token {}", token).as_str()
        );
        assert!(headers.get(API_VERSION_HEADER).is_none());
    }

    #[test]
    fn test_fine_grained_header_dialect() {
        let token = fine_grained_token();
        let headers = ApiClient::headers(Some(&token));

        assert_eq!(headers.get(ACCEPT).unwrap(), "application/vnd.github+json");
        assert_eq!(headers.get(API_VERSION_HEADER).unwrap(), API_VERSION);
    }

    #[test]
    fn test_anonymous_headers_have_no_auth() {
        let headers = ApiClient::headers(None);
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(API_VERSION_HEADER).is_none());
    }
}
