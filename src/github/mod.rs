//! GitHub API access
//!
//! This module owns every outbound call: header construction (including the
//! fine-grained token dialect), rate-limit bookkeeping, and the mapping of
//! HTTP statuses to typed failures. No mutating verb exists here - the
//! analyzer is read-only by construction.

mod client;
mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;

use serde_json::Value;

/// Snapshot of the remaining API quota, as reported by the last response.
///
/// Advisory telemetry only: concurrent calls race on it and last-writer-wins
/// is fine, since nothing gates admission on the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct QuotaSnapshot {
    /// Remaining calls in the current window
    pub remaining: u32,
    /// Epoch seconds when the window resets, if the API reported one
    pub reset: Option<u64>,
}

impl Default for QuotaSnapshot {
    fn default() -> Self {
        // Anonymous rate limit until the first authenticated response
        Self {
            remaining: 60,
            reset: None,
        }
    }
}

/// One successful API response: parsed JSON body plus the header fields the
/// analyzer cares about.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
    /// Raw `X-OAuth-Scopes` header, when present
    pub oauth_scopes: Option<String>,
}

/// Seam between the analyzer and the real HTTP client.
///
/// `ApiClient` implements this over reqwest; tests drive the analyzer with
/// an in-memory fake instead of a live API.
pub trait Transport: Send + Sync {
    /// GET a path (relative to the API base), optionally authenticated.
    fn get(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>> + Send;

    /// Latest quota snapshot.
    fn quota(&self) -> QuotaSnapshot;
}

/// Parse the comma-separated `X-OAuth-Scopes` header into scope names.
pub fn parse_scopes(header: Option<&str>) -> Vec<String> {
    match header {
        Some(raw) => raw
            .split(',')
            .map(|scope| scope.trim())
            .filter(|scope| !scope.is_empty())
            .map(|scope| scope.to_string())
            .collect(),
        None => Vec::new(),
    }
}
