//! Batch processing of multiple token candidates
//!
//! Quick check validates many tokens with bounded concurrency; scan runs
//! full analyses sequentially. Both pace their remote calls with fixed
//! delays so a large paste does not burn through shared quota.

use super::{kind_label, Analyzer, AnalysisReport, ProgressEvent};
use crate::github::Transport;
use crate::scanner;
use futures::future::join_all;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;

/// In-flight validations per quick-check batch.
pub const QUICK_CHECK_CONCURRENCY: usize = 5;
/// Pause between quick-check batches.
pub const BATCH_PACING: Duration = Duration::from_millis(100);
/// Pause between successive full analyses in a scan.
pub const SCAN_PACING: Duration = Duration::from_secs(1);

/// Validation-only result for one token.
#[derive(Debug, Clone, Serialize)]
pub struct QuickCheck {
    pub token_preview: String,
    pub token_kind: String,
    pub valid: bool,
    pub login: Option<String>,
    pub error: Option<String>,
}

/// Validate tokens in fixed-size concurrent batches.
///
/// Each batch's validations run concurrently and are joined before the next
/// batch starts; results are emitted per token as soon as its batch
/// completes. The pacing delay runs only when more tokens remain.
pub async fn quick_check<T, F>(api: &T, tokens: &[String], mut on_result: F)
where
    T: Transport,
    F: FnMut(QuickCheck),
{
    let analyzer = Analyzer::new(api);
    let total = tokens.len();
    let mut processed = 0;

    for batch in tokens.chunks(QUICK_CHECK_CONCURRENCY) {
        let checks = join_all(batch.iter().map(|token| check_one(&analyzer, token))).await;
        for check in checks {
            on_result(check);
        }

        processed += batch.len();
        if processed < total {
            sleep(BATCH_PACING).await;
        }
    }
}

async fn check_one<T: Transport>(analyzer: &Analyzer<'_, T>, token: &str) -> QuickCheck {
    match analyzer.validate(token).await {
        Ok((user, _)) => QuickCheck {
            token_preview: scanner::redact(token),
            token_kind: kind_label(token),
            valid: true,
            login: Some(user.login),
            error: None,
        },
        Err(e) => QuickCheck {
            token_preview: scanner::redact(token),
            token_kind: kind_label(token),
            valid: false,
            login: None,
            error: Some(e.to_string()),
        },
    }
}

/// Run a full analysis for every token, one at a time, with pacing between
/// successive tokens.
pub async fn scan_tokens<T, F>(api: &T, tokens: &[String], mut progress: F) -> Vec<AnalysisReport>
where
    T: Transport,
    F: FnMut(ProgressEvent),
{
    let analyzer = Analyzer::new(api);
    let mut reports = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        let report = analyzer.analyze(token, &mut progress).await;
        reports.push(report);

        if i + 1 < tokens.len() {
            sleep(SCAN_PACING).await;
        }
    }

    reports
}
