//! Progress events for full token analysis
//!
//! Emitted before (and during) each enumeration phase so callers can render
//! a live status line. Carries only the redacted token preview.

use serde::Serialize;

/// Number of phases in a full analysis (steps 0 through 9).
pub const TOTAL_STEPS: u32 = 9;

/// One progress update.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    pub step: u32,
    pub total_steps: u32,
    pub message: String,
    pub token_preview: String,
}

impl ProgressEvent {
    pub fn new(step: u32, message: impl Into<String>, token_preview: &str) -> Self {
        Self {
            step,
            total_steps: TOTAL_STEPS,
            message: message.into(),
            token_preview: token_preview.to_string(),
        }
    }
}
