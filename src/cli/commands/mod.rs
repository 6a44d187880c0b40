//! Command implementations

pub mod analyze;
pub mod check;
pub mod scan;
pub mod scopes;
pub mod version;

use crate::config::TokenscopeConfig;
use anyhow::{bail, Context, Result};
use std::io::Read;

/// Load configuration, from an explicit path when the user gave one.
pub fn load_config(config_path: Option<&str>) -> Result<TokenscopeConfig> {
    match config_path {
        Some(path) => TokenscopeConfig::load_from(path),
        None => TokenscopeConfig::load(),
    }
}

/// Resolve the text to scan: inline argument, file, or stdin.
pub fn read_scan_input(text: Option<String>, file: Option<String>) -> Result<String> {
    let input = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };
    if input.trim().is_empty() {
        bail!("Input is empty - pass text, --file, or pipe via stdin");
    }
    Ok(input)
}

/// Whether `--format json` was requested.
pub fn is_json(format: &str) -> bool {
    format.eq_ignore_ascii_case("json")
}
