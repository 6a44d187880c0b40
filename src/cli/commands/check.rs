//! Quick check: validate detected tokens without enumeration

use super::{is_json, load_config, read_scan_input};
use crate::analyzer;
use crate::cli::{render, Output};
use crate::github::ApiClient;
use crate::scanner;
use anyhow::Result;

/// Execute the check command
pub async fn execute(
    text: Option<String>,
    file: Option<String>,
    format: &str,
    config_path: Option<&str>,
    output: &Output,
) -> Result<()> {
    let input = read_scan_input(text, file)?;
    let tokens = scanner::detect_tokens(&input);

    if tokens.is_empty() {
        output.warning("No GitHub tokens found in the provided text");
        return Ok(());
    }

    output.header("⚡ Quick Check");
    output.count("🔍", "Tokens detected", tokens.len());

    let config = load_config(config_path)?;
    let client = ApiClient::new(&config.api)?;

    let json = is_json(format);
    let mut results = Vec::new();
    analyzer::quick_check(&client, &tokens, |check| {
        if !json {
            render::quick_check_line(output, &check);
        }
        results.push(check);
    })
    .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let valid = results.iter().filter(|r| r.valid).count();
    output.blank_line();
    output.status_indicator(
        "Done",
        &format!("{} valid, {} invalid", valid, results.len() - valid),
        valid == 0,
    );
    if valid > 0 {
        output.info("Run `tokenscope analyze <token>` on a valid token for a full report");
    }

    Ok(())
}
