//! Detect tokens in text and fully analyze each one

use super::{is_json, load_config, read_scan_input};
use crate::analyzer;
use crate::cli::{render, Output};
use crate::github::ApiClient;
use crate::scanner;
use anyhow::Result;

/// Execute the scan command
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

    output.count("🔍", "Tokens detected", tokens.len());

    let config = load_config(config_path)?;
    let client = ApiClient::new(&config.api)?;

    let json = is_json(format);
    let reports = analyzer::scan_tokens(&client, &tokens, |event| {
        if !json {
            output.progress_indicator(
                event.step as usize,
                event.total_steps as usize,
                &format!("[{}] {}", event.token_preview, event.message),
            );
        }
    })
    .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (i, report) in reports.iter().enumerate() {
            output.header(&format!("Token #{}", i + 1));
            render::report(output, report);
        }
    }

    Ok(())
}
