//! Full analysis of a single token

use super::{is_json, load_config};
use crate::analyzer::Analyzer;
use crate::cli::{render, Output};
use crate::github::ApiClient;
use crate::scanner;
use anyhow::Result;

/// Execute the analyze command
pub async fn execute(
    token: &str,
    format: &str,
    config_path: Option<&str>,
    output: &Output,
) -> Result<()> {
    let token = token.trim();
    if scanner::classify(token).is_none() {
        output.warning("Input does not match any known GitHub token shape - analyzing anyway");
    }

    let config = load_config(config_path)?;
    let client = ApiClient::new(&config.api)?;
    let analyzer = Analyzer::new(&client);

    let json = is_json(format);
    let report = analyzer
        .analyze(token, |event| {
            if !json {
                output.progress_indicator(
                    event.step as usize,
                    event.total_steps as usize,
                    &event.message,
                );
            }
        })
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render::report(output, &report);
    }

    Ok(())
}
