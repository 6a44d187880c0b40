//! Scope catalog inspection

use super::is_json;
use crate::cli::{render, Output};
use crate::scopes;
use anyhow::Result;

/// Execute the scopes command
pub fn execute(scope: Option<&str>, format: &str, output: &Output) -> Result<()> {
    match scope {
        Some(name) => {
            if is_json(format) {
                match scopes::lookup(name) {
                    Some(info) => println!("{}", serde_json::to_string_pretty(info)?),
                    None => println!("null"),
                }
            } else {
                render::scope_detail(output, name);
            }
        }
        None => {
            if is_json(format) {
                println!("{}", serde_json::to_string_pretty(&*scopes::catalog())?);
            } else {
                render::scope_catalog(output);
            }
        }
    }
    Ok(())
}
