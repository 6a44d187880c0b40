//! Command-line interface for Tokenscope
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing and provides a clean, user-friendly
//! interface over the analysis engine.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod output;
mod render;

pub use output::Output;

/// Tokenscope - GitHub token risk analysis without destructive calls
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a full analysis of a single token
    Analyze {
        /// The token to analyze (only a redacted preview is ever shown)
        token: String,
    },
    /// Detect tokens in text and run a full analysis of each
    Scan {
        /// Text to scan for embedded tokens
        text: Option<String>,
        /// Read the text to scan from a file
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Detect tokens in text and validate each (no enumeration)
    Check {
        /// Text to scan for embedded tokens
        text: Option<String>,
        /// Read the text to scan from a file
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Show the scope risk catalog, or details for one scope
    Scopes {
        /// Scope name to describe (e.g. repo, delete_repo)
        scope: Option<String>,
    },
    /// Show version information
    Version,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Some(Commands::Analyze { token }) => {
                commands::analyze::execute(&token, &self.format, self.config.as_deref(), &output)
                    .await
            }
            Some(Commands::Scan { text, file }) => {
                commands::scan::execute(text, file, &self.format, self.config.as_deref(), &output)
                    .await
            }
            Some(Commands::Check { text, file }) => {
                commands::check::execute(text, file, &self.format, self.config.as_deref(), &output)
                    .await
            }
            Some(Commands::Scopes { scope }) => {
                commands::scopes::execute(scope.as_deref(), &self.format, &output)
            }
            Some(Commands::Version) => {
                commands::version::execute(&output);
                Ok(())
            }
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}
