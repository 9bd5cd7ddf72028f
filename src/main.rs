//! depsync CLI entry point
//!
//! This is the main executable for the depsync dependency bootstrapper.
//! It handles command-line argument parsing, error display, and command execution.
//!
//! The CLI supports two commands:
//! - `sync` - Converge every manifest dependency to a clean checkout at its pin
//! - `validate` - Check the manifest without touching the network or checkouts

use anyhow::Result;
use clap::Parser;
use depsync_cli::cli;
use depsync_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
