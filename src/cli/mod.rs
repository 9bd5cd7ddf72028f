//! Command-line interface for depsync.
//!
//! Two commands, each in its own module:
//! - `sync` - the bootstrap run: converge every manifest dependency to a
//!   clean checkout at its pinned revision
//! - `validate` - load and check the manifest without touching the network
//!   or any working copy
//!
//! Global flags control verbosity: `--verbose` maps to debug-level logging
//! (including every git invocation), `--quiet` suppresses everything except
//! errors. `RUST_LOG` is honored when neither flag is given.
//!
//! # Examples
//!
//! ```bash
//! depsync sync
//! depsync sync --manifest-path Scripts/dependencies.json --root External/Source
//! depsync --verbose sync
//! depsync validate
//! ```

mod sync;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Main CLI structure for depsync.
///
/// Uses the clap derive API; options marked `global = true` are available
/// to every subcommand.
#[derive(Parser)]
#[command(
    name = "depsync",
    about = "Dependency bootstrapper - converges external source checkouts to pinned revisions",
    version,
    long_about = "depsync reads a manifest of external source repositories and makes sure \
                  each one is present on disk, checked out at its pinned revision, and free \
                  of local modifications, so a larger build can consume a reproducible tree."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output, including every git invocation
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Synchronize every dependency in the manifest
    Sync(sync::SyncCommand),

    /// Check the manifest without synchronizing anything
    Validate(validate::ValidateCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Sync(cmd) => cmd.execute().await,
            Commands::Validate(cmd) => cmd.execute().await,
        }
    }

    /// Initialize the tracing subscriber once, honoring the verbosity
    /// flags and, in their absence, `RUST_LOG`.
    fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new("info")
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .try_init();
    }
}
