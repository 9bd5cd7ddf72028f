//! The `sync` command: the bootstrap run.
//!
//! Orchestrates one pass over the manifest: verify git is available, probe
//! the optional Vulkan SDK (advisory only), load the manifest, then invoke
//! the synchronizer once per entry in manifest order. The first failure
//! halts the run - partial dependency states are unsafe to build against,
//! so there is no continuation past a broken entry and no aggregation of
//! failures.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use crate::git::ensure_git_available;
use crate::manifest::Manifest;
use crate::sync::Synchronizer;
use crate::utils::toolchain;

/// Synchronize every dependency in the manifest.
#[derive(Parser, Debug)]
pub struct SyncCommand {
    /// Path to the dependency manifest
    #[arg(
        long,
        env = "DEPSYNC_MANIFEST",
        default_value = "Scripts/dependencies.json"
    )]
    manifest_path: PathBuf,

    /// Directory under which working copies are materialized
    #[arg(long, env = "DEPSYNC_ROOT", default_value = "External/Source")]
    root: PathBuf,
}

impl SyncCommand {
    /// Run the bootstrap.
    pub async fn execute(self) -> Result<()> {
        ensure_git_available()?;

        tracing::info!("Starting bootstrap");
        toolchain::probe_vulkan_sdk();

        let manifest = Manifest::load(&self.manifest_path)?;
        tracing::info!(
            "Loaded {} dependencies from {}",
            manifest.dependencies.len(),
            self.manifest_path.display()
        );

        let synchronizer = Synchronizer::new(&self.root);
        for dep in &manifest.dependencies {
            tracing::info!("Synchronizing '{}' from {}", dep.name, dep.url);
            let outcome = synchronizer
                .sync(dep)
                .await
                .with_context(|| format!("failed to synchronize dependency '{}'", dep.name))?;
            tracing::info!("'{}' is at {}", dep.name, outcome.resolved_commit);
        }

        println!(
            "{} {} dependencies synchronized",
            "Done.".green().bold(),
            manifest.dependencies.len()
        );
        Ok(())
    }
}
