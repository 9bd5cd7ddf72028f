//! The `validate` command: manifest checks without side effects.
//!
//! Loads the manifest and applies the same structural validation the sync
//! command would, then lists every entry with its pin. Nothing is cloned,
//! fetched, or removed - this is for catching manifest mistakes before a
//! long bootstrap, not for verifying checkouts.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use crate::manifest::Manifest;

/// Check the manifest without synchronizing anything.
#[derive(Parser, Debug)]
pub struct ValidateCommand {
    /// Path to the dependency manifest
    #[arg(
        long,
        env = "DEPSYNC_MANIFEST",
        default_value = "Scripts/dependencies.json"
    )]
    manifest_path: PathBuf,
}

impl ValidateCommand {
    /// Load and validate the manifest, listing its entries.
    pub async fn execute(self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest_path)?;

        for dep in &manifest.dependencies {
            match dep.revision.as_deref() {
                Some(rev) => println!("  {} {} @ {}", dep.name.bold(), dep.url, rev),
                None => println!("  {} {} (default branch)", dep.name.bold(), dep.url),
            }
        }

        println!(
            "{} {} valid, {} dependencies",
            "OK.".green().bold(),
            self.manifest_path.display(),
            manifest.dependencies.len()
        );
        Ok(())
    }
}
