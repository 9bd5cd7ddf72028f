//! The idempotent repository synchronization procedure.
//!
//! [`Synchronizer::sync`] takes one [`DependencySpec`] and converges the
//! corresponding working copy to a clean checkout of the pinned revision
//! (or the remote's default-branch tip if unpinned), whatever state the
//! directory starts in: absent, present-but-not-a-checkout, or a valid
//! checkout that is stale, dirty, or sitting on the wrong revision.
//!
//! # Procedure
//!
//! 1. Compute the target path: `<root>/<name>`.
//! 2. Test for git metadata at the path root. Directory existence alone is
//!    not enough - a half-written directory from an interrupted run must
//!    not be mistaken for a checkout.
//! 3. No valid checkout: remove whatever occupies the path, then clone the
//!    source recursively. Removing before cloning is what makes the
//!    procedure idempotent across interrupted prior executions.
//! 4. Valid checkout: fetch, so the pin (or the moved default branch) is
//!    resolvable against the remote's current state.
//! 5. Resolve the target revision to a commit id. An unresolvable revision
//!    aborts before anything is modified.
//! 6. `reset --hard` to the resolved commit, discarding local commits and
//!    edits.
//! 7. Clean untracked and ignored files, recursively, including nested
//!    sub-repositories.
//!
//! Clone, reset, and clean stay three separate operations because each
//! addresses a different failure mode - absence, wrong revision, and
//! contamination - and separating them lets a re-run recover from any
//! single-step interruption without repeating the expensive clone.
//!
//! The synchronizer holds no state beyond the root path. Each dependency is
//! processed independently; everything else lives in the filesystem and the
//! repository's own metadata.

use crate::core::DepsyncError;
use crate::git::GitRepo;
use crate::manifest::DependencySpec;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Result of a successful synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// The commit id the working copy was converged to.
    pub resolved_commit: String,
}

/// Converges working copies under a fixed root directory.
#[derive(Debug)]
pub struct Synchronizer {
    /// Directory under which every dependency's working copy lives.
    root: PathBuf,
}

impl Synchronizer {
    /// Create a synchronizer materializing working copies under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The deterministic working-copy path for a dependency name.
    #[must_use]
    pub fn target_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Converge the working copy for `spec` to a clean checkout of its
    /// target revision.
    ///
    /// Safe to re-run at any time: a second run with no intervening
    /// external change succeeds and leaves the working copy unchanged.
    ///
    /// # Errors
    ///
    /// Fails with a distinct [`DepsyncError`] variant identifying the step:
    /// [`GitCloneFailed`](DepsyncError::GitCloneFailed),
    /// [`RevisionNotFound`](DepsyncError::RevisionNotFound),
    /// [`GitResetFailed`](DepsyncError::GitResetFailed),
    /// [`GitCleanFailed`](DepsyncError::GitCleanFailed), or an io error
    /// from removing a stale directory. Any failure is non-retriable
    /// within this call.
    pub async fn sync(&self, spec: &DependencySpec) -> Result<SyncOutcome> {
        let target = self.target_path(&spec.name);
        let repo = GitRepo::new(&target).with_label(&spec.name);

        if repo.is_git_repo() {
            tracing::debug!("{}: existing checkout at {}", spec.name, target.display());
            repo.fetch()
                .await
                .with_context(|| format!("fetching '{}'", spec.name))?;
        } else {
            if target.exists() {
                // Stale or partial directory from an interrupted run
                tracing::warn!(
                    "{}: removing {} before cloning",
                    spec.name,
                    target.display()
                );
                std::fs::remove_dir_all(&target)
                    .map_err(DepsyncError::IoError)
                    .with_context(|| {
                        format!(
                            "removing stale directory {} for '{}'",
                            target.display(),
                            spec.name
                        )
                    })?;
            }
            tracing::info!("{}: cloning {} into {}", spec.name, spec.url, target.display());
            GitRepo::clone_recursive(&spec.url, &target).await?;
        }

        let resolved = self.resolve_target_revision(&repo, spec).await?;
        tracing::debug!("{}: target revision resolves to {}", spec.name, resolved);

        repo.reset_hard(&resolved)
            .await
            .with_context(|| format!("resetting '{}'", spec.name))?;
        repo.clean_untracked()
            .await
            .with_context(|| format!("cleaning '{}'", spec.name))?;

        Ok(SyncOutcome {
            resolved_commit: resolved,
        })
    }

    /// Resolve the revision `spec` asks for to a concrete commit id.
    ///
    /// Pinned dependencies resolve the pin (with an `origin/` fallback for
    /// branch names); unpinned dependencies resolve the remote's
    /// default-branch tip so "latest" is never ambiguous.
    async fn resolve_target_revision(
        &self,
        repo: &GitRepo,
        spec: &DependencySpec,
    ) -> Result<String> {
        let resolved = match spec.revision.as_deref() {
            Some(rev) => repo.try_resolve(rev).await,
            None => repo.resolve_default_branch_tip().await,
        };

        resolved.ok_or_else(|| {
            DepsyncError::RevisionNotFound {
                name: spec.name.clone(),
                revision: spec
                    .revision
                    .clone()
                    .unwrap_or_else(|| "origin/HEAD".to_string()),
            }
            .into()
        })
    }
}
