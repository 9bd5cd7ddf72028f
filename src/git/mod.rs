//! Git operations wrapper for depsync
//!
//! This module provides an async wrapper around the system `git` command.
//! Like Cargo with `git-fetch-with-cli`, depsync uses the installed git
//! binary rather than an embedded git library: the system git already knows
//! about the user's SSH agent, credential helpers, and proxy configuration,
//! and a bootstrap tool should inherit all of that rather than reimplement
//! it.
//!
//! [`GitRepo`] is a thin handle over a repository path. It holds no cached
//! repository state - every query goes to git, so the handle stays
//! consistent with whatever external operations (or interrupted prior runs)
//! did to the working copy. The synchronizer composes these operations into
//! the convergence procedure; this module knows nothing about manifests or
//! dependencies.
//!
//! All subprocess invocations are built by
//! [`command_builder::GitCommand`], which passes explicit argument vectors
//! and maps non-zero exit statuses to typed errors.

pub mod command_builder;

use crate::core::DepsyncError;
use crate::git::command_builder::GitCommand;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Handle to a local git repository.
///
/// The struct holds only the repository path plus an optional label used to
/// tag log lines (typically the dependency name). Construction does not
/// verify that the path is a repository; use [`GitRepo::is_git_repo`] first.
#[derive(Debug)]
pub struct GitRepo {
    /// Root directory of the working copy (the directory containing `.git`)
    path: PathBuf,
    /// Label included in git log lines, if any
    label: Option<String>,
}

impl GitRepo {
    /// Create a handle for a repository at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            label: None,
        }
    }

    /// Attach a label (typically the dependency name) to log lines emitted
    /// by this handle's operations.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The working copy path this handle refers to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the path contains git metadata at its root.
    ///
    /// Presence of `.git` - not mere directory existence - is the test the
    /// synchronizer uses to distinguish a valid checkout from a stale
    /// directory left by an interrupted run. `.git` may be a directory or,
    /// for submodule checkouts, a file.
    #[must_use]
    pub fn is_git_repo(&self) -> bool {
        self.path.join(".git").exists()
    }

    /// Clone `url` into `target`, including any nested sub-repositories it
    /// declares.
    ///
    /// This is the only slow, network-dependent operation in the crate. It
    /// is not retried internally; a failed clone fails the run and the
    /// operator re-runs the bootstrap.
    ///
    /// # Errors
    ///
    /// Returns [`DepsyncError::GitCloneFailed`] with the URL and git's
    /// stderr if the clone fails for any reason (network, invalid URL,
    /// authentication).
    pub async fn clone_recursive(url: &str, target: impl AsRef<Path>) -> Result<Self> {
        let target_path = target.as_ref();
        GitCommand::clone_recursive(url, target_path).execute().await?;
        Ok(Self::new(target_path))
    }

    /// Fetch all remotes and tags so remote revisions are resolvable
    /// locally.
    pub async fn fetch(&self) -> Result<()> {
        self.command(GitCommand::fetch()).execute_success().await
    }

    /// Resolve a revision to a commit id, or `None` if it does not exist.
    ///
    /// Tries `origin/rev` before `rev` itself, so a branch pin means the
    /// remote's tip rather than whatever a stale local branch of the same
    /// name points at. Tags and commit hashes fall through to the second
    /// candidate.
    pub async fn try_resolve(&self, rev: &str) -> Option<String> {
        for candidate in [format!("origin/{rev}"), rev.to_string()] {
            let result = self
                .command(GitCommand::rev_parse_verify(&candidate))
                .execute_stdout()
                .await;
            if let Ok(commit) = result {
                return Some(commit);
            }
        }
        None
    }

    /// Resolve the remote's default-branch tip to a commit id.
    ///
    /// `origin/HEAD` is recorded by clone and follows the remote's default
    /// branch across fetches. The `HEAD` fallback covers repositories whose
    /// remote HEAD was never set.
    pub async fn resolve_default_branch_tip(&self) -> Option<String> {
        for candidate in ["origin/HEAD", "HEAD"] {
            let result = self
                .command(GitCommand::rev_parse_verify(candidate))
                .execute_stdout()
                .await;
            if let Ok(commit) = result {
                return Some(commit);
            }
        }
        None
    }

    /// The commit id the working copy is currently checked out at.
    pub async fn current_commit(&self) -> Result<String> {
        self.command(GitCommand::current_commit()).execute_stdout().await
    }

    /// Force the working copy to exactly match `revision`, discarding local
    /// commits, staged changes, and working-tree edits.
    ///
    /// # Errors
    ///
    /// Returns [`DepsyncError::GitResetFailed`]. Given a valid checkout and
    /// a revision that resolves, this should not fail; when it does, the
    /// stderr is surfaced verbatim.
    pub async fn reset_hard(&self, revision: &str) -> Result<()> {
        self.command(GitCommand::reset_hard_to(revision))
            .execute_success()
            .await
            .map_err(|e| {
                DepsyncError::GitResetFailed {
                    revision: revision.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Remove all untracked and ignored files from the working copy,
    /// recursively, including inside checked-out sub-repositories.
    ///
    /// Build artifacts and leftovers from a previously checked-out revision
    /// must not leak into the synchronized state; the larger build assumes
    /// a pristine tree.
    ///
    /// # Errors
    ///
    /// Returns [`DepsyncError::GitCleanFailed`] carrying the working copy
    /// path and git's stderr.
    pub async fn clean_untracked(&self) -> Result<()> {
        let clean_error = |e: anyhow::Error| {
            anyhow::Error::from(DepsyncError::GitCleanFailed {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })
        };

        self.command(GitCommand::clean_force())
            .execute_success()
            .await
            .map_err(clean_error)?;

        self.command(GitCommand::submodule_clean())
            .execute_success()
            .await
            .map_err(clean_error)?;

        Ok(())
    }

    fn command(&self, cmd: GitCommand) -> GitCommand {
        let cmd = cmd.current_dir(&self.path);
        match &self.label {
            Some(label) => cmd.with_context(label.clone()),
            None => cmd,
        }
    }
}

/// Whether the system git binary is runnable.
#[must_use]
pub fn is_git_installed() -> bool {
    crate::utils::platform::command_exists(crate::utils::platform::get_git_command())
}

/// Fail with [`DepsyncError::GitNotFound`] unless git is available.
///
/// Called once, before any repository work, so the operator gets one clear
/// error instead of a per-dependency subprocess failure.
pub fn ensure_git_available() -> Result<()> {
    if is_git_installed() {
        Ok(())
    } else {
        Err(DepsyncError::GitNotFound.into())
    }
}
