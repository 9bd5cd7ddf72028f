//! Type-safe git command builder for consistent command execution
//!
//! Every git invocation in depsync goes through [`GitCommand`], which builds
//! an explicit argument vector (never a shell string, so there is nothing to
//! quote or inject), runs the system git binary, and maps non-zero exit
//! statuses onto the typed errors in [`crate::core::DepsyncError`]. The
//! convenience constructors at the bottom are the complete set of git
//! operations the synchronizer is allowed to perform, which also makes the
//! exact arguments assertable in tests.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::core::DepsyncError;
use crate::utils::platform::get_git_command;

/// Builder for constructing and executing git commands.
///
/// Commands run to completion before returning; there is no timeout. A hung
/// git invocation hangs the whole bootstrap, which is accepted: the
/// alternative would be killing a clone that is merely slow.
///
/// # Examples
///
/// ```rust,no_run
/// use depsync_cli::git::command_builder::GitCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let head = GitCommand::current_commit()
///     .current_dir("/path/to/repo")
///     .execute_stdout()
///     .await?;
/// println!("HEAD is {head}");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct GitCommand {
    /// Arguments to pass to git (e.g. ["clone", "--recursive", url, path])
    args: Vec<String>,

    /// Working directory, passed via `git -C` so execution is independent
    /// of the process's own current directory
    current_dir: Option<std::path::PathBuf>,

    /// Context string included in log lines (typically the dependency name)
    context: Option<String>,

    /// For clone commands, the URL is kept for error reporting
    clone_url: Option<String>,
}

impl GitCommand {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory for the invocation.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a context label for log lines (e.g. the dependency name).
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Run the command and return its captured output.
    ///
    /// # Errors
    ///
    /// - [`DepsyncError::GitCloneFailed`] for failed `clone` invocations
    /// - [`DepsyncError::GitCommandError`] for any other non-zero status,
    ///   carrying the operation name and stderr
    pub async fn execute(self) -> Result<GitCommandOutput> {
        let git_command = get_git_command();
        let mut cmd = Command::new(git_command);

        let mut full_args = Vec::new();
        if let Some(ref dir) = self.current_dir {
            full_args.push("-C".to_string());
            full_args.push(dir.display().to_string());
        }
        full_args.extend(self.args.clone());

        cmd.args(&full_args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        if let Some(ref ctx) = self.context {
            tracing::debug!(
                target: "git",
                "({}) Executing command: {} {}",
                ctx,
                git_command,
                full_args.join(" ")
            );
        } else {
            tracing::debug!(
                target: "git",
                "Executing command: {} {}",
                git_command,
                full_args.join(" ")
            );
        }

        let output = cmd
            .output()
            .await
            .context(format!("Failed to execute git {}", full_args.join(" ")))?;

        // Skip -C and its path when identifying the operation
        let args_start =
            if full_args.first().map(String::as_str) == Some("-C") && full_args.len() > 2 {
                2
            } else {
                0
            };
        let effective_args = &full_args[args_start..];

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::debug!(
                target: "git",
                "Command failed with exit code {:?}: {}",
                output.status.code(),
                stderr.trim()
            );

            let error = if effective_args.first().is_some_and(|arg| arg == "clone") {
                DepsyncError::GitCloneFailed {
                    url: self.clone_url.unwrap_or_else(|| "unknown".to_string()),
                    reason: stderr,
                }
            } else {
                DepsyncError::GitCommandError {
                    operation: effective_args
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    stderr,
                }
            };
            return Err(error.into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !stdout.is_empty() {
            if let Some(ref ctx) = self.context {
                tracing::debug!(target: "git", "({}) {}", ctx, stdout.trim());
            } else {
                tracing::debug!(target: "git", "{}", stdout.trim());
            }
        }

        Ok(GitCommandOutput { stdout, stderr })
    }

    /// Run the command and return only stdout, trimmed.
    pub async fn execute_stdout(self) -> Result<String> {
        let output = self.execute().await?;
        Ok(output.stdout.trim().to_string())
    }

    /// Run the command, discarding output, checking only for success.
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

/// Captured output from a git command.
#[derive(Debug)]
pub struct GitCommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

// Convenience builders for the operations the synchronizer performs

impl GitCommand {
    /// `git clone --recursive <url> <target>` - full clone including any
    /// nested sub-repositories the source declares.
    pub fn clone_recursive(url: &str, target: impl AsRef<Path>) -> Self {
        let mut cmd = Self::new()
            .args(["clone", "--recursive", url])
            .arg(target.as_ref().display().to_string());
        cmd.clone_url = Some(url.to_string());
        cmd
    }

    /// `git fetch --all --tags --force` - make every remote revision
    /// resolvable locally before the reset.
    pub fn fetch() -> Self {
        Self::new().args(["fetch", "--all", "--tags", "--force"])
    }

    /// `git rev-parse --verify <rev>^{commit}` - resolve a revision to a
    /// commit id, failing if it does not exist.
    pub fn rev_parse_verify(rev: &str) -> Self {
        Self::new()
            .args(["rev-parse", "--verify"])
            .arg(format!("{rev}^{{commit}}"))
    }

    /// `git rev-parse HEAD` - the currently checked-out commit.
    pub fn current_commit() -> Self {
        Self::new().args(["rev-parse", "HEAD"])
    }

    /// `git reset --hard <rev>` - force the working copy to exactly match
    /// a revision, discarding local commits and edits.
    pub fn reset_hard_to(rev: &str) -> Self {
        Self::new().args(["reset", "--hard", rev])
    }

    /// `git clean -ffdx` - remove untracked and ignored files. The doubled
    /// force flag removes untracked nested repositories too.
    pub fn clean_force() -> Self {
        Self::new().args(["clean", "-ffdx"])
    }

    /// `git submodule foreach --recursive git clean -ffdx` - extend the
    /// clean into every checked-out sub-repository.
    pub fn submodule_clean() -> Self {
        Self::new().args([
            "submodule",
            "foreach",
            "--recursive",
            "git",
            "clean",
            "-ffdx",
        ])
    }
}
