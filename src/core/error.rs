//! Error handling for depsync
//!
//! The error system is built around two types:
//! - [`DepsyncError`] - enumerated error types for every failure case, so
//!   callers can distinguish a failed clone from a failed reset from a failed
//!   clean instead of reading a single generic non-zero signal
//! - [`ErrorContext`] - wrapper that adds a user-friendly message and an
//!   actionable suggestion for CLI display
//!
//! Every error is fatal to the overall run. Errors propagate upward with
//! `?` and are rendered once, at the CLI boundary, by [`user_friendly_error`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use depsync_cli::core::{DepsyncError, user_friendly_error};
//!
//! fn clone_something() -> Result<(), DepsyncError> {
//!     Err(DepsyncError::GitNotFound)
//! }
//!
//! if let Err(e) = clone_something() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for depsync operations.
///
/// Each variant represents a specific failure mode with enough context to
/// identify the offending dependency, the failing step, and the underlying
/// tool output. The synchronizer maps its steps onto variants one-to-one:
/// clone failures, unresolvable revisions, reset failures, and clean
/// failures are all distinct.
#[derive(Error, Debug)]
pub enum DepsyncError {
    /// Git executable not found in PATH.
    ///
    /// depsync shells out to the system `git` binary for every repository
    /// operation, so nothing can proceed without it.
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// A git invocation returned a non-zero status.
    ///
    /// Catch-all for invocations that have no more specific variant
    /// (e.g. `fetch`, `rev-parse`). Carries the operation name and the
    /// command's stderr.
    #[error("Git operation failed: {operation}: {stderr}")]
    GitCommandError {
        /// The git operation that failed (e.g. "fetch", "rev-parse")
        operation: String,
        /// The error output from the git command
        stderr: String,
    },

    /// Recursive clone of a dependency failed.
    ///
    /// Covers network errors, invalid URLs, and authentication failures.
    /// Cloning is the only network-dependent step; it is not retried
    /// internally - re-run the bootstrap instead.
    #[error("Failed to clone repository {url}: {reason}")]
    GitCloneFailed {
        /// The repository URL that failed to clone
        url: String,
        /// The reason for the clone failure
        reason: String,
    },

    /// The pinned revision does not exist in the repository.
    #[error("Revision '{revision}' not found in dependency '{name}'")]
    RevisionNotFound {
        /// The dependency whose pin could not be resolved
        name: String,
        /// The revision that failed to resolve
        revision: String,
    },

    /// `git reset --hard` to the resolved revision failed.
    #[error("Failed to reset working copy to '{revision}': {reason}")]
    GitResetFailed {
        /// The resolved revision the reset targeted
        revision: String,
        /// The reason for the reset failure
        reason: String,
    },

    /// Removal of untracked and ignored files failed.
    #[error("Failed to clean working copy at {path}: {reason}")]
    GitCleanFailed {
        /// The working copy that could not be cleaned
        path: String,
        /// The reason for the clean failure
        reason: String,
    },

    /// Manifest file missing or unreadable.
    #[error("Manifest file not found: {path}")]
    ManifestNotFound {
        /// The path that was searched for the manifest
        path: String,
    },

    /// Manifest exists but its content is malformed.
    ///
    /// Raised for invalid JSON and for structural violations: empty or
    /// duplicate dependency names, empty URLs.
    #[error("Invalid manifest file syntax in {file}: {reason}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// A filesystem operation outside git failed.
    ///
    /// Most commonly the recursive removal of a stale, non-checkout
    /// directory before a fresh clone.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// User-facing wrapper around an error with an optional suggestion and
/// details, rendered in color at the CLI boundary.
///
/// # Examples
///
/// ```rust
/// use depsync_cli::core::{DepsyncError, ErrorContext};
///
/// let ctx = ErrorContext::new(DepsyncError::GitNotFound)
///     .with_suggestion("Install git from https://git-scm.com/");
/// let rendered = format!("{ctx}");
/// assert!(rendered.contains("not installed"));
/// ```
pub struct ErrorContext {
    /// The underlying error being presented
    pub error: anyhow::Error,
    /// Actionable suggestion shown to the operator, if any
    pub suggestion: Option<String>,
    /// Additional free-form details, if any
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach an actionable suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with color.
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error);

        // Chain of causes, innermost last
        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {}", "Caused by:".yellow(), cause);
        }

        if let Some(ref details) = self.details {
            eprintln!("\n{details}");
        }

        if let Some(ref suggestion) = self.suggestion {
            eprintln!("\n{} {}", "Suggestion:".cyan().bold(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(ref details) = self.details {
            write!(f, "\n{details}")?;
        }
        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorContext")
            .field("error", &self.error)
            .field("suggestion", &self.suggestion)
            .field("details", &self.details)
            .finish()
    }
}

/// Convert any error into an [`ErrorContext`] with a variant-specific
/// suggestion where one exists.
///
/// Called once, in `main`, on whatever error reaches the CLI boundary.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<DepsyncError>() {
        Some(DepsyncError::GitNotFound) => Some(
            "Install git from https://git-scm.com/ or via your package manager, \
             and make sure it is in PATH"
                .to_string(),
        ),
        Some(DepsyncError::GitCloneFailed { url, .. }) => Some(format!(
            "Check that '{url}' is reachable and that you have access to it, \
             then re-run the bootstrap"
        )),
        Some(DepsyncError::RevisionNotFound { name, revision }) => Some(format!(
            "Check the 'revision' field of '{name}' in the manifest - \
             '{revision}' does not exist in the cloned repository"
        )),
        Some(DepsyncError::ManifestNotFound { path }) => Some(format!(
            "Create a manifest at '{path}' or point at one with --manifest-path"
        )),
        Some(DepsyncError::ManifestParseError { .. }) => Some(
            "The manifest must be a JSON array of objects with 'name', 'url' \
             and optional 'revision' string fields"
                .to_string(),
        ),
        _ => None,
    };

    let mut ctx = ErrorContext::new(error);
    if let Some(s) = suggestion {
        ctx = ctx.with_suggestion(s);
    }
    ctx
}
