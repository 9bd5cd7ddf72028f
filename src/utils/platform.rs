//! Platform-specific helpers.
//!
//! Cross-platform location of the git executable. Windows installations
//! expose `git.exe`; everything else resolves `git` through PATH.

/// The git command name for the current platform.
#[must_use]
pub const fn get_git_command() -> &'static str {
    if cfg!(windows) { "git.exe" } else { "git" }
}

/// Whether `cmd` resolves to an executable on PATH.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}
