//! depsync - dependency-synchronization bootstrapper
//!
//! A small CLI that reads a declarative manifest of external source
//! repositories (name, URL, optional revision pin) and converges each one to
//! a known-clean checkout of a known revision before a larger build runs.
//! Working copies may be absent, stale, dirty, or half-created by an
//! interrupted prior run; `depsync sync` handles the full cross-product of
//! those states without manual cleanup.
//!
//! # Architecture Overview
//!
//! The crate is composed top-down by a single orchestrating pass:
//!
//! - The manifest loader ([`manifest`]) parses `dependencies.json`-style
//!   records into [`manifest::DependencySpec`] values.
//! - The repository synchronizer ([`sync`]) converges one working copy per
//!   spec: remove-if-stale, clone-if-absent, fetch, resolve the target
//!   revision, hard-reset to it, and clean untracked/ignored files.
//! - The orchestrator (the `sync` CLI command) runs the synchronizer once
//!   per manifest entry, in manifest order, halting the run on the first
//!   failure.
//!
//! Everything that touches a repository goes through the system `git` binary
//! (like Cargo with `git-fetch-with-cli`), invoked with explicit argument
//! vectors via [`git::command_builder::GitCommand`] - never a shell string.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (`sync`, `validate`)
//! - [`core`] - Error taxonomy and user-facing error context
//! - [`manifest`] - Manifest parsing and structural validation
//! - [`git`] - Git operations wrapper using the system git command
//! - [`sync`] - The idempotent repository synchronization procedure
//! - [`utils`] - Platform helpers and the advisory toolchain probe
//!
//! # Manifest Format (dependencies.json)
//!
//! ```json
//! [
//!   { "name": "glfw", "url": "https://github.com/glfw/glfw.git", "revision": "3.3.8" },
//!   { "name": "glm",  "url": "https://github.com/g-truc/glm.git" }
//! ]
//! ```
//!
//! An entry without a `revision` tracks the remote's default-branch tip.
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Converge every dependency (manifest and root at their defaults)
//! depsync sync
//!
//! # Explicit locations
//! depsync sync --manifest-path Scripts/dependencies.json --root External/Source
//!
//! # Check the manifest without syncing anything
//! depsync validate
//! ```
//!
//! # Failure Policy
//!
//! Every error is fatal to the whole run: there is no retry, no partial
//! success, and no aggregation of failures. The first dependency that fails
//! to synchronize halts the process with a non-zero status and an error
//! naming the dependency and the failing step. Partial dependency states are
//! unsafe to build against, and silent retries would mask persistent network
//! or configuration problems.

// Core functionality
pub mod cli;
pub mod core;

// Manifest handling
pub mod manifest;

// Git integration
pub mod git;
pub mod sync;

// Supporting modules
pub mod utils;
