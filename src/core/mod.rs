//! Core types for depsync.
//!
//! This module holds the error taxonomy shared by every other module:
//! [`DepsyncError`] for strongly-typed failure cases, [`ErrorContext`] for
//! user-facing messages with suggestions, and [`user_friendly_error`] to
//! convert any error reaching the CLI boundary into the latter.

pub mod error;

pub use error::{DepsyncError, ErrorContext, user_friendly_error};
