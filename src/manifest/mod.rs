//! Manifest parsing and validation for depsync.
//!
//! The manifest is a JSON document listing the external source repositories
//! a build depends on. Each record names a dependency, gives the URL of its
//! git repository, and optionally pins it to a revision:
//!
//! ```json
//! [
//!   { "name": "glfw", "url": "https://github.com/glfw/glfw.git", "revision": "3.3.8" },
//!   { "name": "glm",  "url": "https://github.com/g-truc/glm.git" }
//! ]
//! ```
//!
//! Loading is strictly structural: the file must exist, parse as a JSON
//! array of records with the fields above, and carry non-empty, unique
//! names and non-empty URLs. URL well-formedness is deliberately *not*
//! checked here - an unreachable or malformed URL fails naturally in the
//! synchronizer's clone step, which produces the better error.
//!
//! Manifest order is preserved: the orchestrator synchronizes dependencies
//! in exactly the order they appear.

use crate::core::DepsyncError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One external source dependency: where it lives and which revision to
/// converge its working copy to.
///
/// Immutable once loaded; the synchronizer treats it as a read-only
/// descriptor and keeps no state of its own between dependencies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DependencySpec {
    /// Identifier for the dependency, unique within a manifest.
    ///
    /// Also names the working-copy directory under the sync root, so two
    /// entries must never share a name.
    pub name: String,

    /// Location of the remote git repository.
    ///
    /// Anything the system git accepts: HTTPS, SSH, `file://`, or a local
    /// path.
    pub url: String,

    /// Optional revision pin: a commit hash, tag, or branch name.
    ///
    /// Absent means "track the remote's default-branch tip".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

/// An ordered list of [`DependencySpec`] records loaded from a manifest
/// file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Dependencies in manifest order.
    pub dependencies: Vec<DependencySpec>,
}

impl Manifest {
    /// Load and validate a manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// - [`DepsyncError::ManifestNotFound`] if the file is missing or
    ///   unreadable
    /// - [`DepsyncError::ManifestParseError`] if the content is not a JSON
    ///   array of dependency records, or a record violates the structural
    ///   rules (empty name, duplicate name, empty url)
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use depsync_cli::manifest::Manifest;
    /// use std::path::Path;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let manifest = Manifest::load(Path::new("Scripts/dependencies.json"))?;
    /// println!("{} dependencies", manifest.dependencies.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|_| DepsyncError::ManifestNotFound {
                path: path.display().to_string(),
            })?;

        let dependencies: Vec<DependencySpec> =
            serde_json::from_str(&content).map_err(|e| DepsyncError::ManifestParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let manifest = Self { dependencies };
        manifest.validate(path)?;
        Ok(manifest)
    }

    /// Check the structural invariants of the loaded records.
    ///
    /// A duplicate name would make two entries converge the same working
    /// copy, with the later entry silently clobbering the earlier one.
    fn validate(&self, path: &Path) -> Result<(), DepsyncError> {
        let mut seen = HashSet::new();
        for dep in &self.dependencies {
            if dep.name.is_empty() {
                return Err(self.parse_error(path, "dependency with empty 'name'"));
            }
            if dep.url.is_empty() {
                return Err(
                    self.parse_error(path, format!("dependency '{}' has empty 'url'", dep.name))
                );
            }
            if !seen.insert(dep.name.as_str()) {
                return Err(
                    self.parse_error(path, format!("duplicate dependency name '{}'", dep.name))
                );
            }
        }
        Ok(())
    }

    fn parse_error(&self, path: &Path, reason: impl Into<String>) -> DepsyncError {
        DepsyncError::ManifestParseError {
            file: path.display().to_string(),
            reason: reason.into(),
        }
    }
}
