//! TOML parser for `pyproject.toml`
//!
//! Handles reading the manifest and extracting the `[tool.<name>]` and
//! `[project]` tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::PipedError;

/// Dependency metadata from the `[project]` table
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProjectMetadata {
    /// Runtime dependencies
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Extras, keyed by extra name
    #[serde(default, rename = "optional-dependencies")]
    pub optional_dependencies: BTreeMap<String, Vec<String>>,
}

impl ProjectMetadata {
    /// Extract the `[project]` table, defaulting to empty when absent
    pub fn from_manifest(manifest: &toml::Table) -> Result<Self, PipedError> {
        manifest
            .get("project")
            .cloned()
            .map_or_else(
                || Ok(Self::default()),
                |value| value.try_into().map_err(PipedError::InvalidProject),
            )
    }

    /// Runtime dependencies followed by every extra's dependencies
    #[must_use]
    pub fn all_dependencies(&self) -> Vec<String> {
        self.dependencies
            .iter()
            .chain(self.optional_dependencies.values().flatten())
            .cloned()
            .collect()
    }
}

/// Read and parse a manifest file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn read_manifest(path: &Path) -> Result<toml::Table, PipedError> {
    let content = fs::read_to_string(path).map_err(|source| PipedError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&content, path)
}

/// Parse manifest content; `path` is only used in error messages
pub fn parse_manifest(content: &str, path: &Path) -> Result<toml::Table, PipedError> {
    toml::from_str(content).map_err(|source| PipedError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Look up `[tool.<name>]`
#[must_use]
pub fn tool_section<'a>(manifest: &'a toml::Table, name: &str) -> Option<&'a toml::Value> {
    manifest.get("tool")?.as_table()?.get(name)
}
