//! Project configuration
//!
//! Loaded once per process from the `[tool.piped]` table of the project
//! manifest and passed by reference to everything that needs it.
//!
//! ```toml
//! [tool.piped]
//! default_sessions = ["reformat", "verify-markup", "flake8", "spell-check", "slot-check", "type-check", "test"]
//! hide = ["verify-types"]
//! path_ignore = "yuyo/_vendor/"
//! project_name = "yuyo"
//! top_level_targets = ["./docs_src", "./examples", "./noxfile.py", "./tests", "./yuyo"]
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::adapters::toml::{parse_manifest, read_manifest, tool_section};
use crate::error::PipedError;

/// Name of the table under `[tool]`
pub const SECTION: &str = "piped";

/// Project configuration from `[tool.piped]`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Sessions to run when none are requested
    pub default_sessions: Vec<String>,

    /// Sessions that are never registered
    #[serde(default)]
    pub hide: BTreeSet<String>,

    /// Pattern for vendored paths excluded from file-scanning sessions
    #[serde(default)]
    pub path_ignore: Option<PathPattern>,

    /// Importable package name
    #[serde(default)]
    pub project_name: Option<String>,

    /// Paths treated as the project's source by linters and formatters
    pub top_level_targets: Vec<String>,

    /// Vendored code directory
    #[serde(default)]
    pub vendor_dir: Option<String>,
}

impl Config {
    /// Load configuration from a manifest file
    ///
    /// # Errors
    ///
    /// Fails when the manifest is missing or unparsable, has no `[tool.piped]`
    /// table, or the table lacks a required field.
    pub fn load(path: &Path) -> Result<Self, PipedError> {
        let manifest = read_manifest(path)?;
        Self::from_manifest(&manifest, path)
    }

    /// Parse configuration from manifest content; `path` is only used in errors
    pub fn parse(content: &str, path: &Path) -> Result<Self, PipedError> {
        let manifest = parse_manifest(content, path)?;
        Self::from_manifest(&manifest, path)
    }

    /// Extract configuration from an already parsed manifest
    pub fn from_manifest(manifest: &toml::Table, path: &Path) -> Result<Self, PipedError> {
        let section = tool_section(manifest, SECTION).ok_or_else(|| PipedError::MissingSection {
            path: path.to_path_buf(),
            section: SECTION,
        })?;

        section.clone().try_into().map_err(PipedError::InvalidConfig)
    }

    /// The configured project name
    ///
    /// # Errors
    ///
    /// Returns [`PipedError::MissingProjectName`] when it is unset or empty.
    pub fn assert_project_name(&self) -> Result<&str, PipedError> {
        match self.project_name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(PipedError::MissingProjectName),
        }
    }

    /// Whether a session name is on the hide-list
    #[must_use]
    pub fn is_hidden(&self, name: &str) -> bool {
        self.hide.contains(name)
    }

    /// Whether a path matches `path_ignore`
    #[must_use]
    pub fn is_ignored(&self, path: &str) -> bool {
        self.path_ignore.as_ref().is_some_and(|pattern| pattern.matches(path))
    }
}

/// Regex matched against the start of a path
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compile a pattern
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not a valid regex.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written in the manifest
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern matches at the start of `path`
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for PathPattern {
    type Err = regex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for PathPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(serde::de::Error::custom)
    }
}
