//! Session registry
//!
//! A single static catalog of session definitions is pruned per project
//! through the `hide` list: a hidden session is never registered, so it can
//! neither be listed nor run.

use std::fmt;

use crate::config::Config;
use crate::core::models::{PythonSpec, SessionOptions};
use crate::core::services::session::Session;
use crate::error::PipedError;

/// Session callback
pub type SessionFn = fn(&Session<'_>) -> anyhow::Result<()>;

/// Build a [`SessionDef`] named after a callback function
///
/// ```
/// use piped::core::services::Session;
///
/// fn lint(_session: &Session<'_>) -> anyhow::Result<()> {
///     Ok(())
/// }
///
/// let def = piped::session!(lint, "Run the linters.");
/// assert_eq!(def.name, "lint");
/// ```
#[macro_export]
macro_rules! session {
    ($callback:ident, $description:expr) => {
        $crate::core::services::registry::SessionDef::new(stringify!($callback), $description, $callback)
    };
}

/// A session definition, before filtering
#[derive(Clone)]
pub struct SessionDef {
    /// Session name
    pub name: String,
    /// One-line description shown by `--list`
    pub description: String,
    /// Scheduling hints
    pub options: SessionOptions,
    /// What the session does
    pub callback: SessionFn,
}

impl SessionDef {
    /// Define a session with default options
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, callback: SessionFn) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: SessionOptions::default(),
            callback,
        }
    }

    /// Override the name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the scheduling hints
    #[must_use]
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }
}

impl fmt::Debug for SessionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionDef")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A registered, runnable session
#[derive(Clone)]
pub struct RegisteredSession {
    /// Unique name (`<family>-<version>` for multi-version sessions)
    pub name: String,
    /// Name of the definition this entry came from
    pub family: String,
    /// One-line description
    pub description: String,
    /// Pinned interpreter version
    pub python: Option<String>,
    /// Scheduling hints
    pub options: SessionOptions,
    callback: SessionFn,
}

impl RegisteredSession {
    /// Run the session callback
    pub fn call(&self, session: &Session<'_>) -> anyhow::Result<()> {
        (self.callback)(session)
    }

    /// Whether the session carries any of `tags`
    #[must_use]
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.options.tags.iter().any(|tag| tags.contains(tag))
    }
}

impl fmt::Debug for RegisteredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredSession")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("python", &self.python)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    /// Definition name
    pub name: String,
    /// Names of the registered entries
    pub entries: Vec<String>,
}

/// Result of a filtered registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The session was registered
    Registered(SessionHandle),
    /// The session is on the hide-list and was skipped
    Hidden,
}

impl Registration {
    /// Whether the session was registered
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        matches!(self, Self::Registered(_))
    }

    /// Handle of the registered session
    #[must_use]
    pub const fn handle(&self) -> Option<&SessionHandle> {
        match self {
            Self::Registered(handle) => Some(handle),
            Self::Hidden => None,
        }
    }
}

/// Ordered set of registered sessions
#[derive(Debug, Default)]
pub struct Registry {
    sessions: Vec<RegisteredSession>,
}

impl Registry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `def` unless its name is on the hide-list
    ///
    /// # Errors
    ///
    /// Returns [`PipedError::DuplicateSession`] when a name is already taken.
    pub fn filtered_session(&mut self, config: &Config, def: SessionDef) -> Result<Registration, PipedError> {
        if config.is_hidden(&def.name) {
            log::debug!("Hiding session {}", def.name);
            return Ok(Registration::Hidden);
        }

        self.register(def).map(Registration::Registered)
    }

    /// Register `def` unconditionally
    ///
    /// A definition pinned to several interpreter versions becomes one entry
    /// per version, named `<name>-<version>`.
    pub fn register(&mut self, def: SessionDef) -> Result<SessionHandle, PipedError> {
        let versions = def.options.python.expand();
        let multi = matches!(def.options.python, PythonSpec::Versions(_));

        let entries: Vec<RegisteredSession> = versions
            .into_iter()
            .map(|python| RegisteredSession {
                name: match (&python, multi) {
                    (Some(version), true) => format!("{}-{version}", def.name),
                    _ => def.name.clone(),
                },
                family: def.name.clone(),
                description: def.description.clone(),
                python,
                options: def.options.clone(),
                callback: def.callback,
            })
            .collect();

        for entry in &entries {
            if self.contains(&entry.name) || self.contains(&entry.family) {
                return Err(PipedError::DuplicateSession(entry.name.clone()));
            }
        }

        let handle = SessionHandle {
            name: def.name,
            entries: entries.iter().map(|entry| entry.name.clone()).collect(),
        };
        self.sessions.extend(entries);
        Ok(handle)
    }

    /// Whether `name` resolves to at least one session
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sessions.iter().any(|s| s.name == name || s.family == name)
    }

    /// Session registered under exactly `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredSession> {
        self.sessions.iter().find(|s| s.name == name)
    }

    /// Sessions selected by `name`: the exact entry, or every entry of a family
    #[must_use]
    pub fn resolve(&self, name: &str) -> Vec<&RegisteredSession> {
        if let Some(session) = self.get(name) {
            return vec![session];
        }
        self.sessions.iter().filter(|s| s.family == name).collect()
    }

    /// All sessions in registration order
    #[must_use]
    pub fn sessions(&self) -> &[RegisteredSession] {
        &self.sessions
    }

    /// Number of registered sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
