//! Output formatting for human and JSON modes
//!
//! Session listings and run summaries go to stdout, either as
//! human-readable text or machine-parseable JSON. Log lines go to stderr.

use std::time::Duration;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::Backend;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of `--list`
#[derive(Debug, Serialize)]
pub struct SessionListResult {
    /// Manifest the sessions were configured from
    pub manifest: String,
    /// Registered sessions, in registration order
    pub sessions: Vec<SessionInfo>,
}

/// A registered session as shown by `--list`
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    /// Session name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Whether it runs when no session is requested
    pub default: bool,
    /// Environment backend
    pub backend: Backend,
    /// Tags
    pub tags: Vec<String>,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Every invocation succeeded
    Success,
    /// The session stopped on an error
    Failed,
}

/// Outcome of a single session
#[derive(Debug, Serialize)]
pub struct SessionOutcome {
    /// Session name
    pub name: String,
    /// Final status
    pub status: SessionStatus,
    /// Exit code the failure maps to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time spent in the session, in milliseconds
    pub duration_ms: u128,
}

impl SessionOutcome {
    /// A successful session
    #[must_use]
    pub fn success(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: SessionStatus::Success,
            exit_code: None,
            error: None,
            duration_ms: duration.as_millis(),
        }
    }

    /// A failed session
    #[must_use]
    pub fn failed(name: impl Into<String>, exit_code: i32, error: String, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: SessionStatus::Failed,
            exit_code: Some(exit_code),
            error: Some(error),
            duration_ms: duration.as_millis(),
        }
    }
}

/// Result of a run
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    /// Sessions that ran, in order
    pub sessions: Vec<SessionOutcome>,
}

impl RunSummary {
    /// Whether every session succeeded
    #[must_use]
    pub fn success(&self) -> bool {
        self.sessions.iter().all(|s| s.status == SessionStatus::Success)
    }

    /// Process exit code: 0, or the first failure's code clamped to 1..=255
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.sessions
            .iter()
            .find_map(|s| s.exit_code)
            .map_or(0, |code| u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1))
    }

    /// Names of the sessions that ran
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.sessions.iter().map(|s| s.name.as_str()).collect()
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.sessions.is_empty() {
            println!("No sessions ran.");
            return;
        }

        if let [outcome] = self.sessions.as_slice() {
            let seconds = outcome.duration_ms as f64 / 1000.0;
            match outcome.status {
                SessionStatus::Success => {
                    println!("Session {} was {} in {seconds:.1}s", outcome.name, "successful".green());
                },
                SessionStatus::Failed => {
                    println!("Session {} {} in {seconds:.1}s", outcome.name, "failed".red());
                },
            }
            return;
        }

        println!("Ran multiple sessions:");
        for outcome in &self.sessions {
            let status = match outcome.status {
                SessionStatus::Success => "success".green(),
                SessionStatus::Failed => "failed".red(),
            };
            println!("* {}: {status}", outcome.name);
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl SessionListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Sessions defined in {}:\n", self.manifest);

        if self.sessions.is_empty() {
            println!("  (none)");
            return;
        }

        for session in &self.sessions {
            if session.default {
                println!("* {} -> {}", session.name.bold(), session.description);
            } else {
                println!("- {} -> {}", session.name, session.description);
            }
        }

        println!("\nsessions marked with * are selected, sessions marked with - are skipped.");
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
