//! Version control system port
//!
//! Defines the interface for interacting with version control.

/// Version control system abstraction
pub trait VersionControl: std::fmt::Debug {
    /// Paths tracked by the repository, in index order
    ///
    /// Implementations query the repository on every call.
    fn tracked_files(&self) -> anyhow::Result<Vec<String>>;
}
