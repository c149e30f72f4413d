//! Centralized path definitions for piped
//!
//! ## Layout
//!
//! ```text
//! project/
//! ├── pyproject.toml              # Manifest with the [tool.piped] table
//! ├── dev-requirements/           # Per-session requirement files
//! │   ├── constraints.in
//! │   ├── constraints.txt
//! │   └── tests.txt
//! └── .piped/                     # Session environments (disposable)
//!     ├── test/
//!     └── type-check/
//! ```
//!
//! Requirement files missing from the project fall back to a shared copy under
//! the user data directory (`~/.local/share/piped/dev-requirements` on Linux).

use std::path::{Path, PathBuf};

/// Default manifest filename
pub const MANIFEST: &str = "pyproject.toml";

/// Directory holding per-session environments
pub const ENV_DIR: &str = ".piped";

/// Directory holding dev requirement files
pub const DEV_REQUIREMENTS_DIR: &str = "dev-requirements";

/// Application directory name under the user data directory
const DATA_DIR: &str = "piped";

/// Shared dev-requirements directory, if the platform has a data directory.
#[must_use]
pub fn shared_requirements_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(DATA_DIR).join(DEV_REQUIREMENTS_DIR))
}

/// Environment directory for a session.
#[must_use]
pub fn session_env_dir(root: &Path, session: &str) -> PathBuf {
    root.join(ENV_DIR).join(session)
}

/// Directory holding an environment's executables.
#[must_use]
pub fn env_bin_dir(env_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        env_dir.join("Scripts")
    } else {
        env_dir.join("bin")
    }
}

/// Project root for a manifest path (its parent directory, or `.`).
#[must_use]
pub fn project_root(manifest: &Path) -> PathBuf {
    manifest
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
