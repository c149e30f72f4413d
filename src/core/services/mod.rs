//! Services - registration, selection and execution of sessions
//!
//! - [`options`] - Positional-argument scanning
//! - [`session`] - Per-run session context
//! - [`install`] - Dependency installation
//! - [`requirements`] - Dev requirement file resolution
//! - [`tracked`] - Tracked file enumeration
//! - [`registry`] - Hide-list filtered session registration
//! - [`environment`] - Isolated environment provisioning
//! - [`driver`] - Selection and sequential execution

pub mod driver;
pub mod environment;
pub mod install;
pub mod options;
pub mod registry;
pub mod requirements;
pub mod session;
pub mod tracked;

pub use driver::{Driver, RunOptions};
pub use environment::EnvironmentPolicy;
pub use install::{SKIP_INSTALL, install_deps, skip_install_requested};
pub use options::find_option;
pub use registry::{Registration, RegisteredSession, Registry, SessionDef, SessionFn, SessionHandle};
pub use requirements::DevRequirements;
pub use session::Session;
pub use tracked::tracked_files;
