//! Domain models
//!
//! - [`Invocation`] - one fully materialised subprocess call
//! - [`SessionOptions`] - scheduling hints attached to a session definition

mod invocation;
mod options;

pub use invocation::Invocation;
pub use options::{Backend, PythonSpec, SessionOptions};
