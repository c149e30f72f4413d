//! Command implementations

mod list;
mod run;

pub use list::list;
pub use run::{RunRequest, run};
