//! TOML manifest access
//!
//! - [`parser`] - Read `pyproject.toml` and pull out the tables piped cares about

pub mod parser;

pub use parser::{ProjectMetadata, parse_manifest, read_manifest, tool_section};
