//! Core domain logic for piped
//!
//! All subprocess and version-control access goes through port traits so the
//! registry, driver and session catalog can be exercised without real tools.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Invocation, SessionOptions, Backend)
//! - `services/` - Registration, selection, installation and execution
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
