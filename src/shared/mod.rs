//! Shared module for common functionality across all targets

pub mod config;

/// Returns the current version of the `StudyPlanner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
