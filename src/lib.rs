//! Shared library for `StudyPlanner`
//! Form state, feasibility checks, and configuration used by the CLI and WASM targets

pub mod core;
pub mod logger;
pub mod shared;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use shared::*;
