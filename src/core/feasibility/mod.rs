//! Feasibility validation for the study form
//!
//! Two severities: the required-field checks block submission, the time-window
//! check and break suggestions are advisory only.

pub mod breaks;
pub mod required;
pub mod time_window;

pub use breaks::{suggest_breaks, BreakSuggestion};
pub use required::{validate_required_fields, ValidationReport, MIN_TOTAL_HOURS, NO_SUBJECTS_MESSAGE};
pub use time_window::{available_hours, check_time_constraint, TimeWarning};
