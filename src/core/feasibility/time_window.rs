//! Time-window arithmetic and the "requested hours exceed window" warning
//!
//! A window whose end is at or before its start crosses midnight, so 24 hours
//! are added to the end before subtracting. `start == end` therefore yields a
//! full 24-hour window.

use crate::core::models::time::{TimeOfDay, MINUTES_PER_DAY};
use serde::Serialize;
use std::fmt;

/// Hours available between `start` and `end`, or `None` if either is unset
#[must_use]
pub fn available_hours(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> Option<f64> {
    let (start, end) = (start?, end?);
    let start = start.minutes_since_midnight();
    let mut end = end.minutes_since_midnight();
    if end <= start {
        end += MINUTES_PER_DAY;
    }
    Some(f64::from(end - start) / 60.0)
}

/// Advisory shown when the requested study time does not fit the window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeWarning {
    /// Hours the user asked for
    pub requested_hours: f64,
    /// Window start
    pub start: TimeOfDay,
    /// Window end
    pub end: TimeOfDay,
    /// Hours the window actually allows
    pub available_hours: f64,
}

impl fmt::Display for TimeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time Constraint: You've requested {} hours of study, but your time window ({} - {}) only allows {:.1} hours. The system will automatically adjust your schedule.",
            self.requested_hours, self.start, self.end, self.available_hours
        )
    }
}

/// Warn when `total_hours` exceeds the window between `start` and `end`.
///
/// Returns `None` (clearing any shown warning) when the window is incomplete
/// or the request fits. Never blocks submission.
#[must_use]
pub fn check_time_constraint(
    total_hours: f64,
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
) -> Option<TimeWarning> {
    let available = available_hours(start, end)?;
    if total_hours > available {
        Some(TimeWarning {
            requested_hours: total_hours,
            start: start?,
            end: end?,
            available_hours: available,
        })
    } else {
        None
    }
}
