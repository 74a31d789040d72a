//! Break suggestions shown as placeholders in the optional break fields

use crate::core::models::BreakFrequency;
use serde::Serialize;

/// Placeholder used when the scheduler picks breaks itself
pub const AUTO_PLACEHOLDER: &str = "Auto";

/// Suggested break count range for a frequency, if any
#[must_use]
pub const fn suggested_break_range(frequency: BreakFrequency) -> Option<(u32, u32)> {
    match frequency {
        BreakFrequency::Frequent => Some((6, 10)),
        BreakFrequency::Minimal => Some((2, 4)),
        BreakFrequency::Auto => None,
    }
}

/// Advisory break count and total break time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakSuggestion {
    /// Suggested number of breaks, `None` for auto
    pub breaks: Option<(u32, u32)>,
    /// Length of each break in minutes
    pub duration_minutes: u32,
}

impl BreakSuggestion {
    /// Suggested total break minutes (`breaks × duration`)
    #[must_use]
    pub fn total_minutes(&self) -> Option<(u32, u32)> {
        self.breaks.map(|(lo, hi)| {
            (
                lo.saturating_mul(self.duration_minutes),
                hi.saturating_mul(self.duration_minutes),
            )
        })
    }

    /// Placeholder text for the max-breaks field
    #[must_use]
    pub fn max_breaks_placeholder(&self) -> String {
        self.breaks.map_or_else(
            || AUTO_PLACEHOLDER.to_string(),
            |(lo, hi)| format!("{lo}-{hi} (suggested)"),
        )
    }

    /// Placeholder text for the total-break-time field
    #[must_use]
    pub fn total_break_time_placeholder(&self) -> String {
        self.total_minutes().map_or_else(
            || AUTO_PLACEHOLDER.to_string(),
            |(lo, hi)| format!("{lo}-{hi} min"),
        )
    }
}

/// Derive the break suggestion for the current preferences
#[must_use]
pub const fn suggest_breaks(frequency: BreakFrequency, duration_minutes: u32) -> BreakSuggestion {
    BreakSuggestion {
        breaks: suggested_break_range(frequency),
        duration_minutes,
    }
}
