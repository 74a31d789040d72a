//! Break preference fields

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Break length used when the field is blank or not a positive number
pub const DEFAULT_BREAK_DURATION: u32 = 15;

/// How often the backend should place breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakFrequency {
    /// Let the scheduler decide
    #[default]
    Auto,
    /// Short blocks, many breaks
    Frequent,
    /// Long blocks, few breaks
    Minimal,
}

impl BreakFrequency {
    /// Value submitted in the `break_frequency` field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Frequent => "frequent",
            Self::Minimal => "minimal",
        }
    }
}

impl FromStr for BreakFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "frequent" => Ok(Self::Frequent),
            "minimal" => Ok(Self::Minimal),
            _ => Err(format!("Unknown break frequency: '{s}'")),
        }
    }
}

impl fmt::Display for BreakFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an optional positive count (`max_breaks`, `total_break_time`).
///
/// Blank, non-numeric, zero and negative input all mean "not set".
#[must_use]
pub fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<i64>().ok().and_then(positive)
}

/// Keep `value` only when it is a positive `u32`
#[must_use]
pub fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}

/// Parse the break duration field, falling back to [`DEFAULT_BREAK_DURATION`]
#[must_use]
pub fn parse_break_duration(raw: &str) -> u32 {
    parse_positive(raw).unwrap_or(DEFAULT_BREAK_DURATION)
}
