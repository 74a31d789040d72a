//! Difficulty/urgency ratings and the weight bands derived from them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 1-5 rating used for both difficulty and urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating
    pub const MIN: u8 = 1;
    /// Highest accepted rating
    pub const MAX: u8 = 5;
    /// Rating preselected on a new entry
    pub const DEFAULT: Self = Self(3);

    /// Create a rating, returning `None` when `value` is outside 1-5
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Numeric value (1-5)
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Every rating in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Option label shown in the difficulty selector
    #[must_use]
    pub const fn difficulty_label(self) -> &'static str {
        match self.0 {
            1 => "1 - Easy",
            2 => "2 - Light",
            3 => "3 - Moderate",
            4 => "4 - Hard",
            _ => "5 - Very Hard",
        }
    }

    /// Option label shown in the urgency selector
    #[must_use]
    pub const fn urgency_label(self) -> &'static str {
        match self.0 {
            1 => "1 - Low",
            2 => "2 - Medium",
            3 => "3 - High",
            4 => "4 - Very High",
            _ => "5 - Critical",
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "Rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )
        })
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("Invalid rating: '{s}'"))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse priority bucket for a subject weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightBand {
    /// Weight 3 or less
    Low,
    /// Weight 4 through 6
    Medium,
    /// Weight 7 or more
    High,
}

impl WeightBand {
    /// Classify a weight. Boundaries are inclusive: `<=3` low, `4..=6` medium, `>=7` high.
    #[must_use]
    pub const fn from_weight(weight: u8) -> Self {
        match weight {
            0..=3 => Self::Low,
            4..=6 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Style class the presentation layer attaches to the weight display
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Low => "text-success",
            Self::Medium => "text-warning",
            Self::High => "text-danger",
        }
    }

    /// Lowercase band name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for WeightBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
