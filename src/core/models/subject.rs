//! Subject entry model

use super::rating::{Rating, WeightBand};
use serde::{Deserialize, Serialize};

/// One row of the subject list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubjectEntry {
    /// Free-text subject label as typed (may be blank while editing)
    #[serde(default)]
    pub subject: String,

    /// How hard the subject is
    #[serde(default)]
    pub difficulty: Rating,

    /// How soon the subject needs attention
    #[serde(default)]
    pub urgency: Rating,
}

/// Derived weight of an entry, as shown next to its ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryWeight {
    /// `difficulty + urgency`, 2-10
    pub weight: u8,
    /// Band the weight falls into
    pub band: WeightBand,
}

impl EntryWeight {
    /// Weight for a difficulty/urgency pair
    #[must_use]
    pub const fn of(difficulty: Rating, urgency: Rating) -> Self {
        let weight = difficulty.value() + urgency.value();
        Self {
            weight,
            band: WeightBand::from_weight(weight),
        }
    }
}

impl SubjectEntry {
    /// Create an entry
    #[must_use]
    pub fn new(subject: impl Into<String>, difficulty: Rating, urgency: Rating) -> Self {
        Self {
            subject: subject.into(),
            difficulty,
            urgency,
        }
    }

    /// Blank entry with both ratings at 3
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Label with surrounding whitespace removed
    #[must_use]
    pub fn label(&self) -> &str {
        self.subject.trim()
    }

    /// Whether the label has any non-whitespace content
    #[must_use]
    pub fn has_label(&self) -> bool {
        !self.label().is_empty()
    }

    /// Weight and band derived from the current ratings
    #[must_use]
    pub const fn weight(&self) -> EntryWeight {
        EntryWeight::of(self.difficulty, self.urgency)
    }
}

/// Entries prefilled when no seed file is configured
#[must_use]
pub fn sample_subjects() -> Vec<SubjectEntry> {
    [("Calculus", 4, 3), ("English Essay", 3, 5), ("Physics", 5, 2)]
        .into_iter()
        .filter_map(|(name, difficulty, urgency)| {
            Some(SubjectEntry::new(
                name,
                Rating::new(difficulty)?,
                Rating::new(urgency)?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(v: u8) -> Rating {
        Rating::new(v).unwrap()
    }

    #[test]
    fn test_blank_entry_defaults() {
        let entry = SubjectEntry::blank();
        assert_eq!(entry.subject, "");
        assert_eq!(entry.difficulty.value(), 3);
        assert_eq!(entry.urgency.value(), 3);
        assert_eq!(entry.weight().weight, 6);
        assert_eq!(entry.weight().band, WeightBand::Medium);
    }

    #[test]
    fn test_weight_for_every_rating_pair() {
        for difficulty in Rating::all() {
            for urgency in Rating::all() {
                let weight = EntryWeight::of(difficulty, urgency);
                assert_eq!(weight.weight, difficulty.value() + urgency.value());
                assert!((2..=10).contains(&weight.weight));
                assert_eq!(weight.band, WeightBand::from_weight(weight.weight));
            }
        }
    }

    #[test]
    fn test_label_is_trimmed() {
        let entry = SubjectEntry::new("  Organic Chemistry \t", rating(2), rating(2));
        assert_eq!(entry.label(), "Organic Chemistry");
        assert!(entry.has_label());
        assert!(!SubjectEntry::new("   ", rating(2), rating(2)).has_label());
    }

    #[test]
    fn test_sample_subjects_order() {
        let sample = sample_subjects();
        let names: Vec<&str> = sample.iter().map(SubjectEntry::label).collect();
        assert_eq!(names, ["Calculus", "English Essay", "Physics"]);
        assert_eq!(sample[1].weight().weight, 8);
        assert_eq!(sample[1].weight().band, WeightBand::High);
    }

    #[test]
    fn test_entry_deserializes_with_default_ratings() {
        let entry: SubjectEntry = toml::from_str(r#"subject = "Biology""#).unwrap();
        assert_eq!(entry.subject, "Biology");
        assert_eq!(entry.difficulty, Rating::DEFAULT);
        assert_eq!(entry.urgency, Rating::DEFAULT);

        let out_of_range = toml::from_str::<SubjectEntry>("subject = \"Art\"\ndifficulty = 7");
        assert!(out_of_range.is_err());
    }
}
