//! Scalar form fields, parsed at the boundary

use super::events::FormField;
use crate::core::models::breaks::{parse_break_duration, parse_positive};
use crate::core::models::{BreakFrequency, TimeOfDay, DEFAULT_BREAK_DURATION};
use serde::{Deserialize, Serialize};

/// Current values of the non-subject fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    /// Requested study hours; `None` when blank or not a number
    pub total_hours: Option<f64>,
    /// Window start
    pub study_start_time: Option<TimeOfDay>,
    /// Window end
    pub study_end_time: Option<TimeOfDay>,
    /// Break placement preference
    pub break_frequency: BreakFrequency,
    /// Minutes per break, always positive
    pub break_duration: u32,
    /// Optional cap on the number of breaks
    pub max_breaks: Option<u32>,
    /// Optional total break budget in minutes
    pub total_break_time: Option<u32>,
    /// Free-text note carried along with the submission
    pub note: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            total_hours: None,
            study_start_time: None,
            study_end_time: None,
            break_frequency: BreakFrequency::Auto,
            break_duration: DEFAULT_BREAK_DURATION,
            max_breaks: None,
            total_break_time: None,
            note: String::new(),
        }
    }
}

fn parse_hours(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite())
}

impl FormFields {
    /// Store a raw value typed into `field`
    ///
    /// Blank or unparsable input leaves number and time fields unset (the
    /// break duration falls back to its default). An unknown break frequency
    /// keeps the previous choice.
    ///
    /// # Errors
    /// Returns a description of the problem when `raw` could not be parsed;
    /// the field has still been updated as described above.
    pub fn apply(&mut self, field: FormField, raw: &str) -> Result<(), String> {
        let blank = raw.trim().is_empty();
        let rejected = || Err(format!("Ignoring invalid {field} value: '{raw}'"));
        match field {
            FormField::TotalHours => {
                self.total_hours = parse_hours(raw);
                if self.total_hours.is_none() && !blank {
                    return rejected();
                }
            }
            FormField::StudyStartTime => {
                self.study_start_time = TimeOfDay::parse_field(raw);
                if self.study_start_time.is_none() && !blank {
                    return rejected();
                }
            }
            FormField::StudyEndTime => {
                self.study_end_time = TimeOfDay::parse_field(raw);
                if self.study_end_time.is_none() && !blank {
                    return rejected();
                }
            }
            FormField::BreakFrequency => {
                self.break_frequency = raw.parse()?;
            }
            FormField::BreakDuration => {
                self.break_duration = parse_break_duration(raw);
                if parse_positive(raw).is_none() && !blank {
                    return rejected();
                }
            }
            FormField::MaxBreaks => {
                self.max_breaks = parse_positive(raw);
                if self.max_breaks.is_none() && !blank {
                    return rejected();
                }
            }
            FormField::TotalBreakTime => {
                self.total_break_time = parse_positive(raw);
                if self.total_break_time.is_none() && !blank {
                    return rejected();
                }
            }
            FormField::Note => raw.clone_into(&mut self.note),
        }
        Ok(())
    }

    /// Hours used by the time-window check: blank or invalid counts as zero
    #[must_use]
    pub fn requested_hours(&self) -> f64 {
        self.total_hours.unwrap_or(0.0)
    }

    /// Field value as it would be submitted (empty string when unset)
    #[must_use]
    pub fn value_of(&self, field: FormField) -> String {
        fn or_blank<T: ToString>(value: Option<T>) -> String {
            value.map_or_else(String::new, |v| v.to_string())
        }
        match field {
            FormField::TotalHours => or_blank(self.total_hours),
            FormField::StudyStartTime => or_blank(self.study_start_time),
            FormField::StudyEndTime => or_blank(self.study_end_time),
            FormField::BreakFrequency => self.break_frequency.to_string(),
            FormField::BreakDuration => self.break_duration.to_string(),
            FormField::MaxBreaks => or_blank(self.max_breaks),
            FormField::TotalBreakTime => or_blank(self.total_break_time),
            FormField::Note => self.note.clone(),
        }
    }
}
