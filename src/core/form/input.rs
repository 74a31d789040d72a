//! Form files: a TOML rendition of a filled-in form
//!
//! ```toml
//! total_hours = 6
//! study_start_time = "09:00"
//! study_end_time = "17:00"
//! break_frequency = "frequent"
//!
//! [[subject]]
//! subject = "Calculus"
//! difficulty = 4
//! urgency = 3
//! ```
//!
//! Every key is optional. Applying a file replays its values as user edits, so
//! bad values behave exactly as they would when typed into the form.

use super::events::FormField;
use super::presenter::Presenter;
use super::session::FormSession;
use crate::core::models::{sample_subjects, SubjectEntry};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Contents of a form file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    /// Requested study hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
    /// Window start, `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_start_time: Option<String>,
    /// Window end, `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_end_time: Option<String>,
    /// `auto`, `frequent` or `minimal`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_frequency: Option<String>,
    /// Minutes per break
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_duration: Option<i64>,
    /// Cap on the number of breaks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_breaks: Option<i64>,
    /// Total break minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_break_time: Option<i64>,
    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Subject rows; absent keeps the session's current list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<SubjectEntry>>,
}

impl FormInput {
    /// Parse a form file body
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or a rating is out of range
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read and parse a form file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read form file {}: {e}", path.display()))?;
        let input = Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse form file {}: {e}", path.display()))?;
        Ok(input)
    }

    /// A filled-in example built from the sample subjects
    #[must_use]
    pub fn sample() -> Self {
        Self {
            total_hours: Some(6.0),
            study_start_time: Some("09:00".to_string()),
            study_end_time: Some("17:00".to_string()),
            break_frequency: Some("auto".to_string()),
            break_duration: Some(15),
            max_breaks: None,
            total_break_time: None,
            note: Some(String::new()),
            subject: Some(sample_subjects()),
        }
    }

    /// Render as a form file
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Raw value for each scalar field present in the file
    #[must_use]
    pub fn field_values(&self) -> Vec<(FormField, String)> {
        let mut values = Vec::new();
        let mut push = |field, value: Option<String>| {
            if let Some(value) = value {
                values.push((field, value));
            }
        };
        push(FormField::TotalHours, self.total_hours.map(|h| h.to_string()));
        push(FormField::StudyStartTime, self.study_start_time.clone());
        push(FormField::StudyEndTime, self.study_end_time.clone());
        push(FormField::BreakFrequency, self.break_frequency.clone());
        push(FormField::BreakDuration, self.break_duration.map(|v| v.to_string()));
        push(FormField::MaxBreaks, self.max_breaks.map(|v| v.to_string()));
        push(FormField::TotalBreakTime, self.total_break_time.map(|v| v.to_string()));
        push(FormField::Note, self.note.clone());
        values
    }

    /// Replay the file into `session` as user edits
    ///
    /// When the file lists subjects, the current rows are removed and the
    /// file's rows added in order; an empty list leaves the form with none.
    pub fn apply_to<P: Presenter>(&self, session: &mut FormSession<P>) {
        if let Some(subjects) = &self.subject {
            session.clear_subjects();
            for entry in subjects {
                session.add_subject(&entry.subject, entry.difficulty, entry.urgency);
            }
        }
        for (field, value) in self.field_values() {
            session.set_field(field, &value);
        }
    }
}

/// Load the subject rows of a form file, for seeding a new session
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<Vec<SubjectEntry>, Box<dyn Error>> {
    Ok(FormInput::load(path)?.subject.unwrap_or_default())
}
