//! Submission payload handed to the scheduling backend

use super::events::FormField;
use super::fields::FormFields;
use super::subject_list::SubjectList;
use crate::core::models::BreakFrequency;
use serde::{Deserialize, Serialize};

/// Values posted by the form: parallel subject arrays plus scalar fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Subject labels (trimmed), in list order
    #[serde(rename = "subject[]")]
    pub subject: Vec<String>,
    /// Difficulty per subject
    #[serde(rename = "difficulty[]")]
    pub difficulty: Vec<u8>,
    /// Urgency per subject
    #[serde(rename = "urgency[]")]
    pub urgency: Vec<u8>,
    /// Requested study hours
    pub total_hours: f64,
    /// Window start, `HH:MM`
    pub study_start_time: Option<String>,
    /// Window end, `HH:MM`
    pub study_end_time: Option<String>,
    /// Break placement preference
    pub break_frequency: BreakFrequency,
    /// Optional cap on break count
    pub max_breaks: Option<u32>,
    /// Optional total break minutes
    pub total_break_time: Option<u32>,
    /// Minutes per break
    pub break_duration: u32,
    /// Free-text note
    #[serde(default)]
    pub note: String,
}

impl SubmissionPayload {
    /// Snapshot the list and fields. Callers validate first.
    #[must_use]
    pub fn build(subjects: &SubjectList, fields: &FormFields) -> Self {
        let entries: Vec<_> = subjects.entries().collect();
        Self {
            subject: entries.iter().map(|e| e.label().to_string()).collect(),
            difficulty: entries.iter().map(|e| e.difficulty.value()).collect(),
            urgency: entries.iter().map(|e| e.urgency.value()).collect(),
            total_hours: fields.requested_hours(),
            study_start_time: fields.study_start_time.map(|t| t.to_string()),
            study_end_time: fields.study_end_time.map(|t| t.to_string()),
            break_frequency: fields.break_frequency,
            max_breaks: fields.max_breaks,
            total_break_time: fields.total_break_time,
            break_duration: fields.break_duration,
            note: fields.note.clone(),
        }
    }

    /// Number of subjects carried
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.subject.len()
    }

    /// Ordered `(name, value)` pairs as a browser would post them
    ///
    /// Array fields repeat their key once per subject; unset optional fields
    /// are sent as empty strings.
    #[must_use]
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.subject.len() * 3 + FormField::ALL.len());
        for ((subject, difficulty), urgency) in self
            .subject
            .iter()
            .zip(&self.difficulty)
            .zip(&self.urgency)
        {
            pairs.push(("subject[]".to_string(), subject.clone()));
            pairs.push(("difficulty[]".to_string(), difficulty.to_string()));
            pairs.push(("urgency[]".to_string(), urgency.to_string()));
        }
        for field in FormField::ALL {
            pairs.push((field.name().to_string(), self.scalar(field)));
        }
        pairs
    }

    fn scalar(&self, field: FormField) -> String {
        match field {
            FormField::TotalHours => self.total_hours.to_string(),
            FormField::StudyStartTime => self.study_start_time.clone().unwrap_or_default(),
            FormField::StudyEndTime => self.study_end_time.clone().unwrap_or_default(),
            FormField::BreakFrequency => self.break_frequency.to_string(),
            FormField::BreakDuration => self.break_duration.to_string(),
            FormField::MaxBreaks => self.max_breaks.map_or_else(String::new, |v| v.to_string()),
            FormField::TotalBreakTime => {
                self.total_break_time.map_or_else(String::new, |v| v.to_string())
            }
            FormField::Note => self.note.clone(),
        }
    }

    /// `application/x-www-form-urlencoded` body, e.g. `subject%5B%5D=Calculus&...`
    #[must_use]
    pub fn to_urlencoded(&self) -> String {
        self.to_form_pairs()
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// JSON rendering of the payload
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
