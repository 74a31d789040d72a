//! Blocking checks run when the form is submitted

use serde::Serialize;

/// Smallest total study time the form accepts, in hours
pub const MIN_TOTAL_HOURS: f64 = 0.5;

/// Notice shown when the subject list is empty
pub const NO_SUBJECTS_MESSAGE: &str = "Please add at least one subject!";

/// Outcome of [`validate_required_fields`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Positions (in list order) of subjects with a blank label
    pub blank_subjects: Vec<usize>,
    /// Total hours missing or below [`MIN_TOTAL_HOURS`]
    pub total_hours_invalid: bool,
    /// The subject list is empty
    pub no_subjects: bool,
}

impl ValidationReport {
    /// `true` when nothing blocks submission
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.blank_subjects.is_empty() && !self.total_hours_invalid && !self.no_subjects
    }

    /// Human-readable list of problems, one per line item
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.no_subjects {
            problems.push(NO_SUBJECTS_MESSAGE.to_string());
        }
        problems.extend(
            self.blank_subjects
                .iter()
                .map(|pos| format!("Subject #{} needs a name", pos + 1)),
        );
        if self.total_hours_invalid {
            problems.push(format!(
                "Total hours must be at least {MIN_TOTAL_HOURS}"
            ));
        }
        problems
    }
}

/// Whether a total-hours value passes the required-field check
#[must_use]
pub fn total_hours_ok(total_hours: Option<f64>) -> bool {
    total_hours.is_some_and(|hours| hours >= MIN_TOTAL_HOURS)
}

/// Check that every subject is named, hours are present, and at least one subject exists.
///
/// `subjects` yields raw labels in list order. Never panics; `NaN` hours are invalid.
pub fn validate_required_fields<'a, I>(subjects: I, total_hours: Option<f64>) -> ValidationReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut count = 0usize;
    let mut blank_subjects = Vec::new();
    for (pos, label) in subjects.into_iter().enumerate() {
        count += 1;
        if label.trim().is_empty() {
            blank_subjects.push(pos);
        }
    }

    ValidationReport {
        blank_subjects,
        total_hours_invalid: !total_hours_ok(total_hours),
        no_subjects: count == 0,
    }
}
