//! WASM bindings exported to JavaScript/TypeScript
//!
//! `StudyForm` wraps a session whose presenter records every display update.
//! The page drains those updates with [`StudyForm::take_updates`] after each
//! call and applies them to the DOM. Entry handles cross the boundary as their
//! `entry-N` string form.

use crate::core::form::{
    EntryId, FormField, FormFields, FormSession, RecordingPresenter, SubmissionPayload,
    DEFAULT_SUBMIT_DELAY,
};
use crate::core::models::{sample_subjects, Rating, SubjectEntry};
use crate::get_version;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Returns the current `StudyPlanner` version for the WASM build.
#[wasm_bindgen]
pub fn get_wasm_version() -> String {
    format!("StudyPlanner WASM v{}", get_version())
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

fn parse_id(id: &str) -> Result<EntryId, JsValue> {
    id.parse().map_err(js_error)
}

fn parse_rating(value: u8) -> Result<Rating, JsValue> {
    Rating::try_from(value).map_err(js_error)
}

#[derive(Serialize)]
struct EntryView<'a> {
    id: String,
    #[serde(flatten)]
    entry: &'a SubjectEntry,
    weight: u8,
    band: &'static str,
    class: &'static str,
}

#[derive(Serialize)]
struct SubmissionView<'a> {
    payload: &'a SubmissionPayload,
    delay_ms: u64,
}

/// One study form bound to a page
#[wasm_bindgen]
pub struct StudyForm {
    session: FormSession<RecordingPresenter>,
}

#[wasm_bindgen]
impl StudyForm {
    /// Form seeded with the built-in sample subjects
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(sample_subjects())
    }

    /// Form seeded from a JSON array of `{subject, difficulty, urgency}`
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a rating is out of range
    #[wasm_bindgen(js_name = fromSeedJson)]
    pub fn from_seed_json(json: &str) -> Result<StudyForm, JsValue> {
        let seed: Vec<SubjectEntry> = serde_json::from_str(json).map_err(js_error)?;
        Ok(Self::with_seed(seed))
    }

    /// Append a subject and return its handle
    ///
    /// # Errors
    /// Returns an error if a rating is outside 1-5
    #[wasm_bindgen(js_name = addSubject)]
    pub fn add_subject(&mut self, subject: &str, difficulty: u8, urgency: u8) -> Result<String, JsValue> {
        let id = self
            .session
            .add_subject(subject, parse_rating(difficulty)?, parse_rating(urgency)?);
        Ok(id.to_string())
    }

    /// Append a blank subject rated 3/3 and return its handle
    #[wasm_bindgen(js_name = addBlankSubject)]
    pub fn add_blank_subject(&mut self) -> String {
        self.session.add_blank_subject().to_string()
    }

    /// Remove a subject; `false` when the handle is unknown
    ///
    /// # Errors
    /// Returns an error if `id` is not an entry handle
    #[wasm_bindgen(js_name = removeSubject)]
    pub fn remove_subject(&mut self, id: &str) -> Result<bool, JsValue> {
        Ok(self.session.remove_subject(parse_id(id)?).is_some())
    }

    /// Edit a subject label
    ///
    /// # Errors
    /// Returns an error if `id` is not an entry handle
    #[wasm_bindgen(js_name = setSubjectLabel)]
    pub fn set_subject_label(&mut self, id: &str, subject: &str) -> Result<bool, JsValue> {
        Ok(self.session.set_subject_label(parse_id(id)?, subject))
    }

    /// Edit a subject difficulty
    ///
    /// # Errors
    /// Returns an error if `id` is not an entry handle or the rating is outside 1-5
    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, id: &str, difficulty: u8) -> Result<bool, JsValue> {
        Ok(self
            .session
            .set_difficulty(parse_id(id)?, parse_rating(difficulty)?))
    }

    /// Edit a subject urgency
    ///
    /// # Errors
    /// Returns an error if `id` is not an entry handle or the rating is outside 1-5
    #[wasm_bindgen(js_name = setUrgency)]
    pub fn set_urgency(&mut self, id: &str, urgency: u8) -> Result<bool, JsValue> {
        Ok(self.session.set_urgency(parse_id(id)?, parse_rating(urgency)?))
    }

    /// Store a raw value typed into the field named `name` (e.g. `total_hours`)
    ///
    /// # Errors
    /// Returns an error if `name` is not a form field
    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), JsValue> {
        let field = FormField::from_name(name)
            .ok_or_else(|| js_error(format!("Unknown form field: '{name}'")))?;
        self.session.set_field(field, value);
        Ok(())
    }

    /// Rebuild the subject list from its seed
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Display updates since the last call, as a JSON array
    ///
    /// # Errors
    /// Returns an error if serialization fails
    #[wasm_bindgen(js_name = takeUpdates)]
    pub fn take_updates(&mut self) -> Result<String, JsValue> {
        let updates = self.session.presenter_mut().drain();
        to_json(&updates)
    }

    /// Current rows with derived weights, as a JSON array
    ///
    /// # Errors
    /// Returns an error if serialization fails
    #[wasm_bindgen(js_name = subjectsJson)]
    pub fn subjects_json(&self) -> Result<String, JsValue> {
        let rows: Vec<EntryView<'_>> = self
            .session
            .subjects()
            .iter()
            .map(|(id, entry)| {
                let weight = entry.weight();
                EntryView {
                    id: id.to_string(),
                    entry,
                    weight: weight.weight,
                    band: weight.band.as_str(),
                    class: weight.band.css_class(),
                }
            })
            .collect();
        to_json(&rows)
    }

    /// Lifecycle phase: `pristine`, `editing`, `valid` or `invalid`
    #[must_use]
    pub fn phase(&self) -> String {
        self.session.phase().to_string()
    }

    /// Run the blocking checks and return the report as JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn validate(&mut self) -> Result<String, JsValue> {
        let report = self.session.validate();
        to_json(&report)
    }

    /// Validate and return `{payload, delay_ms}` as JSON
    ///
    /// The page waits `delay_ms` before posting. Threads cannot sleep in the
    /// browser, so the delay is reported rather than awaited.
    ///
    /// # Errors
    /// Returns the blocking problems when the form is not ready
    pub fn submit(&mut self) -> Result<String, JsValue> {
        let submission = self.session.submit().map_err(js_error)?;
        to_json(&SubmissionView {
            payload: &submission.payload,
            delay_ms: u64::try_from(submission.delay.as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Default pause before posting, in milliseconds
    #[wasm_bindgen(js_name = submitDelayMs)]
    #[must_use]
    pub fn submit_delay_ms() -> u32 {
        u32::try_from(DEFAULT_SUBMIT_DELAY.as_millis()).unwrap_or(u32::MAX)
    }
}

impl StudyForm {
    fn with_seed(seed: Vec<SubjectEntry>) -> Self {
        Self {
            session: FormSession::new(seed, FormFields::default(), RecordingPresenter::new()),
        }
    }
}

impl Default for StudyForm {
    fn default() -> Self {
        Self::new()
    }
}
