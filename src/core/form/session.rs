//! Form session: owns the subject list and fields, runs recomputation after
//! every user action, and gates submission on validation
//!
//! Lifecycle: `Pristine` until the first edit, `Editing` after any change,
//! then `Valid` or `Invalid` after a submission attempt. Editing a field clears
//! its invalid marker immediately; full validation only runs on submit.

use super::events::{EntryField, EntryId, EventBus, Field, FormEvent, FormField};
use super::fields::FormFields;
use super::payload::SubmissionPayload;
use super::presenter::Presenter;
use super::subject_list::SubjectList;
use crate::core::feasibility::{
    available_hours, check_time_constraint, suggest_breaks, validate_required_fields,
    BreakSuggestion, TimeWarning, ValidationReport, NO_SUBJECTS_MESSAGE,
};
use crate::core::models::{Rating, SubjectEntry};
use crate::{debug, info};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// Pause between a successful submit and the handoff to the transport
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(500);

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    /// Nothing edited yet
    Pristine,
    /// Edited since creation or the last submission attempt
    Editing,
    /// Last submission attempt passed validation
    Valid,
    /// Last submission attempt was blocked
    Invalid,
}

impl FormPhase {
    /// Lowercase phase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pristine => "pristine",
            Self::Editing => "editing",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a submission attempt produced no payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A required field is missing or the subject list is empty
    Invalid(ValidationReport),
}

impl SubmitError {
    /// The failed validation
    #[must_use]
    pub const fn report(&self) -> &ValidationReport {
        match self {
            Self::Invalid(report) => report,
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(report) => write!(
                f,
                "Form is not ready to submit: {}",
                report.problems().join("; ")
            ),
        }
    }
}

impl std::error::Error for SubmitError {}

/// A validated payload waiting for its handoff delay
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Values to post
    pub payload: SubmissionPayload,
    /// Pause before handing off
    pub delay: Duration,
}

impl Submission {
    /// Wait out the delay, then pass the payload to `transport`
    pub fn dispatch<R>(self, transport: impl FnOnce(SubmissionPayload) -> R) -> R {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        transport(self.payload)
    }
}

/// Interactive state of one study form
pub struct FormSession<P: Presenter> {
    subjects: SubjectList,
    fields: FormFields,
    invalid: BTreeSet<Field>,
    phase: FormPhase,
    bus: EventBus,
    presenter: P,
    submit_delay: Duration,
}

impl<P: Presenter> FormSession<P> {
    /// Start a session from a seed list and initial field values
    ///
    /// The presenter immediately receives the initial weights, count, break
    /// suggestion and time-window state.
    pub fn new(seed: Vec<SubjectEntry>, fields: FormFields, presenter: P) -> Self {
        let mut session = Self {
            subjects: SubjectList::new(seed),
            fields,
            invalid: BTreeSet::new(),
            phase: FormPhase::Pristine,
            bus: EventBus::new(),
            presenter,
            submit_delay: DEFAULT_SUBMIT_DELAY,
        };
        session.present_all();
        debug!(
            "Form session started with {}",
            session.subjects.count_label()
        );
        session
    }

    /// Replace the handoff delay
    #[must_use]
    pub const fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    /// Register a handler for every subsequent [`FormEvent`]
    pub fn subscribe(&mut self, handler: impl FnMut(&FormEvent) + 'static) {
        self.bus.subscribe(handler);
    }

    fn present_all(&mut self) {
        for (id, entry) in self.subjects.iter() {
            self.presenter.entry_weight(id, entry.weight());
        }
        self.presenter.subject_count(&self.subjects.count_label());
        self.present_breaks();
        self.present_time_window();
    }

    fn present_breaks(&mut self) {
        let suggestion = self.break_suggestion();
        self.presenter.break_suggestion(&suggestion);
    }

    fn present_time_window(&mut self) {
        let warning = self.time_warning();
        self.presenter.time_warning(warning.as_ref());
    }

    fn touch(&mut self, event: FormEvent) {
        self.phase = FormPhase::Editing;
        self.bus.dispatch(&event);
    }

    fn clear_marker(&mut self, field: Field) {
        if self.invalid.remove(&field) {
            self.presenter.field_marker(field, false);
        }
    }

    fn drop_entry_markers(&mut self, id: EntryId) {
        let stale: Vec<Field> = self
            .invalid
            .iter()
            .filter(|field| matches!(field, Field::Entry(entry, _) if *entry == id))
            .copied()
            .collect();
        for field in stale {
            self.invalid.remove(&field);
        }
    }

    /// Append a subject and return its handle
    pub fn add_subject(&mut self, subject: &str, difficulty: Rating, urgency: Rating) -> EntryId {
        let id = self.subjects.add(subject, difficulty, urgency);
        debug!("Added subject {id} ({})", self.subjects.count_label());
        if let Some(weight) = self.subjects.update_weight(id) {
            self.presenter.entry_weight(id, weight);
        }
        self.presenter.subject_count(&self.subjects.count_label());
        self.touch(FormEvent::EntryAdded(id));
        id
    }

    /// Append a blank subject rated 3/3
    pub fn add_blank_subject(&mut self) -> EntryId {
        self.add_subject("", Rating::DEFAULT, Rating::DEFAULT)
    }

    /// Remove a subject. Unknown ids are ignored and return `None`.
    pub fn remove_subject(&mut self, id: EntryId) -> Option<SubjectEntry> {
        let removed = self.subjects.remove(id)?;
        debug!("Removed subject {id} ({})", self.subjects.count_label());
        self.drop_entry_markers(id);
        self.presenter.entry_removed(id);
        self.presenter.subject_count(&self.subjects.count_label());
        self.touch(FormEvent::EntryRemoved(id));
        Some(removed)
    }

    /// Remove every subject, leaving the list empty
    pub fn clear_subjects(&mut self) {
        let ids: Vec<EntryId> = self.subjects.ids().collect();
        for id in ids {
            self.remove_subject(id);
        }
    }

    /// Edit a subject's label. Returns `false` for unknown ids.
    pub fn set_subject_label(&mut self, id: EntryId, subject: &str) -> bool {
        if !self.subjects.set_subject(id, subject) {
            return false;
        }
        let field = Field::Entry(id, EntryField::Subject);
        self.clear_marker(field);
        self.touch(FormEvent::FieldChanged(field));
        true
    }

    /// Edit a subject's difficulty. Returns `false` for unknown ids.
    pub fn set_difficulty(&mut self, id: EntryId, difficulty: Rating) -> bool {
        let Some(weight) = self.subjects.set_difficulty(id, difficulty) else {
            return false;
        };
        self.presenter.entry_weight(id, weight);
        self.touch(FormEvent::FieldChanged(Field::Entry(id, EntryField::Difficulty)));
        true
    }

    /// Edit a subject's urgency. Returns `false` for unknown ids.
    pub fn set_urgency(&mut self, id: EntryId, urgency: Rating) -> bool {
        let Some(weight) = self.subjects.set_urgency(id, urgency) else {
            return false;
        };
        self.presenter.entry_weight(id, weight);
        self.touch(FormEvent::FieldChanged(Field::Entry(id, EntryField::Urgency)));
        true
    }

    /// Store a raw value typed into a scalar field and refresh what depends on it
    ///
    /// Unparsable input is logged and treated as described on
    /// [`FormFields::apply`]; it never fails the call.
    pub fn set_field(&mut self, field: FormField, raw: &str) {
        if let Err(problem) = self.fields.apply(field, raw) {
            debug!("{problem}");
        }
        self.clear_marker(Field::Form(field));
        if field.affects_breaks() {
            self.present_breaks();
        }
        if field.affects_time_window() {
            self.present_time_window();
        }
        self.touch(FormEvent::FieldChanged(Field::Form(field)));
    }

    /// Rebuild the subject list from its seed, discarding every subject edit
    pub fn reset(&mut self) {
        let dropped = self.subjects.reset();
        for id in &dropped {
            self.drop_entry_markers(*id);
            self.presenter.entry_removed(*id);
            self.bus.dispatch(&FormEvent::EntryRemoved(*id));
        }
        let added: Vec<EntryId> = self.subjects.ids().collect();
        for id in added {
            if let Some(weight) = self.subjects.update_weight(id) {
                self.presenter.entry_weight(id, weight);
            }
            self.bus.dispatch(&FormEvent::EntryAdded(id));
        }
        self.presenter.subject_count(&self.subjects.count_label());
        self.phase = FormPhase::Editing;
        debug!("Subject list reset ({})", self.subjects.count_label());
    }

    /// Run the blocking checks, mark offending fields, and record the outcome
    pub fn validate(&mut self) -> ValidationReport {
        let report = validate_required_fields(
            self.subjects.entries().map(|entry| entry.subject.as_str()),
            self.fields.total_hours,
        );

        let ids: Vec<EntryId> = self.subjects.ids().collect();
        let mut marked: BTreeSet<Field> = report
            .blank_subjects
            .iter()
            .filter_map(|pos| ids.get(*pos))
            .map(|id| Field::Entry(*id, EntryField::Subject))
            .collect();
        if report.total_hours_invalid {
            marked.insert(Field::Form(FormField::TotalHours));
        }

        let cleared: Vec<Field> = self.invalid.difference(&marked).copied().collect();
        for field in cleared {
            self.presenter.field_marker(field, false);
        }
        for field in &marked {
            self.presenter.field_marker(*field, true);
        }
        if report.no_subjects {
            self.presenter.blocking_notice(NO_SUBJECTS_MESSAGE);
        }
        self.invalid = marked;

        if report.is_valid() {
            self.phase = FormPhase::Valid;
            info!("Form valid with {}", self.subjects.count_label());
        } else {
            self.phase = FormPhase::Invalid;
            info!("Form blocked: {}", report.problems().join("; "));
        }
        report
    }

    /// Validate and, if nothing blocks, produce the payload for handoff
    ///
    /// # Errors
    /// Returns [`SubmitError`] when a required field is missing or the subject
    /// list is empty. The time-window warning never blocks.
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(SubmitError::Invalid(report));
        }
        if let Some(warning) = self.time_warning() {
            info!("Submitting despite advisory: {warning}");
        }
        Ok(Submission {
            payload: SubmissionPayload::build(&self.subjects, &self.fields),
            delay: self.submit_delay,
        })
    }

    /// Hours available in the current window
    #[must_use]
    pub fn available_hours(&self) -> Option<f64> {
        available_hours(self.fields.study_start_time, self.fields.study_end_time)
    }

    /// Current time-window warning, if any
    #[must_use]
    pub fn time_warning(&self) -> Option<TimeWarning> {
        check_time_constraint(
            self.fields.requested_hours(),
            self.fields.study_start_time,
            self.fields.study_end_time,
        )
    }

    /// Current break suggestion
    #[must_use]
    pub const fn break_suggestion(&self) -> BreakSuggestion {
        suggest_breaks(self.fields.break_frequency, self.fields.break_duration)
    }

    /// The subject list
    #[must_use]
    pub const fn subjects(&self) -> &SubjectList {
        &self.subjects
    }

    /// The scalar fields
    #[must_use]
    pub const fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Lifecycle phase
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Fields currently marked invalid
    #[must_use]
    pub const fn invalid_fields(&self) -> &BTreeSet<Field> {
        &self.invalid
    }

    /// Whether `field` currently carries an invalid marker
    #[must_use]
    pub fn is_marked(&self, field: Field) -> bool {
        self.invalid.contains(&field)
    }

    /// The presentation adapter
    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable access to the presentation adapter
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// End the session and hand back the presenter
    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

impl<P: Presenter> fmt::Debug for FormSession<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("subjects", &self.subjects)
            .field("fields", &self.fields)
            .field("invalid", &self.invalid)
            .field("phase", &self.phase)
            .field("bus", &self.bus)
            .field("submit_delay", &self.submit_delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::presenter::{PresenterUpdate, RecordingPresenter};
    use crate::core::models::{sample_subjects, WeightBand};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rating(v: u8) -> Rating {
        Rating::new(v).unwrap()
    }

    fn session() -> FormSession<RecordingPresenter> {
        FormSession::new(sample_subjects(), FormFields::default(), RecordingPresenter::new())
            .with_submit_delay(Duration::ZERO)
    }

    #[test]
    fn test_new_session_presents_initial_state() {
        let session = session();
        let presenter = session.presenter();
        assert_eq!(session.phase(), FormPhase::Pristine);
        assert_eq!(presenter.subject_count_label(), Some("3 subjects"));
        assert_eq!(presenter.break_placeholders(), Some(("Auto", "Auto")));
        assert_eq!(presenter.time_warning(), Some(None));
        let first = session.subjects().ids().next().unwrap();
        assert_eq!(presenter.weight_of(first).map(|w| w.weight), Some(7));
    }

    #[test]
    fn test_add_and_remove_update_count_and_emit_events() {
        let mut session = session();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(move |event| sink.borrow_mut().push(*event));

        let id = session.add_subject("Biology", rating(2), rating(1));
        assert_eq!(session.presenter().subject_count_label(), Some("4 subjects"));
        assert_eq!(
            session.presenter().weight_of(id).map(|w| w.band),
            Some(WeightBand::Low)
        );
        assert_eq!(session.phase(), FormPhase::Editing);

        session.remove_subject(id);
        assert_eq!(session.presenter().subject_count_label(), Some("3 subjects"));
        assert_eq!(
            *events.borrow(),
            vec![FormEvent::EntryAdded(id), FormEvent::EntryRemoved(id)]
        );
    }

    #[test]
    fn test_rating_change_updates_weight() {
        let mut session = session();
        let id = session.subjects().ids().nth(2).unwrap();
        assert!(session.set_urgency(id, rating(5)));
        let weight = session.presenter().weight_of(id).unwrap();
        assert_eq!((weight.weight, weight.band), (10, WeightBand::High));
    }

    #[test]
    fn test_time_window_warning_appears_and_clears() {
        let mut session = session();
        session.set_field(FormField::StudyStartTime, "09:00");
        session.set_field(FormField::StudyEndTime, "17:00");
        session.set_field(FormField::TotalHours, "10");
        let shown = session.presenter().time_warning().flatten().map(str::to_string);
        assert!(shown.unwrap().contains("only allows 8.0 hours"));

        session.set_field(FormField::TotalHours, "6");
        assert_eq!(session.presenter().time_warning(), Some(None));
        assert!(session.time_warning().is_none());
    }

    #[test]
    fn test_break_suggestion_follows_fields() {
        let mut session = session();
        session.set_field(FormField::BreakFrequency, "frequent");
        assert_eq!(
            session.presenter().break_placeholders(),
            Some(("6-10 (suggested)", "90-150 min"))
        );
        session.set_field(FormField::BreakDuration, "10");
        assert_eq!(
            session.presenter().break_placeholders(),
            Some(("6-10 (suggested)", "60-100 min"))
        );
        session.set_field(FormField::BreakDuration, "abc");
        assert_eq!(
            session.presenter().break_placeholders(),
            Some(("6-10 (suggested)", "90-150 min"))
        );
    }

    #[test]
    fn test_submit_blocked_then_markers_clear_on_edit() {
        let mut session = session();
        let blank = session.add_blank_subject();
        session.set_field(FormField::TotalHours, "0.2");

        let err = session.submit().unwrap_err();
        assert_eq!(session.phase(), FormPhase::Invalid);
        assert_eq!(err.report().blank_subjects, vec![3]);
        assert!(err.report().total_hours_invalid);
        let label_field = Field::Entry(blank, EntryField::Subject);
        assert!(session.is_marked(label_field));
        assert_eq!(session.presenter().marker_of(label_field), Some(true));

        session.set_subject_label(blank, "Geography");
        assert!(!session.is_marked(label_field));
        assert_eq!(session.presenter().marker_of(label_field), Some(false));
        assert_eq!(session.phase(), FormPhase::Editing);

        session.set_field(FormField::TotalHours, "3");
        assert!(session.invalid_fields().is_empty());
        let submission = session.submit().unwrap();
        assert_eq!(session.phase(), FormPhase::Valid);
        assert_eq!(submission.payload.subject_count(), 4);
    }

    #[test]
    fn test_empty_list_blocks_with_notice() {
        let mut session = session();
        session.set_field(FormField::TotalHours, "2");
        session.clear_subjects();
        assert_eq!(session.presenter().subject_count_label(), Some("0 subjects"));

        let err = session.submit().unwrap_err();
        assert!(err.report().no_subjects);
        assert!(session
            .presenter()
            .updates()
            .contains(&PresenterUpdate::BlockingNotice {
                message: NO_SUBJECTS_MESSAGE.to_string()
            }));
    }

    #[test]
    fn test_time_warning_does_not_block() {
        let mut session = session();
        session.set_field(FormField::TotalHours, "12");
        session.set_field(FormField::StudyStartTime, "22:00");
        session.set_field(FormField::StudyEndTime, "06:00");
        assert!(session.time_warning().is_some());
        let submission = session.submit().unwrap();
        assert!((submission.payload.total_hours - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut session = session();
        let first = session.subjects().ids().next().unwrap();
        session.set_subject_label(first, "Linear Algebra");
        session.add_blank_subject();
        session.reset();

        let entries: Vec<SubjectEntry> = session.subjects().entries().cloned().collect();
        assert_eq!(entries, sample_subjects());
        assert_eq!(session.presenter().subject_count_label(), Some("3 subjects"));
        assert!(session.subjects().get(first).is_none());
    }

    #[test]
    fn test_dispatch_hands_payload_to_transport() {
        let mut session = session();
        session.set_field(FormField::TotalHours, "4");
        let submission = session.submit().unwrap();
        assert!(submission.delay.is_zero());
        let count = submission.dispatch(|payload| payload.subject.len());
        assert_eq!(count, 3);
    }

    #[test]
    fn test_submit_error_display_lists_problems() {
        let mut session = FormSession::new(Vec::new(), FormFields::default(), RecordingPresenter::new());
        let err = session.submit().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Subject #1 needs a name"));
        assert!(text.contains("Total hours must be at least 0.5"));
    }
}
