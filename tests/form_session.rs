//! End-to-end tests for the study form session

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;
use study_planner::core::feasibility::{
    available_hours, check_time_constraint, validate_required_fields,
};
use study_planner::core::form::{
    count_label, EntryField, Field, FormEvent, FormField, FormFields, FormInput, FormPhase,
    FormSession, PresenterUpdate, RecordingPresenter, SubmitError,
};
use study_planner::core::models::{
    sample_subjects, EntryWeight, Rating, SubjectEntry, TimeOfDay, WeightBand,
};
use tempfile::NamedTempFile;

fn rating(v: u8) -> Rating {
    Rating::new(v).expect("rating in range")
}

fn time(raw: &str) -> Option<TimeOfDay> {
    Some(raw.parse().expect("valid time"))
}

fn new_session(seed: Vec<SubjectEntry>) -> FormSession<RecordingPresenter> {
    FormSession::new(seed, FormFields::default(), RecordingPresenter::new())
        .with_submit_delay(Duration::ZERO)
}

fn form_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(body.as_bytes())
        .expect("Failed to write form file");
    file
}

#[test]
fn every_rating_pair_has_weight_and_monotonic_band() {
    let mut previous: Option<(u8, WeightBand)> = None;
    let mut pairs: Vec<EntryWeight> = Rating::all()
        .flat_map(|d| Rating::all().map(move |u| EntryWeight::of(d, u)))
        .collect();
    assert_eq!(pairs.len(), 25);
    pairs.sort_by_key(|w| w.weight);

    for weight in pairs {
        assert!((2..=10).contains(&weight.weight));
        if let Some((prev_weight, prev_band)) = previous {
            assert!(prev_weight <= weight.weight);
            assert!(prev_band <= weight.band);
        }
        previous = Some((weight.weight, weight.band));
    }
}

#[test]
fn band_boundaries() {
    assert_eq!(EntryWeight::of(rating(1), rating(2)).band, WeightBand::Low);
    assert_eq!(EntryWeight::of(rating(2), rating(2)).band, WeightBand::Medium);
    assert_eq!(EntryWeight::of(rating(3), rating(3)).band, WeightBand::Medium);
    assert_eq!(EntryWeight::of(rating(3), rating(4)).band, WeightBand::High);
}

#[test]
fn count_labels() {
    assert_eq!(count_label(0), "0 subjects");
    assert_eq!(count_label(1), "1 subject");
    assert_eq!(count_label(2), "2 subjects");
}

#[test]
fn time_window_examples() {
    assert_eq!(available_hours(time("09:00"), time("17:00")), Some(8.0));
    assert_eq!(available_hours(time("22:00"), time("06:00")), Some(8.0));
    assert_eq!(available_hours(None, time("17:00")), None);
    assert_eq!(available_hours(time("10:00"), time("10:00")), Some(24.0));

    let warning = check_time_constraint(10.0, time("09:00"), time("17:00"))
        .expect("10 hours should not fit an 8 hour window");
    assert_eq!(
        warning.to_string(),
        "Time Constraint: You've requested 10 hours of study, but your time window (09:00 - 17:00) only allows 8.0 hours. The system will automatically adjust your schedule."
    );
    assert!(check_time_constraint(6.0, time("09:00"), time("17:00")).is_none());
}

#[test]
fn required_field_examples() {
    let report = validate_required_fields(std::iter::empty::<&str>(), Some(2.0));
    assert!(report.no_subjects);
    assert!(!report.is_valid());

    let report = validate_required_fields([""], Some(2.0));
    assert_eq!(report.blank_subjects, vec![0]);

    let report = validate_required_fields(["Math"], Some(0.2));
    assert!(report.total_hours_invalid);
    assert!(!report.is_valid());
}

#[test]
fn events_arrive_after_presenter_updates() {
    let mut session = new_session(sample_subjects());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.subscribe(move |event| sink.borrow_mut().push(*event));

    let id = session.add_blank_subject();
    session.set_subject_label(id, "Music");
    session.set_difficulty(id, rating(5));
    session.set_field(FormField::Note, "exam week");
    session.remove_subject(id);

    assert_eq!(
        *seen.borrow(),
        vec![
            FormEvent::EntryAdded(id),
            FormEvent::FieldChanged(Field::Entry(id, EntryField::Subject)),
            FormEvent::FieldChanged(Field::Entry(id, EntryField::Difficulty)),
            FormEvent::FieldChanged(Field::Form(FormField::Note)),
            FormEvent::EntryRemoved(id),
        ]
    );
    assert!(session
        .presenter()
        .updates()
        .contains(&PresenterUpdate::EntryRemoved { id }));
}

#[test]
fn unknown_entry_edits_are_ignored() {
    let mut session = new_session(Vec::new());
    let id = session.add_blank_subject();
    session.remove_subject(id);

    assert!(session.remove_subject(id).is_none());
    assert!(!session.set_subject_label(id, "Ghost"));
    assert!(!session.set_urgency(id, rating(1)));
    assert_eq!(session.subjects().len(), 1);
}

#[test]
fn phase_walks_through_lifecycle() {
    let mut session = new_session(sample_subjects());
    assert_eq!(session.phase(), FormPhase::Pristine);

    session.set_field(FormField::TotalHours, "0.25");
    assert_eq!(session.phase(), FormPhase::Editing);

    assert!(session.submit().is_err());
    assert_eq!(session.phase(), FormPhase::Invalid);
    assert!(session.is_marked(Field::Form(FormField::TotalHours)));

    session.set_field(FormField::TotalHours, "0.5");
    assert_eq!(session.phase(), FormPhase::Editing);
    assert!(!session.is_marked(Field::Form(FormField::TotalHours)));

    assert!(session.submit().is_ok());
    assert_eq!(session.phase(), FormPhase::Valid);
}

#[test]
fn reset_restores_initial_state_exactly() {
    let mut session = new_session(Vec::new());
    let initial: Vec<SubjectEntry> = session.subjects().entries().cloned().collect();
    let first = session.subjects().ids().next().expect("one blank entry");

    session.set_subject_label(first, "Draft");
    session.add_subject("Another", rating(1), rating(1));
    session.reset();

    let after: Vec<SubjectEntry> = session.subjects().entries().cloned().collect();
    assert_eq!(after, initial);
    assert_eq!(after, vec![SubjectEntry::blank()]);
    assert_eq!(session.presenter().subject_count_label(), Some("1 subject"));
}

#[test]
fn form_file_round_trip_to_payload() {
    let file = form_file(
        r#"
total_hours = 9
study_start_time = "22:00"
study_end_time = "06:00"
break_frequency = "minimal"
break_duration = 20
note = "finals"

[[subject]]
subject = "  Organic Chemistry  "
difficulty = 5
urgency = 4

[[subject]]
subject = "Poetry"
difficulty = 2
urgency = 1
"#,
    );

    let input = FormInput::load(file.path()).expect("form file should parse");
    let mut session = new_session(sample_subjects());
    input.apply_to(&mut session);

    assert_eq!(session.available_hours(), Some(8.0));
    assert!(session.time_warning().is_some());
    assert_eq!(
        session.presenter().break_placeholders(),
        Some(("2-4 (suggested)", "40-80 min"))
    );

    let submission = session.submit().expect("warning must not block");
    let payload = submission.payload;
    assert_eq!(payload.subject, ["Organic Chemistry", "Poetry"]);
    assert_eq!(payload.difficulty, [5, 2]);
    assert_eq!(payload.urgency, [4, 1]);
    assert_eq!(payload.study_start_time.as_deref(), Some("22:00"));
    assert_eq!(payload.break_duration, 20);
    assert_eq!(payload.note, "finals");
}

#[test]
fn form_file_with_empty_subject_list_is_blocked() {
    let file = form_file("total_hours = 3\nsubject = []\n");
    let input = FormInput::load(file.path()).expect("form file should parse");
    let mut session = new_session(sample_subjects());
    input.apply_to(&mut session);

    assert!(session.subjects().is_empty());
    let SubmitError::Invalid(report) = session.submit().expect_err("no subjects");
    assert!(report.no_subjects);
    assert!(report.blank_subjects.is_empty());
}

#[test]
fn submission_waits_for_delay_before_transport() {
    let mut session = FormSession::new(
        sample_subjects(),
        FormFields::default(),
        RecordingPresenter::new(),
    )
    .with_submit_delay(Duration::from_millis(20));
    session.set_field(FormField::TotalHours, "4");

    let submission = session.submit().expect("valid form");
    let started = std::time::Instant::now();
    let count = submission.dispatch(|payload| payload.subject_count());
    assert!(started.elapsed() >= Duration::from_millis(20));
    assert_eq!(count, 3);
}
