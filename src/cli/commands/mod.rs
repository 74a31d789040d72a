//! CLI command handlers for `StudyPlanner`.
//!
//! Each command is implemented in its own submodule. `check` and `submit`
//! share [`open_form`], which seeds a session from the config and replays the
//! form file into it.

pub mod check;
pub mod config;
pub mod sample;
pub mod submit;
pub mod terminal;

use std::path::Path;
use std::time::Duration;
use study_planner::config::Config;
use study_planner::core::form::{
    load_seed, FormField, FormFields, FormInput, FormSession, DEFAULT_SUBMIT_DELAY,
};
use study_planner::core::models::{sample_subjects, SubjectEntry};
use study_planner::{info, warn};
use terminal::TerminalPresenter;

/// Seed rows from `form.sample_file`, or the built-in sample when unset or unreadable
pub fn seed_subjects(config: &Config) -> Vec<SubjectEntry> {
    if config.form.sample_file.is_empty() {
        return sample_subjects();
    }
    match load_seed(&config.form.sample_file) {
        Ok(seed) => {
            info!("Seed subjects loaded from {}", config.form.sample_file);
            seed
        }
        Err(e) => {
            warn!("{e}; using built-in sample subjects");
            sample_subjects()
        }
    }
}

fn initial_fields(config: &Config) -> FormFields {
    let mut fields = FormFields::default();
    let defaults = [
        (FormField::StudyStartTime, config.form.default_start_time.clone()),
        (FormField::StudyEndTime, config.form.default_end_time.clone()),
        (
            FormField::BreakDuration,
            config
                .form
                .default_break_duration
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ),
    ];
    for (field, value) in defaults {
        if let Err(e) = fields.apply(field, &value) {
            warn!("Config default ignored: {e}");
        }
    }
    fields
}

/// Start a session from the configured defaults and replay `form` into it
///
/// # Errors
/// Returns a printable message if the form file cannot be read or parsed
pub fn open_form(form: &Path, config: &Config) -> Result<FormSession<TerminalPresenter>, String> {
    let input = FormInput::load(form).map_err(|e| format!("✗ {e}"))?;
    let delay = config
        .form
        .submit_delay_ms
        .map_or(DEFAULT_SUBMIT_DELAY, Duration::from_millis);

    let mut session = FormSession::new(
        seed_subjects(config),
        initial_fields(config),
        TerminalPresenter::default(),
    )
    .with_submit_delay(delay);
    input.apply_to(&mut session);
    info!("Form loaded: {}", form.display());
    Ok(session)
}
