//! Check command handler

use super::open_form;
use super::terminal::TerminalPresenter;
use std::path::Path;
use study_planner::config::Config;
use study_planner::core::form::{FormField, FormSession};
use study_planner::error;

/// Load a form file, print its derived state, and run the blocking checks.
///
/// Returns the process exit code: `0` when the form could be submitted,
/// `1` when it is blocked or could not be loaded.
pub fn run(form: &Path, config: &Config, verbose: bool) -> i32 {
    let mut session = match open_form(form, config) {
        Ok(session) => session,
        Err(e) => {
            error!("Check failed for {}: {e}", form.display());
            eprintln!("{e}");
            return 1;
        }
    };

    print_summary(&session, verbose);

    let report = session.validate();
    if report.is_valid() {
        println!("\n✓ Ready to submit");
        0
    } else {
        println!("\n✗ Submission blocked:");
        for problem in report.problems() {
            println!("  - {problem}");
        }
        1
    }
}

fn print_summary(session: &FormSession<TerminalPresenter>, verbose: bool) {
    let presenter = session.presenter();
    println!("\n=== Study Form ({}) ===\n", presenter.count_label);

    for (pos, (id, entry)) in session.subjects().iter().enumerate() {
        let label = if entry.has_label() {
            entry.label()
        } else {
            "(unnamed)"
        };
        let weight = presenter.weights.get(&id).copied().unwrap_or_else(|| entry.weight());
        println!(
            "{:>3}. {label:<24} weight {:>2} ({})",
            pos + 1,
            weight.weight,
            weight.band
        );
        if verbose {
            println!(
                "     difficulty {}, urgency {}",
                entry.difficulty.difficulty_label(),
                entry.urgency.urgency_label()
            );
        }
    }

    let fields = session.fields();
    println!();
    match session.available_hours() {
        Some(hours) => println!(
            "Time window: {} - {} ({hours:.1} h available)",
            fields.value_of(FormField::StudyStartTime),
            fields.value_of(FormField::StudyEndTime)
        ),
        None => println!("Time window: not set"),
    }
    println!(
        "Total hours: {}",
        fields
            .total_hours
            .map_or_else(|| "not set".to_string(), |h| h.to_string())
    );
    let (max_breaks, total_break_time) = &presenter.placeholders;
    println!(
        "Breaks: {} every {} min (max {max_breaks}, total {total_break_time})",
        fields.break_frequency, fields.break_duration
    );

    if let Some(warning) = &presenter.warning {
        println!("\n⚠ {warning}");
    }
}
