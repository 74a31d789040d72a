//! Presenter that keeps the latest display state for terminal output

use study_planner::core::feasibility::{BreakSuggestion, TimeWarning};
use study_planner::core::form::{EntryId, Field, Presenter};
use study_planner::core::models::EntryWeight;
use study_planner::verbose;
use std::collections::{BTreeMap, BTreeSet};

/// Latest derived values, echoed live when verbose output is on
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    /// Subject count text
    pub count_label: String,
    /// Weight per live entry
    pub weights: BTreeMap<EntryId, EntryWeight>,
    /// Time-window warning text
    pub warning: Option<String>,
    /// `(max_breaks, total_break_time)` placeholders
    pub placeholders: (String, String),
    /// Fields currently marked invalid
    pub invalid: BTreeSet<Field>,
    /// Blocking notices, oldest first
    pub notices: Vec<String>,
}

impl Presenter for TerminalPresenter {
    fn subject_count(&mut self, label: &str) {
        verbose!("  · {label}");
        label.clone_into(&mut self.count_label);
    }

    fn entry_weight(&mut self, id: EntryId, weight: EntryWeight) {
        verbose!("  · {id} weight {} ({})", weight.weight, weight.band);
        self.weights.insert(id, weight);
    }

    fn entry_removed(&mut self, id: EntryId) {
        verbose!("  · {id} removed");
        self.weights.remove(&id);
    }

    fn time_warning(&mut self, warning: Option<&TimeWarning>) {
        self.warning = warning.map(ToString::to_string);
    }

    fn break_suggestion(&mut self, suggestion: &BreakSuggestion) {
        self.placeholders = (
            suggestion.max_breaks_placeholder(),
            suggestion.total_break_time_placeholder(),
        );
    }

    fn field_marker(&mut self, field: Field, invalid: bool) {
        if invalid {
            self.invalid.insert(field);
        } else {
            self.invalid.remove(&field);
        }
    }

    fn blocking_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
