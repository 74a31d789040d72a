//! Outbound display updates
//!
//! The session never renders anything itself. After each change it pushes the
//! affected derived values to a [`Presenter`], which is the only collaborator
//! that knows about the page, terminal, or whatever else displays the form.

use super::events::{EntryId, Field};
use crate::core::feasibility::{BreakSuggestion, TimeWarning};
use crate::core::models::EntryWeight;
use serde::Serialize;

/// Receiver for derived display values
pub trait Presenter {
    /// Subject count text, e.g. `"3 subjects"`
    fn subject_count(&mut self, label: &str);

    /// Weight display for one entry
    fn entry_weight(&mut self, id: EntryId, weight: EntryWeight);

    /// An entry's row should disappear
    fn entry_removed(&mut self, _id: EntryId) {}

    /// Time-window warning, `None` to hide it
    fn time_warning(&mut self, warning: Option<&TimeWarning>);

    /// Break placeholders changed
    fn break_suggestion(&mut self, suggestion: &BreakSuggestion);

    /// Invalid marker set (`true`) or cleared (`false`) on a field
    fn field_marker(&mut self, _field: Field, _invalid: bool) {}

    /// Blocking notice that is not tied to a single field
    fn blocking_notice(&mut self, _message: &str) {}
}

/// One call made on a [`RecordingPresenter`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresenterUpdate {
    /// See [`Presenter::subject_count`]
    SubjectCount {
        /// Count text
        label: String,
    },
    /// See [`Presenter::entry_weight`]
    EntryWeight {
        /// Entry
        id: EntryId,
        /// Derived weight
        weight: EntryWeight,
    },
    /// See [`Presenter::entry_removed`]
    EntryRemoved {
        /// Entry
        id: EntryId,
    },
    /// See [`Presenter::time_warning`]
    TimeWarning {
        /// Warning text, `None` when hidden
        message: Option<String>,
    },
    /// See [`Presenter::break_suggestion`]
    BreakSuggestion {
        /// Max-breaks placeholder
        max_breaks: String,
        /// Total-break-time placeholder
        total_break_time: String,
    },
    /// See [`Presenter::field_marker`]
    FieldMarker {
        /// Field
        field: Field,
        /// Marker state
        invalid: bool,
    },
    /// See [`Presenter::blocking_notice`]
    BlockingNotice {
        /// Notice text
        message: String,
    },
}

/// Presenter that keeps every update, for tests and the WASM bridge
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    updates: Vec<PresenterUpdate>,
}

impl RecordingPresenter {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates received so far, oldest first
    #[must_use]
    pub fn updates(&self) -> &[PresenterUpdate] {
        &self.updates
    }

    /// Take and clear the recorded updates
    pub fn drain(&mut self) -> Vec<PresenterUpdate> {
        std::mem::take(&mut self.updates)
    }

    /// Latest subject count text
    #[must_use]
    pub fn subject_count_label(&self) -> Option<&str> {
        self.updates.iter().rev().find_map(|update| match update {
            PresenterUpdate::SubjectCount { label } => Some(label.as_str()),
            _ => None,
        })
    }

    /// Latest weight shown for `id`
    #[must_use]
    pub fn weight_of(&self, id: EntryId) -> Option<EntryWeight> {
        self.updates.iter().rev().find_map(|update| match update {
            PresenterUpdate::EntryWeight { id: shown, weight } if *shown == id => Some(*weight),
            _ => None,
        })
    }

    /// Latest time warning state: `Some(None)` means the warning was hidden
    #[must_use]
    pub fn time_warning(&self) -> Option<Option<&str>> {
        self.updates.iter().rev().find_map(|update| match update {
            PresenterUpdate::TimeWarning { message } => Some(message.as_deref()),
            _ => None,
        })
    }

    /// Latest break placeholders as `(max_breaks, total_break_time)`
    #[must_use]
    pub fn break_placeholders(&self) -> Option<(&str, &str)> {
        self.updates.iter().rev().find_map(|update| match update {
            PresenterUpdate::BreakSuggestion {
                max_breaks,
                total_break_time,
            } => Some((max_breaks.as_str(), total_break_time.as_str())),
            _ => None,
        })
    }

    /// Latest marker state of `field`
    #[must_use]
    pub fn marker_of(&self, field: Field) -> Option<bool> {
        self.updates.iter().rev().find_map(|update| match update {
            PresenterUpdate::FieldMarker {
                field: marked,
                invalid,
            } if *marked == field => Some(*invalid),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn subject_count(&mut self, label: &str) {
        self.updates.push(PresenterUpdate::SubjectCount {
            label: label.to_string(),
        });
    }

    fn entry_weight(&mut self, id: EntryId, weight: EntryWeight) {
        self.updates.push(PresenterUpdate::EntryWeight { id, weight });
    }

    fn entry_removed(&mut self, id: EntryId) {
        self.updates.push(PresenterUpdate::EntryRemoved { id });
    }

    fn time_warning(&mut self, warning: Option<&TimeWarning>) {
        self.updates.push(PresenterUpdate::TimeWarning {
            message: warning.map(ToString::to_string),
        });
    }

    fn break_suggestion(&mut self, suggestion: &BreakSuggestion) {
        self.updates.push(PresenterUpdate::BreakSuggestion {
            max_breaks: suggestion.max_breaks_placeholder(),
            total_break_time: suggestion.total_break_time_placeholder(),
        });
    }

    fn field_marker(&mut self, field: Field, invalid: bool) {
        self.updates
            .push(PresenterUpdate::FieldMarker { field, invalid });
    }

    fn blocking_notice(&mut self, message: &str) {
        self.updates.push(PresenterUpdate::BlockingNotice {
            message: message.to_string(),
        });
    }
}
