//! Typed form events and the synchronous bus that delivers them

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Handle for one subject entry, issued by the subject list and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub(crate) u64);

impl Serialize for EntryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry-{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("entry-")
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Self)
            .ok_or_else(|| format!("Invalid entry id: '{s}'"))
    }
}

/// Editable column of a subject entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryField {
    /// Subject label
    Subject,
    /// Difficulty rating
    Difficulty,
    /// Urgency rating
    Urgency,
}

/// Scalar form field, named after its submitted key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// `total_hours`
    TotalHours,
    /// `study_start_time`
    StudyStartTime,
    /// `study_end_time`
    StudyEndTime,
    /// `break_frequency`
    BreakFrequency,
    /// `break_duration`
    BreakDuration,
    /// `max_breaks`
    MaxBreaks,
    /// `total_break_time`
    TotalBreakTime,
    /// `note`
    Note,
}

impl FormField {
    /// Every scalar field, in submission order
    pub const ALL: [Self; 8] = [
        Self::TotalHours,
        Self::StudyStartTime,
        Self::StudyEndTime,
        Self::BreakFrequency,
        Self::MaxBreaks,
        Self::TotalBreakTime,
        Self::BreakDuration,
        Self::Note,
    ];

    /// Submitted field name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TotalHours => "total_hours",
            Self::StudyStartTime => "study_start_time",
            Self::StudyEndTime => "study_end_time",
            Self::BreakFrequency => "break_frequency",
            Self::BreakDuration => "break_duration",
            Self::MaxBreaks => "max_breaks",
            Self::TotalBreakTime => "total_break_time",
            Self::Note => "note",
        }
    }

    /// Look a field up by its submitted name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Fields whose change affects the time-window warning
    #[must_use]
    pub const fn affects_time_window(self) -> bool {
        matches!(
            self,
            Self::TotalHours | Self::StudyStartTime | Self::StudyEndTime
        )
    }

    /// Fields whose change affects the break suggestion
    #[must_use]
    pub const fn affects_breaks(self) -> bool {
        matches!(self, Self::BreakFrequency | Self::BreakDuration)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any field that can carry an invalid marker or emit a change event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    /// A column of one subject entry
    Entry(EntryId, EntryField),
    /// A scalar form field
    Form(FormField),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry(id, EntryField::Subject) => write!(f, "{id}.subject"),
            Self::Entry(id, EntryField::Difficulty) => write!(f, "{id}.difficulty"),
            Self::Entry(id, EntryField::Urgency) => write!(f, "{id}.urgency"),
            Self::Form(field) => write!(f, "{field}"),
        }
    }
}

/// Something the user did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormEvent {
    /// A subject entry was appended
    EntryAdded(EntryId),
    /// A subject entry was removed
    EntryRemoved(EntryId),
    /// A field value changed
    FieldChanged(Field),
}

type Handler = Box<dyn FnMut(&FormEvent)>;

/// Registered event handlers, called in registration order
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Handler>,
}

impl EventBus {
    /// Create a bus with no handlers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every subsequent event
    pub fn subscribe(&mut self, handler: impl FnMut(&FormEvent) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Deliver `event` to every handler before returning
    pub fn dispatch(&mut self, event: &FormEvent) {
        for handler in &mut self.handlers {
            handler(event);
        }
    }

    /// Number of registered handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_reaches_handlers_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |event| seen.borrow_mut().push((tag, *event)));
        }

        let event = FormEvent::EntryAdded(EntryId(7));
        bus.dispatch(&event);

        assert_eq!(bus.len(), 2);
        assert_eq!(*seen.borrow(), vec![("first", event), ("second", event)]);
    }

    #[test]
    fn test_form_field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_name(field.name()), Some(field));
        }
        assert_eq!(FormField::from_name("subject[]"), None);
    }

    #[test]
    fn test_field_display() {
        let field = Field::Entry(EntryId(3), EntryField::Subject);
        assert_eq!(field.to_string(), "entry-3.subject");
        assert_eq!(Field::Form(FormField::TotalHours).to_string(), "total_hours");
    }

    #[test]
    fn test_entry_id_parses_its_display() {
        assert_eq!("entry-12".parse::<EntryId>(), Ok(EntryId(12)));
        assert!("12".parse::<EntryId>().is_err());
        assert!("entry-x".parse::<EntryId>().is_err());
    }
}
