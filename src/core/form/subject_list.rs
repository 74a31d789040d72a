//! Ordered, editable list of subject entries

use super::events::EntryId;
use crate::core::models::{EntryWeight, Rating, SubjectEntry};

/// Pluralized count text: `"1 subject"`, `"0 subjects"`, `"2 subjects"`
#[must_use]
pub fn count_label(count: usize) -> String {
    if count == 1 {
        format!("{count} subject")
    } else {
        format!("{count} subjects")
    }
}

/// The form's subject rows in insertion order
///
/// Entries are addressed by the [`EntryId`] returned from [`add`](Self::add).
/// The seed the list was created from is kept so [`reset`](Self::reset) can
/// rebuild the initial rows.
#[derive(Debug, Clone)]
pub struct SubjectList {
    entries: Vec<(EntryId, SubjectEntry)>,
    seed: Vec<SubjectEntry>,
    next_id: u64,
}

impl SubjectList {
    /// Build the initial rows: one per seed item, or a single blank row when
    /// the seed is empty
    #[must_use]
    pub fn new(seed: Vec<SubjectEntry>) -> Self {
        let mut list = Self {
            entries: Vec::new(),
            seed,
            next_id: 0,
        };
        list.initialize();
        list
    }

    fn initialize(&mut self) {
        if self.seed.is_empty() {
            self.push(SubjectEntry::blank());
        } else {
            let seed = self.seed.clone();
            for entry in seed {
                self.push(entry);
            }
        }
    }

    fn push(&mut self, entry: SubjectEntry) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, entry));
        id
    }

    /// Append an entry and return its handle
    pub fn add(&mut self, subject: &str, difficulty: Rating, urgency: Rating) -> EntryId {
        self.push(SubjectEntry::new(subject, difficulty, urgency))
    }

    /// Append a blank entry rated 3/3
    pub fn add_blank(&mut self) -> EntryId {
        self.push(SubjectEntry::blank())
    }

    /// Remove an entry, returning it. Unknown ids leave the list untouched.
    pub fn remove(&mut self, id: EntryId) -> Option<SubjectEntry> {
        let pos = self.position(id)?;
        Some(self.entries.remove(pos).1)
    }

    /// Drop every entry and rebuild the initial rows from the seed
    ///
    /// Returns the ids of the rows that were dropped. New rows get fresh ids.
    pub fn reset(&mut self) -> Vec<EntryId> {
        let removed = self.ids().collect();
        self.entries.clear();
        self.initialize();
        removed
    }

    /// Recompute the weight of one entry from its current ratings
    #[must_use]
    pub fn update_weight(&self, id: EntryId) -> Option<EntryWeight> {
        self.get(id).map(SubjectEntry::weight)
    }

    /// Replace an entry's label. Returns `false` for unknown ids.
    pub fn set_subject(&mut self, id: EntryId, subject: &str) -> bool {
        let Some(entry) = self.get_mut(id) else {
            return false;
        };
        subject.clone_into(&mut entry.subject);
        true
    }

    /// Change an entry's difficulty and return its new weight
    pub fn set_difficulty(&mut self, id: EntryId, difficulty: Rating) -> Option<EntryWeight> {
        let entry = self.get_mut(id)?;
        entry.difficulty = difficulty;
        Some(entry.weight())
    }

    /// Change an entry's urgency and return its new weight
    pub fn set_urgency(&mut self, id: EntryId, urgency: Rating) -> Option<EntryWeight> {
        let entry = self.get_mut(id)?;
        entry.urgency = urgency;
        Some(entry.weight())
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|(entry_id, _)| *entry_id == id)
    }

    /// Look up an entry
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&SubjectEntry> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, entry)| entry)
    }

    fn get_mut(&mut self, id: EntryId) -> Option<&mut SubjectEntry> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, entry)| entry)
    }

    /// Whether `id` refers to a current entry
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        self.position(id).is_some()
    }

    /// Entries with their ids, in order
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &SubjectEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Ids in order
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Entries in order, without ids
    pub fn entries(&self) -> impl Iterator<Item = &SubjectEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// The seed used for initialization and reset
    #[must_use]
    pub fn seed(&self) -> &[SubjectEntry] {
        &self.seed
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count text for the current length
    #[must_use]
    pub fn count_label(&self) -> String {
        count_label(self.len())
    }
}
