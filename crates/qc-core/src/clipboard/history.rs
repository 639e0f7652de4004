//! In-memory clipboard history.
//!
//! Ordered most-recent-first. Insertion order is the only ordering signal.
//! No two entries ever share a normalized key: inserts are rejected on
//! collision and edits that would collide fail.

use std::collections::HashSet;

use thiserror::Error;

use crate::ids::EntryId;

use super::entry::ClipboardEntry;
use super::normalize::normalize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no history entry matches the given text or id")]
    NotFound,

    #[error("entry text must not be empty")]
    EmptyText,

    #[error("another history entry already holds equivalent text")]
    DuplicateText,
}

/// Result of offering a captured text to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Placed at the front of the history.
    Inserted,
    /// An entry with the same normalized text already exists.
    Duplicate,
    /// Empty text is never recorded.
    Empty,
}

impl CaptureOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, CaptureOutcome::Inserted)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<ClipboardEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from persisted entries, repairing invariant
    /// violations: empty texts are dropped and, for each normalized key,
    /// only the first (most recent) entry is kept.
    pub fn from_entries(entries: Vec<ClipboardEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| !entry.text.is_empty())
            .filter(|entry| seen.insert(entry.normalized()))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ClipboardEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn newest(&self) -> Option<&ClipboardEntry> {
        self.entries.first()
    }

    /// Whether any entry normalizes to the same key as `text`.
    pub fn contains_equivalent(&self, text: &str) -> bool {
        let key = normalize(text);
        self.entries.iter().any(|entry| entry.normalized() == key)
    }

    pub fn insert(&mut self, entry: ClipboardEntry) -> CaptureOutcome {
        if entry.text.is_empty() {
            return CaptureOutcome::Empty;
        }
        if self.contains_equivalent(&entry.text) {
            return CaptureOutcome::Duplicate;
        }
        self.entries.insert(0, entry);
        CaptureOutcome::Inserted
    }

    /// Exact, non-normalized match on the stored text.
    pub fn find_by_text(&self, text: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.text == text)
    }

    pub fn find_by_id(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&ClipboardEntry> {
        self.entries.get(index)
    }

    /// Replace the text of the first entry whose text equals `old_text`.
    /// Position, id and timestamp are kept. Returns the entry's index.
    pub fn update(&mut self, old_text: &str, new_text: &str) -> Result<usize, HistoryError> {
        let index = self.find_by_text(old_text).ok_or(HistoryError::NotFound)?;
        self.replace_text(index, new_text)?;
        Ok(index)
    }

    pub fn update_by_id(&mut self, id: &EntryId, new_text: &str) -> Result<usize, HistoryError> {
        let index = self.find_by_id(id).ok_or(HistoryError::NotFound)?;
        self.replace_text(index, new_text)?;
        Ok(index)
    }

    fn replace_text(&mut self, index: usize, new_text: &str) -> Result<(), HistoryError> {
        if new_text.is_empty() {
            return Err(HistoryError::EmptyText);
        }
        let key = normalize(new_text);
        let collides = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, entry)| i != index && entry.normalized() == key);
        if collides {
            return Err(HistoryError::DuplicateText);
        }
        self.entries[index].text = new_text.to_string();
        Ok(())
    }

    /// Drop the oldest entries beyond `max`. Returns how many were removed.
    pub fn truncate_to(&mut self, max: usize) -> usize {
        let removed = self.entries.len().saturating_sub(max);
        self.entries.truncate(max);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, ts: &str) -> ClipboardEntry {
        ClipboardEntry::new(text, ts)
    }

    fn texts(history: &History) -> Vec<&str> {
        history.entries().iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn inserting_same_text_twice_keeps_one_entry() {
        let mut history = History::new();

        assert_eq!(history.insert(entry("Hello", "ts1")), CaptureOutcome::Inserted);
        assert_eq!(history.insert(entry("Hello", "ts2")), CaptureOutcome::Duplicate);

        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].timestamp, "ts1");
    }

    #[test]
    fn whitespace_and_case_variant_is_rejected_and_first_raw_form_kept() {
        let mut history = History::new();
        history.insert(entry("Hello", "ts1"));

        let outcome = history.insert(entry("  hello  ", "ts2"));

        assert_eq!(outcome, CaptureOutcome::Duplicate);
        assert_eq!(texts(&history), vec!["Hello"]);
    }

    #[test]
    fn duplicate_of_older_entry_is_rejected_not_only_newest() {
        let mut history = History::new();
        history.insert(entry("A", "ts1"));
        history.insert(entry("B", "ts2"));

        assert_eq!(history.insert(entry("a", "ts3")), CaptureOutcome::Duplicate);
        assert_eq!(texts(&history), vec!["B", "A"]);
    }

    #[test]
    fn most_recent_first_matches_insertion_order() {
        let mut history = History::new();
        for text in ["one", "two", "three", "four"] {
            history.insert(entry(text, ""));
        }

        assert_eq!(texts(&history), vec!["four", "three", "two", "one"]);
    }

    #[test]
    fn empty_text_is_never_inserted() {
        let mut history = History::new();
        assert_eq!(history.insert(entry("", "ts")), CaptureOutcome::Empty);
        assert!(history.is_empty());
    }

    #[test]
    fn find_by_text_is_exact() {
        let mut history = History::new();
        history.insert(entry("Hello", ""));

        assert_eq!(history.find_by_text("Hello"), Some(0));
        assert_eq!(history.find_by_text("hello"), None);
        assert_eq!(history.find_by_text(" Hello"), None);
    }

    #[test]
    fn update_keeps_position_timestamp_and_id() {
        let mut history = History::new();
        history.insert(entry("A", "ts1"));
        history.insert(entry("B", "ts2"));
        let id_before = history.entries()[1].id.clone();

        let index = history.update("A", "A-edited").unwrap();

        assert_eq!(index, 1);
        assert_eq!(texts(&history), vec!["B", "A-edited"]);
        assert_eq!(history.entries()[1].timestamp, "ts1");
        assert_eq!(history.entries()[1].id, id_before);
        assert_eq!(history.entries()[0].timestamp, "ts2");
    }

    #[test]
    fn update_of_missing_text_fails_without_mutation() {
        let mut history = History::new();
        history.insert(entry("A", "ts1"));
        let before = history.clone();

        assert_eq!(history.update("Z", "new"), Err(HistoryError::NotFound));
        assert_eq!(history, before);
    }

    #[test]
    fn update_rejects_text_equivalent_to_another_entry() {
        let mut history = History::new();
        history.insert(entry("A", ""));
        history.insert(entry("B", ""));
        let before = history.clone();

        assert_eq!(history.update("A", " b "), Err(HistoryError::DuplicateText));
        assert_eq!(history, before);
    }

    #[test]
    fn update_may_change_only_whitespace_of_same_entry() {
        let mut history = History::new();
        history.insert(entry("A", ""));

        assert_eq!(history.update("A", " a "), Ok(0));
        assert_eq!(texts(&history), vec![" a "]);
    }

    #[test]
    fn update_rejects_empty_text() {
        let mut history = History::new();
        history.insert(entry("A", ""));

        assert_eq!(history.update("A", ""), Err(HistoryError::EmptyText));
    }

    #[test]
    fn update_by_id_targets_entry_regardless_of_text() {
        let mut history = History::new();
        history.insert(entry("A", "ts1"));
        let id = history.entries()[0].id.clone();

        assert_eq!(history.update_by_id(&id, "changed"), Ok(0));
        assert_eq!(history.entries()[0].text, "changed");
        assert_eq!(
            history.update_by_id(&EntryId::from("missing"), "x"),
            Err(HistoryError::NotFound)
        );
    }

    #[test]
    fn from_entries_drops_duplicates_and_empty_texts() {
        let history = History::from_entries(vec![
            entry("New", "ts3"),
            entry("", "ts2"),
            entry(" new ", "ts1"),
            entry("Old", "ts0"),
        ]);

        assert_eq!(texts(&history), vec!["New", "Old"]);
    }

    #[test]
    fn truncate_drops_oldest() {
        let mut history = History::new();
        for text in ["1", "2", "3"] {
            history.insert(entry(text, ""));
        }

        assert_eq!(history.truncate_to(2), 1);
        assert_eq!(texts(&history), vec!["3", "2"]);
        assert_eq!(history.truncate_to(5), 0);
    }
}
