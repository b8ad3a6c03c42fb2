// 🗃️ Entry Stores - Persistence Collaborator
// Trait consumed by the journal, plus an in-memory implementation

use crate::entry::{Entry, Mood};
use crate::error::JournalResult;
use crate::sentiment::Sentiment;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Mutex;

/// A classified entry ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub mood: Mood,
    pub journal_entry: String,
    pub sentiment: Sentiment,
    pub date: DateTime<Utc>,
}

impl EntryDraft {
    pub fn into_entry(self, id: i64) -> Entry {
        Entry {
            id,
            mood: self.mood,
            journal_entry: self.journal_entry,
            sentiment: self.sentiment,
            date: self.date,
        }
    }
}

/// Key-based CRUD over journal entries
///
/// Listing methods return entries newest first.
pub trait EntryStore: Send + Sync {
    fn create_entry(&self, draft: EntryDraft) -> JournalResult<Entry>;

    fn entries(&self) -> JournalResult<Vec<Entry>>;

    fn entries_on(&self, day: NaiveDate) -> JournalResult<Vec<Entry>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|entry| entry.day() == day)
            .collect())
    }

    fn entries_since(&self, since: DateTime<Utc>) -> JournalResult<Vec<Entry>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|entry| entry.date >= since)
            .collect())
    }
}

/// Newest first, ties broken by id
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntryStore for MemoryStore {
    fn create_entry(&self, draft: EntryDraft) -> JournalResult<Entry> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let entry = draft.into_entry(id);
        entries.push(entry.clone());
        Ok(entry)
    }

    fn entries(&self) -> JournalResult<Vec<Entry>> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone();
        sort_newest_first(&mut entries);
        Ok(entries)
    }
}
