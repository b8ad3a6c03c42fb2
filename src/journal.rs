// 📝 Journal Service
// Entry creation path: classify when no sentiment was supplied, then store

use crate::entry::{parse_day, Entry, NewEntry};
use crate::error::JournalResult;
use crate::sentiment::SentimentScorer;
use crate::store::{EntryDraft, EntryStore};
use crate::trends::{summarize, window_start, MoodTrends};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

pub struct Journal {
    scorer: SentimentScorer,
    store: Arc<dyn EntryStore>,
}

impl Journal {
    pub fn new(scorer: SentimentScorer, store: Arc<dyn EntryStore>) -> Self {
        Journal { scorer, store }
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    /// Save an entry. A caller-supplied sentiment is kept as-is; otherwise
    /// the entry text is classified. The stored label never changes afterwards.
    pub fn record(&self, new_entry: NewEntry) -> JournalResult<Entry> {
        let sentiment = match new_entry.sentiment {
            Some(sentiment) => sentiment,
            None => {
                let sentiment = self.scorer.classify(&new_entry.journal_entry);
                debug!(%sentiment, "classified journal entry");
                sentiment
            }
        };

        self.store.create_entry(EntryDraft {
            mood: new_entry.mood,
            journal_entry: new_entry.journal_entry,
            sentiment,
            date: new_entry.date.unwrap_or_else(Utc::now),
        })
    }

    pub fn entries(&self) -> JournalResult<Vec<Entry>> {
        self.store.entries()
    }

    /// Entries on a `YYYY-MM-DD` day (UTC)
    pub fn entries_on(&self, day: &str) -> JournalResult<Vec<Entry>> {
        self.store.entries_on(parse_day(day)?)
    }

    pub fn trends(&self, days: u32) -> JournalResult<MoodTrends> {
        self.trends_at(days, Utc::now())
    }

    pub fn trends_at(&self, days: u32, now: DateTime<Utc>) -> JournalResult<MoodTrends> {
        let entries = self.store.entries_since(window_start(now, days))?;
        let recent: Vec<Entry> = entries.into_iter().filter(|e| e.date <= now).collect();
        Ok(summarize(&recent, days))
    }
}
