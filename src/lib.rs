// Serene Journal - Core Library
// Exposes all modules for use in the CLI, API server, and tests

pub mod error;
pub mod lexicon;    // Keyword lexicons as data
pub mod sentiment;  // Rule-based sentiment scorer
pub mod entry;      // Moods and journal entry records
pub mod store;      // EntryStore trait + in-memory store
pub mod db;         // SQLite store + CSV import
pub mod trends;     // Mood/sentiment trend summaries
pub mod journal;    // Entry creation path
pub mod config;     // TOML configuration

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{JournalError, JournalResult};
pub use lexicon::{Lexicon, LexiconEntry, PhraseBoost, Polarity};
pub use sentiment::{adaptive_threshold, ScoringMode, Sentiment, SentimentScore, SentimentScorer};
pub use entry::{parse_day, Entry, Mood, NewEntry};
pub use store::{EntryDraft, EntryStore, MemoryStore};
pub use db::{load_csv, setup_database, ImportRow, ImportSummary, SqliteStore};
pub use trends::{summarize, DailyMood, MoodTrends};
pub use journal::Journal;
pub use config::{AppConfig, ClientPolicy, StorageBackend};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Classify text with the reference weighted lexicon
pub fn classify(text: &str) -> Sentiment {
    SentimentScorer::default().classify(text)
}
