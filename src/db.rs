// 🗄️ SQLite Entry Store
// WAL-backed persistence for journal entries + idempotent CSV import

use crate::entry::{parse_day, Entry, Mood};
use crate::error::{JournalError, JournalResult};
use crate::sentiment::{Sentiment, SentimentScorer};
use crate::store::{EntryDraft, EntryStore};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, Row};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

const ENTRY_COLUMNS: &str = "id, mood, journal_entry, sentiment, date";

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Entries Table
    // import_hash is only set for imported rows (NULLs never collide)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            import_hash TEXT UNIQUE,
            mood TEXT NOT NULL,
            journal_entry TEXT NOT NULL,
            sentiment TEXT NOT NULL,
            date TEXT NOT NULL,
            day TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute("CREATE INDEX IF NOT EXISTS idx_entries_day ON entries(day)", [])?;
    conn.execute("CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date)", [])?;

    Ok(())
}

/// Fixed-width RFC 3339 so lexical order matches chronological order
fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

fn conversion_error(idx: usize, err: JournalError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<Entry> {
    let mood: String = row.get(1)?;
    let sentiment: String = row.get(3)?;
    let date: String = row.get(4)?;

    Ok(Entry {
        id: row.get(0)?,
        mood: mood.parse::<Mood>().map_err(|e| conversion_error(1, e))?,
        journal_entry: row.get(2)?,
        sentiment: sentiment.parse::<Sentiment>().map_err(|e| conversion_error(3, e))?,
        date: DateTime::parse_from_rfc3339(&date)
            .map_err(|_| conversion_error(4, JournalError::InvalidDate(date.clone())))?
            .with_timezone(&Utc),
    })
}

// ============================================================================
// SQLITE STORE
// ============================================================================

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open database {:?}", path.as_ref()))?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        setup_database(&conn).context("Failed to set up database schema")?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    fn insert(&self, draft: &EntryDraft, import_hash: Option<&str>) -> rusqlite::Result<i64> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());

        conn.execute(
            "INSERT INTO entries (import_hash, mood, journal_entry, sentiment, date, day)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                import_hash,
                draft.mood.name(),
                draft.journal_entry,
                draft.sentiment.name(),
                format_timestamp(&draft.date),
                format_day(draft.date.date_naive()),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn query(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> JournalResult<Vec<Entry>> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let mut stmt = conn.prepare(sql)?;

        let entries = stmt
            .query_map(args, row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    pub fn count(&self) -> JournalResult<i64> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert imported rows, classifying those without a sentiment.
    /// Rows already imported (same date, mood and text) are skipped.
    pub fn import_rows(&self, scorer: &SentimentScorer, rows: &[ImportRow]) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (index, row) in rows.iter().enumerate() {
            let draft = row
                .to_draft(scorer)
                .with_context(|| format!("Invalid import row {}", index + 1))?;
            let hash = row.compute_idempotency_hash();

            match self.insert(&draft, Some(hash.as_str())) {
                Ok(_) => summary.inserted += 1,
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    summary.duplicates += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            "imported journal entries"
        );

        Ok(summary)
    }
}

impl EntryStore for SqliteStore {
    fn create_entry(&self, draft: EntryDraft) -> JournalResult<Entry> {
        // Timestamps are stored with microsecond precision
        let draft = EntryDraft {
            date: draft.date.trunc_subsecs(6),
            ..draft
        };
        let id = self.insert(&draft, None)?;
        debug!(id, mood = %draft.mood, sentiment = %draft.sentiment, "stored entry");
        Ok(draft.into_entry(id))
    }

    fn entries(&self) -> JournalResult<Vec<Entry>> {
        self.query(
            &format!("SELECT {ENTRY_COLUMNS} FROM entries ORDER BY date DESC, id DESC"),
            &[],
        )
    }

    fn entries_on(&self, day: NaiveDate) -> JournalResult<Vec<Entry>> {
        self.query(
            &format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE day = ?1 ORDER BY date DESC, id DESC"),
            &[&format_day(day)],
        )
    }

    fn entries_since(&self, since: DateTime<Utc>) -> JournalResult<Vec<Entry>> {
        self.query(
            &format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE date >= ?1 ORDER BY date DESC, id DESC"),
            &[&format_timestamp(&since)],
        )
    }
}

// ============================================================================
// CSV IMPORT
// ============================================================================

/// One CSV row: `date,mood,journal_entry[,sentiment]`
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRow {
    pub date: String,
    pub mood: String,
    pub journal_entry: String,
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl ImportRow {
    /// Hash of the row's content, used to skip re-imports
    pub fn compute_idempotency_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!(
            "{}|{}|{}",
            self.date.trim(),
            self.mood.trim().to_lowercase(),
            self.journal_entry
        ));
        format!("{:x}", hasher.finalize())
    }

    /// Dates may be `YYYY-MM-DD` (stored at midnight UTC) or RFC 3339
    fn parse_date(&self) -> JournalResult<DateTime<Utc>> {
        let raw = self.date.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Ok(date.with_timezone(&Utc));
        }

        let day = parse_day(raw)?;
        Ok(day
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| JournalError::InvalidDate(raw.to_string()))?
            .and_utc())
    }

    pub fn to_draft(&self, scorer: &SentimentScorer) -> JournalResult<EntryDraft> {
        let sentiment = match self.sentiment.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.parse::<Sentiment>()?,
            _ => scorer.classify(&self.journal_entry),
        };

        Ok(EntryDraft {
            mood: self.mood.parse::<Mood>()?,
            journal_entry: self.journal_entry.clone(),
            sentiment,
            date: self.parse_date()?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicates: usize,
}

pub fn load_csv(csv_path: &Path) -> Result<Vec<ImportRow>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: ImportRow = result.context("Failed to deserialize journal entry")?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn draft(day: u32, hour: u32, mood: Mood, text: &str, sentiment: Sentiment) -> EntryDraft {
        EntryDraft {
            mood,
            journal_entry: text.to_string(),
            sentiment,
            date: Utc.with_ymd_and_hms(2024, 12, day, hour, 0, 0).unwrap(),
        }
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_create_and_list() {
        let store = SqliteStore::in_memory().unwrap();

        let saved = store
            .create_entry(draft(30, 9, Mood::Happy, "Great run", Sentiment::Positive))
            .unwrap();
        store
            .create_entry(draft(31, 9, Mood::Tired, "Long day", Sentiment::Neutral))
            .unwrap();

        assert_eq!(saved.id, 1);
        assert_eq!(store.count().unwrap(), 2);

        let entries = store.entries().unwrap();
        assert_eq!(entries[0].journal_entry, "Long day");
        assert_eq!(entries[1], saved);
    }

    #[test]
    fn test_entries_on_and_since() {
        let store = SqliteStore::in_memory().unwrap();
        store.create_entry(draft(29, 23, Mood::Sad, "a", Sentiment::Negative)).unwrap();
        store.create_entry(draft(30, 1, Mood::Angry, "b", Sentiment::Negative)).unwrap();
        store.create_entry(draft(30, 20, Mood::Happy, "c", Sentiment::Positive)).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let on_day = store.entries_on(day).unwrap();
        assert_eq!(on_day.len(), 2);
        assert_eq!(on_day[0].journal_entry, "c");

        let since = Utc.with_ymd_and_hms(2024, 12, 30, 0, 0, 0).unwrap();
        assert_eq!(store.entries_since(since).unwrap().len(), 2);
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.create_entry(draft(1, 8, Mood::Neutral, "ok", Sentiment::Neutral)).unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }

    #[test]
    fn test_created_entry_matches_stored_row() {
        let store = SqliteStore::in_memory().unwrap();
        let date = Utc.timestamp_opt(1_735_000_000, 123_456_789).unwrap();
        let mut entry = draft(1, 8, Mood::Happy, "good day", Sentiment::Positive);
        entry.date = date;

        let saved = store.create_entry(entry).unwrap();

        assert_eq!(saved.date, Utc.timestamp_opt(1_735_000_000, 123_456_000).unwrap());
        assert_eq!(store.entries().unwrap()[0], saved);
    }

    #[test]
    fn test_import_classifies_missing_sentiment() {
        let file = write_csv(
            "date,mood,journal_entry,sentiment\n\
             2024-12-01,Happy,I am so happy today,\n\
             2024-12-02,Sad,I feel lonely and sad,Neutral\n",
        );
        let rows = load_csv(file.path()).unwrap();
        let store = SqliteStore::in_memory().unwrap();

        let summary = store.import_rows(&SentimentScorer::default(), &rows).unwrap();
        assert_eq!(summary, ImportSummary { inserted: 2, duplicates: 0 });

        let entries = store.entries().unwrap();
        assert_eq!(entries[0].sentiment, Sentiment::Neutral); // supplied label kept
        assert_eq!(entries[1].sentiment, Sentiment::Positive);
        assert_eq!(entries[1].day(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }

    #[test]
    fn test_import_twice_is_idempotent() {
        let file = write_csv(
            "date,mood,journal_entry\n\
             2024-12-01T08:00:00Z,Tired,Didn't sleep well\n\
             2024-12-02,Neutral,Just a normal day\n",
        );
        let rows = load_csv(file.path()).unwrap();
        let store = SqliteStore::in_memory().unwrap();
        let scorer = SentimentScorer::default();

        let first = store.import_rows(&scorer, &rows).unwrap();
        let second = store.import_rows(&scorer, &rows).unwrap();

        assert_eq!(first.inserted, 2);
        assert_eq!(second, ImportSummary { inserted: 0, duplicates: 2 });
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_import_rejects_bad_mood() {
        let file = write_csv("date,mood,journal_entry\n2024-12-01,Bored,meh\n");
        let rows = load_csv(file.path()).unwrap();
        let store = SqliteStore::in_memory().unwrap();

        let err = store.import_rows(&SentimentScorer::default(), &rows).unwrap_err();
        assert!(err.to_string().contains("Invalid import row 1"));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_compute_idempotency_hash() {
        let row = ImportRow {
            date: "2024-12-01".to_string(),
            mood: "Happy".to_string(),
            journal_entry: "Nice".to_string(),
            sentiment: None,
        };
        let same = ImportRow {
            mood: "happy".to_string(),
            ..row.clone()
        };
        let different = ImportRow {
            journal_entry: "Nice!".to_string(),
            ..row.clone()
        };

        assert_eq!(row.compute_idempotency_hash(), same.compute_idempotency_hash());
        assert_ne!(row.compute_idempotency_hash(), different.compute_idempotency_hash());
        assert_eq!(row.compute_idempotency_hash().len(), 64);
    }
}
