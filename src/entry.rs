// 📓 Journal Entries - Mood + Text + Sentiment
// Wire/storage records for journal entries and per-mood activity suggestions

use crate::error::JournalError;
use crate::sentiment::Sentiment;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// MOOD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Angry,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Neutral, Mood::Sad, Mood::Angry, Mood::Tired];

    pub fn name(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Tired => "Tired",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Sad => "😔",
            Mood::Angry => "😠",
            Mood::Tired => "😴",
        }
    }

    /// Suggested activities for someone reporting this mood
    pub fn activities(&self) -> [&'static str; 5] {
        match self {
            Mood::Happy => [
                "Share your happiness",
                "Practice gratitude",
                "Do something creative",
                "Compliment someone",
                "Try something new",
            ],
            Mood::Neutral => [
                "Take a short walk",
                "Read a book",
                "Listen to music",
                "Connect with a friend",
                "Try mindfulness",
            ],
            Mood::Sad => [
                "Practice self-care",
                "Take a walk outside",
                "Call a friend",
                "Listen to uplifting music",
                "Practice gratitude",
            ],
            Mood::Angry => [
                "Take deep breaths",
                "Write down your feelings",
                "Exercise",
                "Practice meditation",
                "Talk to someone",
            ],
            Mood::Tired => [
                "Take a power nap",
                "Drink some water",
                "Stretch your body",
                "Get some fresh air",
                "Listen to energizing music",
            ],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mood {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| JournalError::UnknownMood(s.to_string()))
    }
}

// ============================================================================
// ENTRY RECORDS
// ============================================================================

/// A saved journal entry. The sentiment is fixed once the entry is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i64,
    pub mood: Mood,
    pub journal_entry: String,
    pub sentiment: Sentiment,
    pub date: DateTime<Utc>,
}

impl Entry {
    /// Calendar day (UTC) the entry belongs to
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Entry as submitted by a caller, before it has an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub mood: Mood,
    pub journal_entry: String,

    /// Computed from `journal_entry` when absent
    #[serde(default)]
    pub sentiment: Option<Sentiment>,

    /// Defaults to now
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl NewEntry {
    pub fn new(mood: Mood, journal_entry: &str) -> Self {
        NewEntry {
            mood,
            journal_entry: journal_entry.to_string(),
            sentiment: None,
            date: None,
        }
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Parse a JSON request body into a new entry
    pub fn from_json(bytes: &[u8]) -> Result<Self, JournalError> {
        serde_json::from_slice(bytes).map_err(|e| JournalError::InvalidEntry(e.to_string()))
    }
}

/// Parse a `YYYY-MM-DD` path/query date
pub fn parse_day(value: &str) -> Result<NaiveDate, JournalError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| JournalError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mood_parse() {
        assert_eq!("happy".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!("TIRED".parse::<Mood>().unwrap(), Mood::Tired);
        assert!(matches!("Bored".parse::<Mood>(), Err(JournalError::UnknownMood(_))));
    }

    #[test]
    fn test_activities_per_mood() {
        for mood in Mood::ALL {
            assert_eq!(mood.activities().len(), 5);
        }
        assert_eq!(Mood::Angry.activities()[0], "Take deep breaths");
    }

    #[test]
    fn test_new_entry_json_camel_case() {
        let body = br#"{ "mood": "Sad", "journalEntry": "Rainy day." }"#;
        let entry = NewEntry::from_json(body).unwrap();

        assert_eq!(entry.mood, Mood::Sad);
        assert_eq!(entry.journal_entry, "Rainy day.");
        assert_eq!(entry.sentiment, None);
        assert_eq!(entry.date, None);
    }

    #[test]
    fn test_new_entry_rejects_unknown_mood() {
        let body = br#"{ "mood": "Bored", "journalEntry": "meh" }"#;
        assert!(matches!(NewEntry::from_json(body), Err(JournalError::InvalidEntry(_))));
    }

    #[test]
    fn test_new_entry_requires_text() {
        let body = br#"{ "mood": "Happy" }"#;
        assert!(NewEntry::from_json(body).is_err());
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = Entry {
            id: 7,
            mood: Mood::Happy,
            journal_entry: "Great run".to_string(),
            sentiment: Sentiment::Positive,
            date: Utc.with_ymd_and_hms(2024, 12, 31, 8, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["journalEntry"], "Great run");
        assert_eq!(json["sentiment"], "Positive");
        assert_eq!(entry.day(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(matches!(parse_day("2023-02-29"), Err(JournalError::InvalidDate(_))));
        assert!(parse_day("yesterday").is_err());
    }
}
