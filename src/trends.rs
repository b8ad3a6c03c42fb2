// 📈 Mood Trends
// Aggregates recent entries into per-mood / per-sentiment counts and a daily timeline

use crate::entry::{Entry, Mood};
use crate::sentiment::Sentiment;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_TREND_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMood {
    pub date: NaiveDate,
    /// Mood and sentiment of the most recent entry that day
    pub mood: Mood,
    pub sentiment: Sentiment,
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodTrends {
    pub days: u32,
    pub total_entries: usize,
    pub mood_counts: BTreeMap<Mood, usize>,
    pub sentiment_counts: BTreeMap<Sentiment, usize>,
    pub dominant_mood: Option<Mood>,
    pub daily: Vec<DailyMood>,
}

/// Start of the trailing window of `days` days ending at `now`
///
/// Windows reaching past the representable range cover all history.
pub fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_days(days as i64)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Summarize entries already restricted to the window
pub fn summarize(entries: &[Entry], days: u32) -> MoodTrends {
    let mut mood_counts: BTreeMap<Mood, usize> = Mood::ALL.iter().map(|m| (*m, 0)).collect();
    let mut sentiment_counts: BTreeMap<Sentiment, usize> =
        Sentiment::ALL.iter().map(|s| (*s, 0)).collect();
    let mut by_day: BTreeMap<NaiveDate, (&Entry, usize)> = BTreeMap::new();

    for entry in entries {
        *mood_counts.entry(entry.mood).or_insert(0) += 1;
        *sentiment_counts.entry(entry.sentiment).or_insert(0) += 1;

        let slot = by_day.entry(entry.day()).or_insert((entry, 0));
        slot.1 += 1;
        if (entry.date, entry.id) > (slot.0.date, slot.0.id) {
            slot.0 = entry;
        }
    }

    // Ties go to the earlier mood in declaration order
    let dominant_mood = Mood::ALL
        .iter()
        .filter(|m| mood_counts[*m] > 0)
        .fold(None, |best: Option<Mood>, mood| match best {
            Some(b) if mood_counts[&b] >= mood_counts[mood] => Some(b),
            _ => Some(*mood),
        });

    let daily = by_day
        .into_iter()
        .map(|(date, (latest, count))| DailyMood {
            date,
            mood: latest.mood,
            sentiment: latest.sentiment,
            entries: count,
        })
        .collect();

    MoodTrends {
        days,
        total_entries: entries.len(),
        mood_counts,
        sentiment_counts,
        dominant_mood,
        daily,
    }
}
