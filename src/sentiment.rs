// 🧠 Sentiment Scorer - Rule-Based Journal Classification
// Weighted keywords + negation window + phrase boosts + adaptive threshold

use crate::error::JournalError;
use crate::lexicon::{Lexicon, PhraseBoost, Polarity};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// How many preceding tokens are checked for a negation marker
pub const NEGATION_WINDOW: usize = 3;

/// Punctuation trimmed from both ends of a token before lexicon lookup
const TOKEN_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Words per threshold step, and the threshold bounds
const WORDS_PER_THRESHOLD_STEP: usize = 20;
const MIN_THRESHOLD: u64 = 1;
const MAX_THRESHOLD: u64 = 3;

// ============================================================================
// SENTIMENT LABEL
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn name(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sentiment {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::ALL
            .into_iter()
            .find(|sentiment| sentiment.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| JournalError::UnknownSentiment(s.to_string()))
    }
}

// ============================================================================
// SCORING MODE & RESULT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Weights, negation, phrase boosts and adaptive threshold
    #[default]
    Weighted,
    /// Plain positive/negative word counts, ties are Neutral
    Basic,
}

/// Breakdown of a single classification
///
/// Scores are kept in half points so a negated negative word contributes
/// exactly half its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentScore {
    positive_halves: u64,
    negative_halves: u64,
    pub word_count: usize,
    pub threshold: u64,
    pub sentiment: Sentiment,
}

impl SentimentScore {
    pub fn positive(&self) -> f64 {
        self.positive_halves as f64 / 2.0
    }

    pub fn negative(&self) -> f64 {
        self.negative_halves as f64 / 2.0
    }

    /// positive - negative
    pub fn difference(&self) -> f64 {
        self.positive() - self.negative()
    }
}

// ============================================================================
// SCORER
// ============================================================================

/// Maps free-form text to a `Sentiment`. Immutable after construction, so a
/// single instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    mode: ScoringMode,
    positive: HashMap<String, u64>,
    negative: HashMap<String, u64>,
    negations: HashSet<String>,
    phrases: Vec<PhraseBoost>,
}

impl SentimentScorer {
    /// Weighted scorer over the given lexicon
    pub fn new(lexicon: Lexicon) -> Self {
        Self::with_mode(lexicon, ScoringMode::Weighted)
    }

    /// Basic counting scorer over the reference basic lexicon
    pub fn basic() -> Self {
        Self::with_mode(Lexicon::basic(), ScoringMode::Basic)
    }

    pub fn with_mode(lexicon: Lexicon, mode: ScoringMode) -> Self {
        let lexicon = lexicon.normalized();

        SentimentScorer {
            mode,
            positive: lexicon
                .positive
                .iter()
                .map(|e| (e.word.clone(), e.weight as u64))
                .collect(),
            negative: lexicon
                .negative
                .iter()
                .map(|e| (e.word.clone(), e.weight as u64))
                .collect(),
            negations: lexicon.negations.into_iter().collect(),
            phrases: lexicon.phrases,
        }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Classify text. Total: every input maps to a label, empty text is Neutral.
    pub fn classify(&self, text: &str) -> Sentiment {
        self.score(text).sentiment
    }

    /// Classify optional text; absent input is treated as empty
    pub fn classify_opt(&self, text: Option<&str>) -> Sentiment {
        self.classify(text.unwrap_or_default())
    }

    /// Classify and return the intermediate scores
    pub fn score(&self, text: &str) -> SentimentScore {
        match self.mode {
            ScoringMode::Weighted => self.score_weighted(text),
            ScoringMode::Basic => self.score_basic(text),
        }
    }

    fn score_weighted(&self, text: &str) -> SentimentScore {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().map(strip_punctuation).collect();

        let mut positive = 0u64;
        let mut negative = 0u64;

        for (i, token) in tokens.iter().enumerate() {
            let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
            let negated = window.iter().any(|prev| self.negations.contains(*prev));

            if let Some(&weight) = self.positive.get(*token) {
                if negated {
                    negative += weight * 2;
                } else {
                    positive += weight * 2;
                }
            } else if let Some(&weight) = self.negative.get(*token) {
                if negated {
                    // Negated negative counts half toward positive
                    positive += weight;
                } else {
                    negative += weight * 2;
                }
            }
        }

        // Phrase boosts ignore negation and token boundaries
        for boost in &self.phrases {
            if lower.contains(boost.phrase.as_str()) {
                match boost.polarity {
                    Polarity::Positive => positive += boost.weight as u64 * 2,
                    Polarity::Negative => negative += boost.weight as u64 * 2,
                }
            }
        }

        let word_count = tokens.len();
        let threshold = adaptive_threshold(word_count);

        SentimentScore {
            positive_halves: positive,
            negative_halves: negative,
            word_count,
            threshold,
            sentiment: decide(positive, negative, threshold),
        }
    }

    fn score_basic(&self, text: &str) -> SentimentScore {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect();

        let mut positive = 0u64;
        let mut negative = 0u64;
        let mut word_count = 0;

        for word in cleaned.split_whitespace() {
            word_count += 1;
            if self.positive.contains_key(word) {
                positive += 2;
            }
            if self.negative.contains_key(word) {
                negative += 2;
            }
        }

        SentimentScore {
            positive_halves: positive,
            negative_halves: negative,
            word_count,
            threshold: 0,
            sentiment: decide(positive, negative, 0),
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Lexicon::weighted())
    }
}

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(TOKEN_PUNCTUATION)
}

/// clamp(floor(word_count / 20), 1, 3)
pub fn adaptive_threshold(word_count: usize) -> u64 {
    ((word_count / WORDS_PER_THRESHOLD_STEP) as u64).clamp(MIN_THRESHOLD, MAX_THRESHOLD)
}

/// Strict comparison against the threshold, all values in half points
fn decide(positive_halves: u64, negative_halves: u64, threshold: u64) -> Sentiment {
    let diff = positive_halves as i128 - negative_halves as i128;
    let bar = threshold as i128 * 2;

    if diff > bar {
        Sentiment::Positive
    } else if diff < -bar {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn classify(text: &str) -> Sentiment {
        SentimentScorer::default().classify(text)
    }

    /// `leading` followed by filler words up to `total` words
    fn padded(leading: &str, total: usize) -> String {
        let mut words: Vec<&str> = leading.split_whitespace().collect();
        while words.len() < total {
            words.push("today");
        }
        words.join(" ")
    }

    #[test]
    fn test_empty_and_absent_text_is_neutral() {
        let scorer = SentimentScorer::default();
        assert_eq!(scorer.classify(""), Sentiment::Neutral);
        assert_eq!(scorer.classify("   \n\t "), Sentiment::Neutral);
        assert_eq!(scorer.classify_opt(None), Sentiment::Neutral);
    }

    #[test]
    fn test_single_positive_word() {
        assert_eq!(classify("I am happy"), Sentiment::Positive);
    }

    #[test]
    fn test_negation_flips_positive() {
        assert_eq!(classify("I am not happy"), Sentiment::Negative);
        assert_eq!(classify("I don't feel happy"), Sentiment::Negative);
        assert_eq!(classify("never been this happy"), Sentiment::Negative);
    }

    #[test]
    fn test_negation_window_is_three_tokens() {
        // "not" is four tokens before "happy"
        assert_eq!(classify("not at all the happy"), Sentiment::Positive);
    }

    #[test]
    fn test_negated_negative_is_half_weight() {
        // sad (2) negated → +1, equal to threshold 1
        let score = SentimentScorer::default().score("I am not sad");
        assert_eq!(score.positive(), 1.0);
        assert_eq!(score.negative(), 0.0);
        assert_eq!(score.sentiment, Sentiment::Neutral);

        // terrible (3) negated → +1.5 > 1
        assert_eq!(classify("I am not terrible"), Sentiment::Positive);
    }

    #[test]
    fn test_punctuation_is_stripped() {
        assert_eq!(classify("Happy!!!"), Sentiment::Positive);
        assert_eq!(classify("Not, happy."), Sentiment::Negative);
        assert_eq!(classify("(happy)"), Sentiment::Neutral);
    }

    #[test]
    fn test_phrase_boost_is_literal_substring() {
        let scorer = SentimentScorer::default();

        let boosted = scorer.score("I am really happy");
        assert_eq!(boosted.positive(), 5.0);
        assert_eq!(boosted.sentiment, Sentiment::Positive);

        // "truly happy" is not a listed phrase
        let plain = scorer.score("I am truly happy");
        assert_eq!(plain.positive(), 2.0);

        // substring match ignores word boundaries
        let inside = scorer.score("they said so excitedly");
        assert_eq!(inside.positive(), 3.0);
    }

    #[test]
    fn test_phrase_boost_ignores_negation() {
        // happy negated (-2) but "really happy" still boosts (+3)
        let score = SentimentScorer::default().score("I am not really happy");
        assert_eq!(score.negative(), 2.0);
        assert_eq!(score.positive(), 3.0);
        assert_eq!(score.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_phrase_counts_once() {
        let score = SentimentScorer::default().score("hate it hate it");
        // hate (3) twice + one phrase boost (3)
        assert_eq!(score.negative(), 9.0);
    }

    #[test]
    fn test_additive_cancellation() {
        assert_eq!(classify("I am sad but grateful"), Sentiment::Neutral);

        // "very grateful" is a listed phrase and tips the balance
        let score = SentimentScorer::default().score("I am very sad but also very grateful");
        assert_eq!(score.difference(), 3.0);
        assert_eq!(score.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_adaptive_threshold() {
        assert_eq!(adaptive_threshold(0), 1);
        assert_eq!(adaptive_threshold(5), 1);
        assert_eq!(adaptive_threshold(39), 1);
        assert_eq!(adaptive_threshold(40), 2);
        assert_eq!(adaptive_threshold(60), 3);
        assert_eq!(adaptive_threshold(1000), 3);
    }

    #[test]
    fn test_threshold_boundary_is_strict() {
        // diff 2 in a 5-word text clears T=1
        assert_eq!(classify(&padded("happy", 5)), Sentiment::Positive);

        // diff 2 in a 40-word text equals T=2
        let score = SentimentScorer::default().score(&padded("happy", 40));
        assert_eq!(score.threshold, 2);
        assert_eq!(score.sentiment, Sentiment::Neutral);

        // diff 3 in a 100-word text equals the capped T=3
        assert_eq!(classify(&padded("wonderful", 100)), Sentiment::Neutral);
        assert_eq!(classify(&padded("wonderful good", 100)), Sentiment::Positive);
        assert_eq!(classify(&padded("miserable bad", 100)), Sentiment::Negative);
    }

    #[test]
    fn test_idempotent() {
        let scorer = SentimentScorer::default();
        let text = "Had a wonderful walk but I'm still a bit tired and worried.";
        assert_eq!(scorer.score(text), scorer.score(text));
    }

    #[test]
    fn test_concurrent_use() {
        let scorer = Arc::new(SentimentScorer::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let scorer = Arc::clone(&scorer);
                thread::spawn(move || scorer.classify("I feel so excited and proud"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Sentiment::Positive);
        }
    }

    #[test]
    fn test_basic_mode() {
        let scorer = SentimentScorer::basic();
        assert_eq!(scorer.mode(), ScoringMode::Basic);
        assert_eq!(scorer.classify(""), Sentiment::Neutral);
        assert_eq!(scorer.classify("I am happy"), Sentiment::Positive);
        assert_eq!(scorer.classify("happy but sad"), Sentiment::Neutral);
        assert_eq!(scorer.classify("I'm happy, but sad; angry!"), Sentiment::Negative);
        // no negation handling
        assert_eq!(scorer.classify("not happy"), Sentiment::Positive);
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = Lexicon::from_json(
            r#"{ "positive": [{ "word": "sunny", "weight": 2 }], "negative": [{ "word": "gloomy", "weight": 2 }] }"#,
        )
        .unwrap();
        let scorer = SentimentScorer::new(lexicon);

        assert_eq!(scorer.classify("a sunny morning"), Sentiment::Positive);
        assert_eq!(scorer.classify("a gloomy morning"), Sentiment::Negative);
        // no negation markers configured
        assert_eq!(scorer.classify("not sunny"), Sentiment::Positive);
    }

    #[test]
    fn test_sentiment_parse_and_serde() {
        assert_eq!("positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!(" Negative ".parse::<Sentiment>().unwrap(), Sentiment::Negative);
        assert!("meh".parse::<Sentiment>().is_err());
        assert_eq!(Sentiment::default(), Sentiment::Neutral);

        assert_eq!(serde_json::to_string(&Sentiment::Neutral).unwrap(), "\"Neutral\"");
        let parsed: Sentiment = serde_json::from_str("\"Positive\"").unwrap();
        assert_eq!(parsed, Sentiment::Positive);
    }
}
