// 📚 Lexicons - Sentiment Keywords as Data
// Weighted keyword lists, negation markers and phrase boosts used by the scorer

use crate::error::JournalError;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

// ============================================================================
// LEXICON TYPES
// ============================================================================

/// A single keyword and the score it contributes when matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,

    /// Weight added to a score on match (must be >= 1)
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl LexiconEntry {
    pub fn new(word: &str, weight: u32) -> Self {
        LexiconEntry {
            word: word.to_string(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

/// Multi-word pattern matched as a plain substring of the lowercased text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseBoost {
    pub phrase: String,
    pub polarity: Polarity,
    #[serde(default = "default_phrase_weight")]
    pub weight: u32,
}

fn default_phrase_weight() -> u32 {
    3
}

impl PhraseBoost {
    pub fn new(phrase: &str, polarity: Polarity, weight: u32) -> Self {
        PhraseBoost {
            phrase: phrase.to_string(),
            polarity,
            weight,
        }
    }
}

// ============================================================================
// LEXICON
// ============================================================================

/// Immutable scoring configuration captured by a `SentimentScorer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    pub positive: Vec<LexiconEntry>,
    pub negative: Vec<LexiconEntry>,
    #[serde(default)]
    pub negations: Vec<String>,
    #[serde(default)]
    pub phrases: Vec<PhraseBoost>,
}

impl Lexicon {
    /// Reference lexicon for the weighted scorer
    pub fn weighted() -> Self {
        let positive = [
            ("happy", 2),
            ("great", 2),
            ("good", 1),
            ("excellent", 3),
            ("wonderful", 3),
            ("love", 2),
            ("enjoy", 1),
            ("positive", 1),
            ("awesome", 2),
            ("amazing", 2),
            ("grateful", 2),
            ("thankful", 2),
            ("exciting", 2),
            ("pleased", 1),
            ("joy", 2),
            ("proud", 2),
            ("blessed", 2),
            ("fun", 1),
            ("peaceful", 2),
            ("calm", 1),
        ];

        let negative = [
            ("sad", 2),
            ("bad", 1),
            ("terrible", 3),
            ("awful", 3),
            ("hate", 3),
            ("upset", 2),
            ("disappointed", 2),
            ("negative", 1),
            ("anxious", 2),
            ("stress", 2),
            ("worried", 2),
            ("frustrated", 2),
            ("angry", 2),
            ("depressed", 3),
            ("annoyed", 1),
            ("lonely", 2),
            ("afraid", 2),
            ("miserable", 3),
            ("exhausted", 1),
            ("tired", 1),
        ];

        let negations = [
            "not", "no", "never", "don't", "doesn't", "didn't", "can't", "won't", "isn't",
        ];

        let positive_phrases = ["really happy", "very good", "so excited", "love it", "very grateful"];
        let negative_phrases = ["really sad", "very bad", "so angry", "hate it", "very anxious"];

        let phrases = positive_phrases
            .iter()
            .map(|p| PhraseBoost::new(p, Polarity::Positive, 3))
            .chain(
                negative_phrases
                    .iter()
                    .map(|p| PhraseBoost::new(p, Polarity::Negative, 3)),
            )
            .collect();

        Lexicon {
            positive: positive.iter().map(|(w, n)| LexiconEntry::new(w, *n)).collect(),
            negative: negative.iter().map(|(w, n)| LexiconEntry::new(w, *n)).collect(),
            negations: negations.iter().map(|s| s.to_string()).collect(),
            phrases,
        }
    }

    /// Reference lexicon for the basic (unweighted counting) scorer
    pub fn basic() -> Self {
        let positive = [
            "happy", "joy", "love", "excited", "grateful", "thankful", "good", "great",
            "excellent", "amazing", "wonderful", "beautiful", "accomplished", "peaceful",
            "calm", "relaxed", "content", "pleased", "delighted", "cheerful", "hopeful",
        ];

        let negative = [
            "sad", "angry", "upset", "depressed", "anxious", "worried", "hate", "dislike",
            "bad", "terrible", "awful", "miserable", "stressed", "frustrated", "annoyed",
            "disappointed", "unhappy", "hurt", "lonely", "grief", "pain", "fear", "scared",
        ];

        Lexicon {
            positive: positive.iter().map(|w| LexiconEntry::new(w, 1)).collect(),
            negative: negative.iter().map(|w| LexiconEntry::new(w, 1)).collect(),
            negations: Vec::new(),
            phrases: Vec::new(),
        }
    }

    /// Load a lexicon from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read lexicon file: {:?}", path.as_ref()))?;

        let lexicon = Lexicon::from_json(&content)
            .with_context(|| format!("Failed to load lexicon from {:?}", path.as_ref()))?;

        Ok(lexicon)
    }

    /// Parse, normalize and validate a lexicon from JSON text
    pub fn from_json(json: &str) -> Result<Self, JournalError> {
        let lexicon: Lexicon = serde_json::from_str(json)?;
        let lexicon = lexicon.normalized();
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Lowercase and trim every word, marker and phrase
    pub fn normalized(mut self) -> Self {
        for entry in self.positive.iter_mut().chain(self.negative.iter_mut()) {
            entry.word = entry.word.trim().to_lowercase();
        }
        for marker in self.negations.iter_mut() {
            *marker = marker.trim().to_lowercase();
        }
        for boost in self.phrases.iter_mut() {
            boost.phrase = boost.phrase.trim().to_lowercase();
        }
        self
    }

    /// Check weights, empty words and positive/negative overlap
    pub fn validate(&self) -> Result<(), JournalError> {
        for entry in self.positive.iter().chain(self.negative.iter()) {
            if entry.word.is_empty() {
                return Err(JournalError::InvalidLexicon("empty keyword".to_string()));
            }
            if entry.weight == 0 {
                return Err(JournalError::InvalidLexicon(format!(
                    "keyword '{}' has weight 0",
                    entry.word
                )));
            }
        }

        if self.negations.iter().any(|marker| marker.is_empty()) {
            return Err(JournalError::InvalidLexicon("empty negation marker".to_string()));
        }

        for boost in &self.phrases {
            if boost.phrase.is_empty() || boost.weight == 0 {
                return Err(JournalError::InvalidLexicon(format!(
                    "invalid phrase boost '{}'",
                    boost.phrase
                )));
            }
        }

        let positive: HashSet<&str> = self.positive.iter().map(|e| e.word.as_str()).collect();
        if let Some(shared) = self
            .negative
            .iter()
            .find(|e| positive.contains(e.word.as_str()))
        {
            return Err(JournalError::InvalidLexicon(format!(
                "'{}' appears in both positive and negative lexicons",
                shared.word
            )));
        }

        Ok(())
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::weighted()
    }
}

// ============================================================================
// TESTS
// ============================================================================
