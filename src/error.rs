// ⚠️ Error Taxonomy
// Errors surfaced at the library seams (stores, parsing, lexicon loading)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    /// The transport boundary received no `text` parameter at all
    #[error("Text parameter is required")]
    MissingText,

    #[error("Invalid date format '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown mood '{0}'")]
    UnknownMood(String),

    #[error("Unknown sentiment '{0}'")]
    UnknownSentiment(String),

    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JournalError {
    /// True for errors caused by the caller's input rather than the backend
    pub fn is_client_error(&self) -> bool {
        !matches!(self, JournalError::Storage(_) | JournalError::Serialization(_))
    }
}

pub type JournalResult<T> = Result<T, JournalError>;
