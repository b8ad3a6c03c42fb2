use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::db::SqliteStore;
use crate::lexicon::Lexicon;
use crate::sentiment::{ScoringMode, SentimentScorer};
use crate::store::{EntryStore, MemoryStore};

pub const CONFIG_ENV_VAR: &str = "SERENE_CONFIG";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub client: ClientPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();
        if config_path.exists() {
            return Self::from_file(&config_path);
        }

        Ok(AppConfig::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let parsed: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML from {}", path.display()))?;
        Ok(parsed)
    }

    /// Scorer for the configured mode, using a custom lexicon file if given
    pub fn build_scorer(&self) -> Result<SentimentScorer> {
        let lexicon = match (&self.scoring.lexicon_path, self.scoring.mode) {
            (Some(path), _) => Lexicon::from_file(path)?,
            (None, ScoringMode::Weighted) => Lexicon::weighted(),
            (None, ScoringMode::Basic) => Lexicon::basic(),
        };

        Ok(SentimentScorer::with_mode(lexicon, self.scoring.mode))
    }

    pub fn open_store(&self) -> Result<Arc<dyn EntryStore>> {
        let store: Arc<dyn EntryStore> = match self.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Sqlite => Arc::new(SqliteStore::open(&self.storage.path)?),
        };
        Ok(store)
    }
}

fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        return Path::new(&path).to_path_buf();
    }

    Path::new("serene.toml").to_path_buf()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    Path::new("serene.db").to_path_buf()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: ScoringMode,
    /// JSON lexicon replacing the built-in word lists
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

/// Debounce policy for clients classifying while the user types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPolicy {
    #[serde(default = "default_debounce_ms", alias = "debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_chars", alias = "min_chars")]
    pub min_chars: usize,
}

impl Default for ClientPolicy {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_chars: default_min_chars(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_min_chars() -> usize {
    10
}
