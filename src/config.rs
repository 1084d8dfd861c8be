use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::canned::CannedReplies;
use crate::error::{NovaBotError, Result};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub sqlite_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub gemini: Option<GeminiConfig>,
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub canned_replies: BTreeMap<String, String>,
}

impl Config {
    pub fn convention_defaults(db_path: &str) -> Self {
        Self {
            gemini: Some(GeminiConfig {
                api_key: None,
                model: Some(DEFAULT_GEMINI_MODEL.to_string()),
                base_url: Some(DEFAULT_GEMINI_BASE_URL.to_string()),
                timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
            }),
            database: Some(DatabaseConfig {
                sqlite_path: Some(db_path.to_string()),
            }),
            canned_replies: BTreeMap::new(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| NovaBotError::Config(e.to_string()))
    }

    /// Loads `path`, or the convention defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>, db_path: &str) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(
                config_path = %path.to_string_lossy(),
                "No config file; using convention defaults"
            );
            return Ok(Self::convention_defaults(db_path));
        }
        let raw = fs::read_to_string(path).map_err(|e| {
            NovaBotError::Config(format!(
                "Failed to read config file {}: {e}",
                path.to_string_lossy()
            ))
        })?;
        let mut config = Self::from_json_str(&raw)?;
        let database = config.database.get_or_insert_with(DatabaseConfig::default);
        if database.sqlite_path.is_none() {
            database.sqlite_path = Some(db_path.to_string());
        }
        Ok(config)
    }

    pub fn resolve_env(self) -> Self {
        self.resolve_env_with(|name| std::env::var(name).ok())
    }

    /// `GEMINI_API_KEY` fills a missing key; `NOVA_DB_PATH` always wins for
    /// the database path.
    pub fn resolve_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let gemini = self.gemini.get_or_insert_with(GeminiConfig::default);
        if gemini.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
            gemini.api_key = non_blank("GEMINI_API_KEY");
        }
        if let Some(path) = non_blank("NOVA_DB_PATH") {
            self.database
                .get_or_insert_with(DatabaseConfig::default)
                .sqlite_path = Some(path);
        }
        self
    }

    pub fn with_sqlite_path(mut self, path: impl Into<String>) -> Self {
        self.database
            .get_or_insert_with(DatabaseConfig::default)
            .sqlite_path = Some(path.into());
        self
    }

    pub fn sqlite_path(&self) -> Option<&str> {
        self.database
            .as_ref()
            .and_then(|database| database.sqlite_path.as_deref())
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }

    pub fn canned_replies(&self) -> CannedReplies {
        CannedReplies::with_overrides(self.canned_replies.iter().map(|(k, v)| (k, v.clone())))
    }
}
