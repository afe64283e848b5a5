//! Runtime configuration for a dictionary session.
//!
//! Every field has a default; deployments override them through a builder,
//! a serialized config document, or the process environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CACHE_PREFIX, DEFAULT_CACHE_TTL_HOURS, DEFAULT_STORAGE_PREFIX,
    DEFAULT_WORDS_DICTIONARY_URL, DEFAULT_WORDS_STORAGE_KEY, WORD_CHUNK_SIZE,
};
use crate::error::{Result, WordbookError};

pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_CACHE_PREFIX: &str = "CACHE_PREFIX";
pub const ENV_CACHE_EXPIRATION_HOURS: &str = "CACHE_EXPIRATION_HOURS";
pub const ENV_WORDS_DICTIONARY_URL: &str = "WORDS_DICTIONARY_URL";
pub const ENV_WORDS_STORAGE_KEY: &str = "WORDS_STORAGE_KEY";
pub const ENV_STORAGE_PREFIX: &str = "STORAGE_PREFIX";
pub const ENV_DATA_DIR: &str = "WORDBOOK_DATA_DIR";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_words_dictionary_url() -> String {
    DEFAULT_WORDS_DICTIONARY_URL.to_string()
}

fn default_cache_prefix() -> String {
    DEFAULT_CACHE_PREFIX.to_string()
}

fn default_cache_ttl_hours() -> u64 {
    DEFAULT_CACHE_TTL_HOURS
}

fn default_words_storage_key() -> String {
    DEFAULT_WORDS_STORAGE_KEY.to_string()
}

fn default_storage_prefix() -> String {
    DEFAULT_STORAGE_PREFIX.to_string()
}

fn default_chunk_size() -> usize {
    WORD_CHUNK_SIZE
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("wordbook")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordbookConfig {
    /// Definition endpoint; the looked-up word is appended as a path segment.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Word-list document fetched once and persisted locally.
    #[serde(default = "default_words_dictionary_url")]
    pub words_dictionary_url: String,
    /// Prefix of every definition cache key.
    #[serde(default = "default_cache_prefix")]
    pub cache_prefix: String,
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,
    /// Base key of the chunked word index.
    #[serde(default = "default_words_storage_key")]
    pub words_storage_key: String,
    /// Prefix of favorites, history, user and language keys.
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Root directory of the on-disk key-value store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Per-request timeout for remote calls. `None` waits indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for WordbookConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            words_dictionary_url: default_words_dictionary_url(),
            cache_prefix: default_cache_prefix(),
            cache_ttl_hours: default_cache_ttl_hours(),
            words_storage_key: default_words_storage_key(),
            storage_prefix: default_storage_prefix(),
            chunk_size: default_chunk_size(),
            data_dir: default_data_dir(),
            request_timeout_secs: None,
        }
    }
}

impl WordbookConfig {
    /// Start a fluent builder for `WordbookConfig`.
    #[must_use]
    pub fn builder() -> WordbookConfigBuilder {
        WordbookConfigBuilder::default()
    }

    /// Defaults overridden by whichever environment variables are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_API_BASE_URL) {
            config.api_base_url = value;
        }
        if let Some(value) = lookup(ENV_WORDS_DICTIONARY_URL) {
            config.words_dictionary_url = value;
        }
        if let Some(value) = lookup(ENV_CACHE_PREFIX) {
            config.cache_prefix = value;
        }
        if let Some(value) = lookup(ENV_CACHE_EXPIRATION_HOURS) {
            config.cache_ttl_hours =
                value
                    .trim()
                    .parse()
                    .map_err(|err| WordbookError::InvalidConfig {
                        reason: format!("{ENV_CACHE_EXPIRATION_HOURS}={value:?}: {err}"),
                    })?;
        }
        if let Some(value) = lookup(ENV_WORDS_STORAGE_KEY) {
            config.words_storage_key = value;
        }
        if let Some(value) = lookup(ENV_STORAGE_PREFIX) {
            config.storage_prefix = value;
        }
        if let Some(value) = lookup(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(value);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(WordbookError::InvalidConfig {
                reason: "chunk_size must be non-zero".into(),
            });
        }
        if self.words_storage_key.is_empty() {
            return Err(WordbookError::InvalidConfig {
                reason: "words_storage_key must not be empty".into(),
            });
        }
        if self.api_base_url.trim().is_empty() {
            return Err(WordbookError::InvalidConfig {
                reason: "api_base_url must not be empty".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.saturating_mul(3600))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WordbookConfigBuilder {
    inner: WordbookConfig,
}

impl WordbookConfigBuilder {
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.inner.api_base_url = url.into();
        self
    }

    pub fn words_dictionary_url(mut self, url: impl Into<String>) -> Self {
        self.inner.words_dictionary_url = url.into();
        self
    }

    pub fn cache_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.inner.cache_prefix = prefix.into();
        self
    }

    pub fn cache_ttl_hours(mut self, hours: u64) -> Self {
        self.inner.cache_ttl_hours = hours;
        self
    }

    pub fn words_storage_key(mut self, key: impl Into<String>) -> Self {
        self.inner.words_storage_key = key.into();
        self
    }

    pub fn storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.inner.storage_prefix = prefix.into();
        self
    }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.inner.chunk_size = size;
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.inner.data_dir = dir.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.inner.request_timeout_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn build(self) -> WordbookConfig {
        self.inner
    }
}
