//! TTL-bound cache in front of the remote definition lookup.
//!
//! Entries are keyed by `{prefix}{word}` with the word exactly as the caller
//! passed it, while the remote request uses the trimmed, lowercased word. So
//! `"Cat"` and `"cat"` occupy separate entries but fetch the same definition.
//!
//! Storage problems never fail a lookup: unreadable, undecodable or
//! unwritable entries are logged and the lookup proceeds as a miss.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::constants::{DEFAULT_CACHE_PREFIX, DEFAULT_CACHE_TTL_HOURS};
use crate::error::{Result, WordbookError};
use crate::io::KvStore;
use crate::remote::DefinitionSource;
use crate::types::{DefinitionPayload, TrimLimits, WordbookConfig};

/// One persisted lookup result.
///
/// Serialized as `{"word", "data", "timestamp"}`; `word` may be absent in
/// records written by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedDefinition {
    #[serde(default)]
    pub word: String,
    #[serde(rename = "data")]
    pub payload: Vec<DefinitionPayload>,
    /// Epoch milliseconds at which the payload was fetched.
    #[serde(rename = "timestamp")]
    pub fetched_at: i64,
}

impl CachedDefinition {
    /// Stale once strictly more than `ttl_millis` have passed since the fetch.
    #[must_use]
    pub fn is_expired(&self, now_millis: i64, ttl_millis: i64) -> bool {
        now_millis.saturating_sub(self.fetched_at) > ttl_millis
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    pub key_prefix: String,
    pub ttl: Duration,
    pub limits: TrimLimits,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_HOURS * 3600),
            limits: TrimLimits::default(),
        }
    }
}

impl From<&WordbookConfig> for CacheOptions {
    fn from(config: &WordbookConfig) -> Self {
        Self {
            key_prefix: config.cache_prefix.clone(),
            ttl: config.cache_ttl(),
            limits: TrimLimits::default(),
        }
    }
}

/// Trim surrounding whitespace and lowercase, as sent to the remote service.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

pub struct DefinitionCache {
    store: Arc<dyn KvStore>,
    source: Arc<dyn DefinitionSource>,
    options: CacheOptions,
    ttl_millis: i64,
    clock: Arc<dyn Clock>,
}

impl DefinitionCache {
    pub fn new(
        store: Arc<dyn KvStore>,
        source: Arc<dyn DefinitionSource>,
        options: CacheOptions,
    ) -> Self {
        let ttl_millis = i64::try_from(options.ttl.as_millis()).unwrap_or(i64::MAX);
        Self {
            store,
            source,
            options,
            ttl_millis,
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    #[must_use]
    pub fn cache_key(&self, word: &str) -> String {
        format!("{}{word}", self.options.key_prefix)
    }

    /// Definitions for `word`, from the cache when fresh, otherwise fetched,
    /// trimmed and cached. The trimmed payload is what callers receive in
    /// both cases.
    pub fn get_word_definition(&self, word: &str) -> Result<Vec<DefinitionPayload>> {
        if let Some(entry) = self.cached(word) {
            tracing::debug!(cache.word = word, "definition cache hit");
            return Ok(entry.payload);
        }

        let query = normalize_word(word);
        if query.is_empty() {
            return Err(WordbookError::WordNotFound {
                word: word.to_string(),
            });
        }

        tracing::debug!(cache.word = word, cache.query = %query, "definition cache miss");
        let payload = self
            .source
            .fetch_definition(&query)
            .inspect_err(|err| {
                tracing::warn!(error = %err, cache.query = %query, "definition fetch failed");
            })?;

        let trimmed: Vec<DefinitionPayload> = payload
            .iter()
            .map(|entry| entry.trimmed(&self.options.limits))
            .collect();
        self.write_entry(word, &trimmed);
        Ok(trimmed)
    }

    /// The fresh cache entry for `word`, if any. Expired entries are removed.
    #[must_use]
    pub fn cached(&self, word: &str) -> Option<CachedDefinition> {
        let key = self.cache_key(word);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, cache.key = %key, "definition cache read failed");
                return None;
            }
        };

        let entry: CachedDefinition = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    cache.key = %key,
                    "definition cache entry undecodable"
                );
                return None;
            }
        };

        if entry.is_expired(self.clock.now_millis(), self.ttl_millis) {
            tracing::debug!(
                cache.key = %key,
                cache.fetched_at = entry.fetched_at,
                "definition cache entry expired"
            );
            if let Err(err) = self.store.remove(&key) {
                tracing::warn!(error = %err, cache.key = %key, "failed to drop expired entry");
            }
            return None;
        }
        Some(entry)
    }

    /// Drop the entry for `word` (as keyed, without normalization).
    pub fn evict(&self, word: &str) -> Result<()> {
        self.store.remove(&self.cache_key(word))
    }

    /// Drop every entry under this cache's prefix. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for key in self.store.keys()? {
            if key.starts_with(&self.options.key_prefix) {
                self.store.remove(&key)?;
                removed += 1;
            }
        }
        tracing::info!(cache.removed = removed, "definition cache cleared");
        Ok(removed)
    }

    fn write_entry(&self, word: &str, payload: &[DefinitionPayload]) {
        let key = self.cache_key(word);
        let entry = CachedDefinition {
            word: word.to_string(),
            payload: payload.to_vec(),
            fetched_at: self.clock.now_millis(),
        };
        let result = serde_json::to_string(&entry)
            .map_err(WordbookError::from)
            .and_then(|encoded| self.store.set(&key, &encoded));
        if let Err(err) = result {
            tracing::warn!(error = %err, cache.key = %key, "definition cache write failed");
        }
    }
}
