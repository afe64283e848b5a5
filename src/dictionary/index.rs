//! Headword index: the full word list behind browsing and prefix search.
//!
//! Lookup order on first use is memory, then the chunked records in the
//! store, then the remote word list (which is persisted in chunks before being
//! served). Once loaded, the in-memory list is authoritative for the lifetime
//! of the index and is never refreshed.

use std::sync::{Arc, PoisonError, RwLock};

use crate::constants::WORD_CHUNK_SIZE;
use crate::error::Result;
use crate::io::{KvStore, read_chunked, write_chunked};
use crate::remote::WordListSource;

pub struct WordIndex {
    store: Arc<dyn KvStore>,
    source: Arc<dyn WordListSource>,
    storage_key: String,
    chunk_size: usize,
    words: RwLock<Option<Arc<[String]>>>,
}

impl WordIndex {
    pub fn new(
        store: Arc<dyn KvStore>,
        source: Arc<dyn WordListSource>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            source,
            storage_key: storage_key.into(),
            chunk_size: WORD_CHUNK_SIZE,
            words: RwLock::new(None),
        }
    }

    /// Override the number of words per persisted chunk. Zero is ignored.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        if chunk_size > 0 {
            self.chunk_size = chunk_size;
        }
        self
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Number of words currently held in memory; zero before the first load.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().map_or(0, |words| words.len())
    }

    /// The full word list, loading it on first call.
    ///
    /// Any failure is logged and reported as an empty list. A failed load is
    /// not remembered, so the next call tries again.
    #[must_use]
    pub fn load_words(&self) -> Arc<[String]> {
        match self.try_load_words() {
            Ok(words) => words,
            Err(err) => {
                tracing::error!(
                    error = %err,
                    index.key = %self.storage_key,
                    "word index load failed"
                );
                Arc::from(Vec::new())
            }
        }
    }

    /// Like [`load_words`](Self::load_words) but surfaces the remote failure.
    ///
    /// Unreadable persisted records fall through to the remote source, and a
    /// failure to persist a fetched list only costs a refetch next process.
    pub fn try_load_words(&self) -> Result<Arc<[String]>> {
        if let Some(words) = self.snapshot() {
            return Ok(words);
        }

        match read_chunked(self.store.as_ref(), &self.storage_key) {
            Ok(Some(words)) => {
                tracing::debug!(
                    index.key = %self.storage_key,
                    index.words = words.len(),
                    "word index restored from store"
                );
                return Ok(self.install(words));
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    index.key = %self.storage_key,
                    "persisted word index unreadable"
                );
            }
        }

        // No lock is held across the fetch: concurrent first loads may each
        // fetch and persist, and the last install wins.
        let words = self.source.fetch_word_list()?;
        tracing::info!(index.words = words.len(), "word list fetched");

        if let Err(err) = write_chunked(
            self.store.as_ref(),
            &self.storage_key,
            &words,
            self.chunk_size,
        ) {
            tracing::warn!(
                error = %err,
                index.key = %self.storage_key,
                "failed to persist word index"
            );
        }
        Ok(self.install(words))
    }

    /// Words `[page * page_size, page * page_size + page_size)`, clipped to the
    /// list. Pages past the end, or whose offset overflows, are empty.
    #[must_use]
    pub fn words_paginated(&self, page: usize, page_size: usize) -> Vec<String> {
        let words = self.load_words();
        let Some(start) = page.checked_mul(page_size) else {
            return Vec::new();
        };
        if start >= words.len() {
            return Vec::new();
        }
        let end = start.saturating_add(page_size).min(words.len());
        words[start..end].to_vec()
    }

    /// Number of pages of `page_size` needed to cover the loaded list.
    #[must_use]
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.load_words().len().div_ceil(page_size)
    }

    /// Up to `limit` words starting with `prefix`, ignoring case, in list order.
    #[must_use]
    pub fn search_words(&self, prefix: &str, limit: usize) -> Vec<String> {
        let words = self.load_words();
        let needle = prefix.to_lowercase();
        words
            .iter()
            .filter(|word| starts_with_ignore_case(word, &needle))
            .take(limit)
            .cloned()
            .collect()
    }

    fn snapshot(&self) -> Option<Arc<[String]>> {
        self.words
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn install(&self, words: Vec<String>) -> Arc<[String]> {
        let words: Arc<[String]> = Arc::from(words);
        *self.words.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&words));
        words
    }
}

/// `lower_prefix` must already be lowercase.
fn starts_with_ignore_case(word: &str, lower_prefix: &str) -> bool {
    if word.is_ascii() && lower_prefix.is_ascii() {
        let prefix = lower_prefix.as_bytes();
        return word.len() >= prefix.len()
            && word.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix);
    }
    word.to_lowercase().starts_with(lower_prefix)
}
