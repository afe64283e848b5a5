//! `Dictionary`: one handle owning configuration, storage, the word index,
//! the definition cache and the profile for the lifetime of an app session.

use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use super::cache::{CacheOptions, DefinitionCache};
use super::index::WordIndex;
use super::profile::ProfileStore;
use crate::clock::Clock;
use crate::error::{Result, WordbookError};
use crate::io::KvStore;
use crate::remote::{DefinitionSource, WordListSource};
use crate::types::{DefinitionPayload, UserProfile, WordbookConfig};

pub struct Dictionary {
    config: WordbookConfig,
    index: WordIndex,
    definitions: DefinitionCache,
    profile: ProfileStore,
    user: RwLock<Option<UserProfile>>,
}

impl Dictionary {
    /// Open a session backed by a [`FileStore`](crate::io::FileStore) under
    /// `config.data_dir` and the HTTP endpoints named in `config`.
    #[cfg(feature = "http")]
    pub fn open(config: WordbookConfig) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(crate::io::FileStore::open(&config.data_dir)?);
        let client = Arc::new(crate::remote::HttpClient::new(&config)?);
        Self::with_parts(config, store, client.clone(), client)
    }

    /// Assemble a session from explicit collaborators. The signed-in user, if
    /// any, is restored from the store.
    pub fn with_parts(
        config: WordbookConfig,
        store: Arc<dyn KvStore>,
        definitions: Arc<dyn DefinitionSource>,
        words: Arc<dyn WordListSource>,
    ) -> Result<Self> {
        config.validate()?;
        let index = WordIndex::new(Arc::clone(&store), words, config.words_storage_key.clone())
            .with_chunk_size(config.chunk_size);
        let cache = DefinitionCache::new(
            Arc::clone(&store),
            definitions,
            CacheOptions::from(&config),
        );
        let profile = ProfileStore::new(store, config.storage_prefix.clone());
        let user = profile.user();
        if let Some(user) = &user {
            tracing::debug!(session.user = %user.id, "restored signed-in user");
        }

        Ok(Self {
            config,
            index,
            definitions: cache,
            profile,
            user: RwLock::new(user),
        })
    }

    /// Replace the cache clock; used to drive expiry deterministically.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.definitions = self.definitions.with_clock(clock);
        self
    }

    #[must_use]
    pub fn config(&self) -> &WordbookConfig {
        &self.config
    }

    #[must_use]
    pub fn index(&self) -> &WordIndex {
        &self.index
    }

    #[must_use]
    pub fn definitions(&self) -> &DefinitionCache {
        &self.definitions
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileStore {
        &self.profile
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn user_id(&self) -> Option<String> {
        self.current_user().map(|user| user.id)
    }

    /// Sign in as `email` under a freshly generated id. No credential check
    /// happens here; favorites and history switch to the new user's lists.
    pub fn login(&self, email: &str) -> Result<UserProfile> {
        let email = email.trim();
        if email.is_empty() {
            return Err(WordbookError::InvalidInput {
                reason: "email must not be empty".into(),
            });
        }
        let user = UserProfile {
            id: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
        };
        self.profile.save_user(&user.id, &user.email);
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        tracing::info!(session.user = %user.id, "signed in");
        Ok(user)
    }

    /// Sign out; favorites and history fall back to the anonymous lists.
    pub fn logout(&self) {
        self.profile.clear_user();
        let previous = self
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(user) = previous {
            tracing::info!(session.user = %user.id, "signed out");
        }
    }

    /// Look up `word` and, on success, record it at the front of the current
    /// user's history. Failed lookups leave the history untouched.
    pub fn lookup(&self, word: &str) -> Result<Vec<DefinitionPayload>> {
        let definitions = self.definitions.get_word_definition(word)?;
        self.profile.add_to_history(word, self.user_id().as_deref());
        Ok(definitions)
    }

    #[must_use]
    pub fn favorites(&self) -> Vec<String> {
        self.profile.favorites(self.user_id().as_deref())
    }

    pub fn add_favorite(&self, word: &str) {
        self.profile.add_favorite(word, self.user_id().as_deref());
    }

    pub fn remove_favorite(&self, word: &str) {
        self.profile.remove_favorite(word, self.user_id().as_deref());
    }

    #[must_use]
    pub fn is_favorite(&self, word: &str) -> bool {
        self.profile.is_favorite(word, self.user_id().as_deref())
    }

    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.profile.history(self.user_id().as_deref())
    }

    pub fn clear_history(&self) {
        self.profile.clear_history(self.user_id().as_deref());
    }
}
