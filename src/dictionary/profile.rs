//! Per-user favorites and history, the signed-in user, and the UI language.
//!
//! Keys are `{prefix}favorites`, `{prefix}history`, `{prefix}user` and
//! `{prefix}language`. Favorites and history get a `_{user_id}` suffix when a
//! user is given, so each account keeps its own lists next to the anonymous
//! ones. Apart from [`ProfileStore::save_language`], storage failures are
//! logged and swallowed: reads fall back to empty values and writes are
//! dropped.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::constants::HISTORY_LIMIT;
use crate::error::{Result, WordbookError};
use crate::io::KvStore;
use crate::types::UserProfile;

const USER_KEY: &str = "user";
const FAVORITES_KEY: &str = "favorites";
const HISTORY_KEY: &str = "history";
const LANGUAGE_KEY: &str = "language";

pub struct ProfileStore {
    store: Arc<dyn KvStore>,
    prefix: String,
}

impl ProfileStore {
    pub fn new(store: Arc<dyn KvStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    fn scoped_key(&self, name: &str, user_id: Option<&str>) -> String {
        match user_id {
            Some(id) => format!("{}{name}_{id}", self.prefix),
            None => self.key(name),
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(error = %err, profile.key = key, "profile read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(error = %err, profile.key = key, "profile record undecodable");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(WordbookError::from)
            .and_then(|encoded| self.store.set(key, &encoded));
        if let Err(err) = result {
            tracing::warn!(error = %err, profile.key = key, "profile write failed");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            tracing::warn!(error = %err, profile.key = key, "profile remove failed");
        }
    }

    // Language

    /// Stored UI language code, if one was saved.
    #[must_use]
    pub fn language(&self) -> Option<String> {
        let key = self.key(LANGUAGE_KEY);
        match self.store.get(&key) {
            Ok(language) => language,
            Err(err) => {
                tracing::warn!(error = %err, profile.key = %key, "language read failed");
                None
            }
        }
    }

    /// Persist the UI language. Unlike the other profile writes this one
    /// reports failure, since the caller has to revert the visible switch.
    pub fn save_language(&self, language: &str) -> Result<()> {
        let key = self.key(LANGUAGE_KEY);
        self.store.set(&key, language).inspect_err(|err| {
            tracing::error!(error = %err, profile.key = %key, "language write failed");
        })
    }

    // Favorites

    #[must_use]
    pub fn favorites(&self, user_id: Option<&str>) -> Vec<String> {
        self.read_json(&self.scoped_key(FAVORITES_KEY, user_id))
            .unwrap_or_default()
    }

    pub fn save_favorites(&self, favorites: &[String], user_id: Option<&str>) {
        self.write_json(&self.scoped_key(FAVORITES_KEY, user_id), favorites);
    }

    /// Append `word` unless it is already a favorite.
    pub fn add_favorite(&self, word: &str, user_id: Option<&str>) {
        let mut favorites = self.favorites(user_id);
        if favorites.iter().any(|favorite| favorite == word) {
            return;
        }
        favorites.push(word.to_string());
        self.save_favorites(&favorites, user_id);
    }

    pub fn remove_favorite(&self, word: &str, user_id: Option<&str>) {
        let mut favorites = self.favorites(user_id);
        favorites.retain(|favorite| favorite != word);
        self.save_favorites(&favorites, user_id);
    }

    #[must_use]
    pub fn is_favorite(&self, word: &str, user_id: Option<&str>) -> bool {
        self.favorites(user_id).iter().any(|favorite| favorite == word)
    }

    // History

    /// Looked-up words, most recent first.
    #[must_use]
    pub fn history(&self, user_id: Option<&str>) -> Vec<String> {
        self.read_json(&self.scoped_key(HISTORY_KEY, user_id))
            .unwrap_or_default()
    }

    pub fn save_history(&self, history: &[String], user_id: Option<&str>) {
        self.write_json(&self.scoped_key(HISTORY_KEY, user_id), history);
    }

    /// Move `word` to the front of the history, keeping at most
    /// [`HISTORY_LIMIT`] distinct entries.
    pub fn add_to_history(&self, word: &str, user_id: Option<&str>) {
        let mut history = self.history(user_id);
        history.retain(|item| item != word);
        history.insert(0, word.to_string());
        history.truncate(HISTORY_LIMIT);
        self.save_history(&history, user_id);
    }

    pub fn clear_history(&self, user_id: Option<&str>) {
        self.remove(&self.scoped_key(HISTORY_KEY, user_id));
    }

    // User

    pub fn save_user(&self, id: &str, email: &str) {
        let user = UserProfile {
            id: id.to_string(),
            email: email.to_string(),
        };
        self.write_json(&self.key(USER_KEY), &user);
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.read_json(&self.key(USER_KEY))
    }

    pub fn clear_user(&self) {
        self.remove(&self.key(USER_KEY));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryStore;

    fn profile() -> (ProfileStore, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ProfileStore::new(store.clone(), "@app:"), store)
    }

    #[test]
    fn favorites_are_deduplicated_and_scoped() {
        let (profile, store) = profile();
        profile.add_favorite("cat", None);
        profile.add_favorite("dog", None);
        profile.add_favorite("cat", None);
        profile.add_favorite("owl", Some("u1"));

        assert_eq!(profile.favorites(None), vec!["cat", "dog"]);
        assert_eq!(profile.favorites(Some("u1")), vec!["owl"]);
        assert!(profile.is_favorite("dog", None));
        assert!(!profile.is_favorite("dog", Some("u1")));
        assert!(store.contains("@app:favorites_u1").expect("contains"));

        profile.remove_favorite("cat", None);
        assert_eq!(profile.favorites(None), vec!["dog"]);
    }

    #[test]
    fn history_moves_repeats_to_front_and_caps() {
        let (profile, _) = profile();
        profile.add_to_history("a", None);
        profile.add_to_history("b", None);
        profile.add_to_history("a", None);
        assert_eq!(profile.history(None), vec!["a", "b"]);

        for i in 0..150 {
            profile.add_to_history(&format!("w{i}"), None);
        }
        let history = profile.history(None);
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0], "w149");
        assert_eq!(history[99], "w50");

        profile.clear_history(None);
        assert!(profile.history(None).is_empty());
    }

    #[test]
    fn user_and_language_roundtrip() {
        let (profile, _) = profile();
        assert!(profile.user().is_none());
        assert!(profile.language().is_none());

        profile.save_user("u1", "ada@example.com");
        profile.save_language("fr").expect("save language");
        assert_eq!(
            profile.user(),
            Some(UserProfile {
                id: "u1".into(),
                email: "ada@example.com".into(),
            })
        );
        assert_eq!(profile.language().as_deref(), Some("fr"));

        profile.clear_user();
        assert!(profile.user().is_none());
    }

    #[test]
    fn corrupt_records_read_as_empty() {
        let (profile, store) = profile();
        store.set("@app:favorites", "not json").expect("seed");
        store.set("@app:user", "{}").expect("seed");
        assert!(profile.favorites(None).is_empty());
        assert!(profile.user().is_none());

        // The next write replaces the corrupt record.
        profile.add_favorite("cat", None);
        assert_eq!(profile.favorites(None), vec!["cat"]);
    }
}
