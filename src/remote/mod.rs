//! Network collaborators: the definition endpoint and the word-list document.
//!
//! The cache and index only see the two traits below, so tests and offline
//! builds can substitute any source.

use std::collections::HashSet;
use std::fmt;

use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::error::Result;
use crate::types::DefinitionPayload;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpClient;

/// Looks up definitions for a single, already normalized word.
pub trait DefinitionSource: Send + Sync {
    /// Fails with `WordNotFound` when the service has no entry for `word`, and
    /// with `RequestFailed` for every other unsuccessful exchange.
    fn fetch_definition(&self, word: &str) -> Result<Vec<DefinitionPayload>>;
}

/// Produces the full headword list in dataset order.
pub trait WordListSource: Send + Sync {
    fn fetch_word_list(&self) -> Result<Vec<String>>;
}

/// A word-list document: an object keyed by word, the upstream
/// `words_dictionary.json` shape, or a plain array of strings.
struct WordListDocument(Vec<String>);

impl<'de> Deserialize<'de> for WordListDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(WordListVisitor)
    }
}

struct WordListVisitor;

impl<'de> Visitor<'de> for WordListVisitor {
    type Value = WordListDocument;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object keyed by word or an array of words")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut words = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut seen = HashSet::with_capacity(words.capacity());
        while let Some(word) = map.next_key::<String>()? {
            map.next_value::<IgnoredAny>()?;
            // A repeated key keeps the position of its first occurrence.
            if seen.insert(word.clone()) {
                words.push(word);
            }
        }
        Ok(WordListDocument(words))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut words = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(word) = seq.next_element::<String>()? {
            words.push(word);
        }
        Ok(WordListDocument(words))
    }
}

/// Decode a word-list document. Object keys and array elements both come back
/// in document order.
pub fn parse_word_list(raw: &str) -> Result<Vec<String>> {
    let WordListDocument(words) = serde_json::from_str(raw)?;
    Ok(words)
}
