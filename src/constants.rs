//! Defaults and fixed limits shared across the crate.

/// Remote definition endpoint; the word is appended as a single path segment.
pub const DEFAULT_API_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";
/// Static word-list document, a JSON object keyed by word.
pub const DEFAULT_WORDS_DICTIONARY_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/master/words_dictionary.json";

pub const DEFAULT_CACHE_PREFIX: &str = "@dictionary_app:cache:";
pub const DEFAULT_WORDS_STORAGE_KEY: &str = "@dictionary_app:words";
pub const DEFAULT_STORAGE_PREFIX: &str = "@dictionary_app:";
pub const DEFAULT_CACHE_TTL_HOURS: u64 = 24;

/// Entries per persisted word-index chunk.
pub const WORD_CHUNK_SIZE: usize = 500;
/// Suffix of the record holding the number of persisted chunks.
pub const CHUNK_COUNT_SUFFIX: &str = "_count";
/// Infix of each chunk record, followed by the zero-based chunk number.
pub const CHUNK_KEY_INFIX: &str = "_chunk_";

/// Suggested `limit` for prefix search.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

// Bounds applied to definition payloads before they are cached.
pub const MAX_CACHED_MEANINGS: usize = 3;
pub const MAX_CACHED_DEFINITIONS: usize = 3;
pub const MAX_CACHED_SYNONYMS: usize = 5;
pub const MAX_CACHED_ANTONYMS: usize = 5;

/// Most recent lookups kept in a history list.
pub const HISTORY_LIMIT: usize = 100;
