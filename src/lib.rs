#![deny(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(
    test,
    allow(
        clippy::useless_vec,
        clippy::uninlined_format_args,
        clippy::cast_possible_truncation
    )
)]
#![allow(clippy::module_name_repetitions)]
//
// Documentation lints: internal helpers are self-describing; public APIs carry docs
// where the behaviour is not obvious from the signature.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
//
// Builders and accessors.
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::len_without_is_empty)] // WordIndex::len reports loaded words, not capacity

//! Client-side data layer for a dictionary app.
//!
//! - [`WordIndex`]: the headword list, persisted in chunks, with pagination and
//!   prefix search.
//! - [`DefinitionCache`]: remote definition lookups behind a TTL-bound cache.
//! - [`ProfileStore`]: favorites, history, signed-in user and UI language.
//! - [`Dictionary`]: the session handle that owns all of the above.
//!
//! ```ignore
//! use wordbook_core::{Dictionary, WordbookConfig};
//!
//! let dict = Dictionary::open(WordbookConfig::from_env()?)?;
//! let first_page = dict.index().words_paginated(0, 20);
//! let matches = dict.index().search_words("ser", 20);
//! let definitions = dict.lookup("serendipity")?;
//! ```

/// The wordbook-core crate version (matches `Cargo.toml`).
pub const WORDBOOK_CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod clock;
pub mod constants;
pub mod dictionary;
pub mod error;
pub mod io;
pub mod remote;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use constants::*;
pub use dictionary::{
    CacheOptions, CachedDefinition, DefinitionCache, Dictionary, ProfileStore, WordIndex,
    normalize_word,
};
pub use error::{Result, WordbookError};
pub use io::{FileStore, KvStore, MemoryStore, chunk_count, read_chunked, write_chunked};
#[cfg(feature = "http")]
pub use remote::HttpClient;
pub use remote::{DefinitionSource, WordListSource, parse_word_list};
pub use types::{
    DefinitionPayload, License, Meaning, Phonetic, Sense, TrimLimits, UserProfile, WordbookConfig,
    WordbookConfigBuilder,
};
