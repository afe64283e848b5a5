//! Dictionary data layer: word index, definition cache, profile, and the
//! `Dictionary` session that ties them together.

pub mod cache;
pub mod index;
pub mod profile;
pub mod session;

pub use cache::{CacheOptions, CachedDefinition, DefinitionCache, normalize_word};
pub use index::WordIndex;
pub use profile::ProfileStore;
pub use session::Dictionary;
