//! Chunked persistence for lists too large for a single storage record.
//!
//! Layout for a base key `K` holding `N` chunks:
//!
//! ```text
//! K_count      -> "N"
//! K_chunk_0    -> JSON array, items [0, chunk_size)
//! ...
//! K_chunk_N-1  -> JSON array, remaining items
//! ```
//!
//! Older data may hold the whole list as one JSON array under `K` itself; that
//! record is read when no count record exists.

use crate::constants::{CHUNK_COUNT_SUFFIX, CHUNK_KEY_INFIX};
use crate::error::{Result, WordbookError};
use crate::io::store::KvStore;

#[must_use]
pub fn count_key(base: &str) -> String {
    format!("{base}{CHUNK_COUNT_SUFFIX}")
}

#[must_use]
pub fn chunk_key(base: &str, index: usize) -> String {
    format!("{base}{CHUNK_KEY_INFIX}{index}")
}

/// Number of chunks needed for `total` items.
#[must_use]
pub fn chunk_count(total: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    total.div_ceil(chunk_size)
}

/// Persist `items` under `base` in chunks of `chunk_size`. Returns the chunk count.
///
/// Chunks are written before the count record, so a reader never sees a count
/// that points past what this call wrote.
pub fn write_chunked<S>(store: &S, base: &str, items: &[String], chunk_size: usize) -> Result<usize>
where
    S: KvStore + ?Sized,
{
    if chunk_size == 0 {
        return Err(WordbookError::InvalidConfig {
            reason: "chunk_size must be non-zero".into(),
        });
    }

    let chunks = chunk_count(items.len(), chunk_size);
    for (index, chunk) in items.chunks(chunk_size).enumerate() {
        let encoded = serde_json::to_string(chunk)?;
        store.set(&chunk_key(base, index), &encoded)?;
    }
    store.set(&count_key(base), &chunks.to_string())?;

    tracing::debug!(
        chunked.key = base,
        chunked.items = items.len(),
        chunked.chunks = chunks,
        "list persisted"
    );
    Ok(chunks)
}

/// Reassemble a list written by [`write_chunked`], or a legacy single record.
///
/// Returns `Ok(None)` when neither layout is present. A chunk that the count
/// promises but the store lacks is skipped, leaving a shorter list.
pub fn read_chunked<S>(store: &S, base: &str) -> Result<Option<Vec<String>>>
where
    S: KvStore + ?Sized,
{
    let count_key = count_key(base);
    let Some(raw_count) = store.get(&count_key)? else {
        return read_legacy(store, base);
    };
    let chunks: usize = raw_count
        .trim()
        .parse()
        .map_err(|err| WordbookError::storage(&count_key, format!("bad chunk count: {err}")))?;

    let mut items = Vec::new();
    for index in 0..chunks {
        let key = chunk_key(base, index);
        match store.get(&key)? {
            Some(raw) => {
                let chunk: Vec<String> = serde_json::from_str(&raw)?;
                items.extend(chunk);
            }
            None => {
                tracing::warn!(
                    chunked.key = base,
                    chunked.index = index,
                    chunked.expected = chunks,
                    "chunk missing; list will be shorter than persisted"
                );
            }
        }
    }
    Ok(Some(items))
}

fn read_legacy<S>(store: &S, base: &str) -> Result<Option<Vec<String>>>
where
    S: KvStore + ?Sized,
{
    match store.get(base)? {
        Some(raw) => {
            let items: Vec<String> = serde_json::from_str(&raw)?;
            tracing::debug!(chunked.key = base, chunked.items = items.len(), "legacy record read");
            Ok(Some(items))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;

    fn sample(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i:05}")).collect()
    }

    #[test]
    fn roundtrip_splits_into_expected_chunks() {
        let store = MemoryStore::new();
        let words = sample(1200);

        let chunks = write_chunked(&store, "words", &words, 500).expect("write");
        assert_eq!(chunks, 3);
        assert_eq!(store.get("words_count").expect("count").as_deref(), Some("3"));

        let last: Vec<String> =
            serde_json::from_str(&store.get("words_chunk_2").expect("get").expect("chunk 2"))
                .expect("decode");
        assert_eq!(last.len(), 200);

        let restored = read_chunked(&store, "words").expect("read").expect("present");
        assert_eq!(restored, words);
    }

    #[test]
    fn exact_multiple_and_empty_lists() {
        let store = MemoryStore::new();
        assert_eq!(write_chunked(&store, "a", &sample(1000), 500).expect("write"), 2);
        assert_eq!(read_chunked(&store, "a").expect("read").expect("present").len(), 1000);

        assert_eq!(write_chunked(&store, "empty", &[], 500).expect("write"), 0);
        assert_eq!(read_chunked(&store, "empty").expect("read"), Some(Vec::new()));
    }

    #[test]
    fn absent_list_reads_as_none() {
        let store = MemoryStore::new();
        assert!(read_chunked(&store, "nothing").expect("read").is_none());
    }

    #[test]
    fn legacy_single_record_is_used_without_count() {
        let store = MemoryStore::new();
        store
            .set("words", r#"["aa","ab","ac"]"#)
            .expect("seed legacy record");
        let restored = read_chunked(&store, "words").expect("read").expect("present");
        assert_eq!(restored, vec!["aa", "ab", "ac"]);
    }

    #[test]
    fn missing_chunk_shortens_list() {
        let store = MemoryStore::new();
        let words = sample(1200);
        write_chunked(&store, "words", &words, 500).expect("write");
        store.remove("words_chunk_1").expect("drop middle chunk");

        let restored = read_chunked(&store, "words").expect("read").expect("present");
        assert_eq!(restored.len(), 700);
        assert_eq!(restored[..500], words[..500]);
        assert_eq!(restored[500..], words[1000..]);
    }

    #[test]
    fn garbage_count_is_a_storage_error() {
        let store = MemoryStore::new();
        store.set("words_count", "three").expect("seed");
        let err = read_chunked(&store, "words").expect_err("bad count");
        assert!(matches!(err, WordbookError::Storage { .. }));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let store = MemoryStore::new();
        assert!(write_chunked(&store, "w", &sample(3), 0).is_err());
        assert_eq!(chunk_count(10, 0), 0);
        assert_eq!(chunk_count(1001, 500), 3);
    }
}
