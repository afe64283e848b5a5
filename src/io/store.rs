//! String key-value storage backing the word index, definition cache and profile.
//!
//! Every persisted record in the crate goes through [`KvStore`]. A single `set`
//! replaces a record as a whole; readers never observe a partially written value.

use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use atomic_write_file::AtomicWriteFile;

use crate::error::{Result, WordbookError};

const RECORD_EXTENSION: &str = "json";

pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().map_or(0, |records| records.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let records = self
            .records
            .read()
            .map_err(|_| WordbookError::storage(key, "memory store lock poisoned"))?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| WordbookError::storage(key, "memory store lock poisoned"))?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| WordbookError::storage(key, "memory store lock poisoned"))?;
        records.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let records = self
            .records
            .read()
            .map_err(|_| WordbookError::storage("*", "memory store lock poisoned"))?;
        Ok(records.keys().cloned().collect())
    }
}

/// One file per key under a root directory.
///
/// File names are the hex-encoded key, so arbitrary key text (prefixes with
/// `@` and `:`, user-supplied words) maps onto portable names. Writes land in a
/// temporary file that is renamed over the target on commit.
///
/// Keys longer than [`FileStore::MAX_KEY_BYTES`] would exceed common file-name
/// limits once encoded. Writing one fails with a storage error; reading or
/// removing one behaves as if the key were absent.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Longest key, in bytes, whose encoded file name and temporary write name
    /// both stay within a 255-byte file-name limit.
    pub const MAX_KEY_BYTES: usize = 100;

    /// Open (and create if needed) a store rooted at `root`.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs_err::create_dir_all(&root)?;
        tracing::debug!(store.root = %root.display(), "file store opened");
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        if key.len() > Self::MAX_KEY_BYTES {
            return None;
        }
        Some(
            self.root
                .join(format!("{}.{RECORD_EXTENSION}", hex::encode(key.as_bytes()))),
        )
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(path) = self.path_for(key) else {
            return Ok(None);
        };
        match fs_err::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(WordbookError::storage(key, err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let Some(path) = self.path_for(key) else {
            return Err(WordbookError::storage(
                key,
                format_args!("key exceeds {} bytes", Self::MAX_KEY_BYTES),
            ));
        };
        let mut file =
            AtomicWriteFile::open(&path).map_err(|err| WordbookError::storage(key, err))?;
        file.write_all(value.as_bytes())
            .map_err(|err| WordbookError::storage(key, err))?;
        file.commit().map_err(|err| WordbookError::storage(key, err))?;
        tracing::trace!(store.key = key, store.bytes = value.len(), "record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let Some(path) = self.path_for(key) else {
            return Ok(());
        };
        match fs_err::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(WordbookError::storage(key, err)),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs_err::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            // Foreign files and leftover temp files do not decode; skip them.
            if let Some(key) = hex::decode(stem)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_basic_ops() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("a", "1").expect("set");
        store.set("a", "2").expect("overwrite");
        assert_eq!(store.get("a").expect("get").as_deref(), Some("2"));
        assert!(store.contains("a").expect("contains"));
        store.remove("a").expect("remove");
        store.remove("a").expect("remove missing");
        assert_eq!(store.get("a").expect("get").as_deref(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_roundtrips_awkward_keys() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileStore::open(dir.path().join("kv")).expect("open");

        let key = "@dictionary_app:cache:Hello World/../x";
        store.set(key, r#"{"k":1}"#).expect("set");
        assert_eq!(store.get(key).expect("get").as_deref(), Some(r#"{"k":1}"#));
        assert_eq!(store.keys().expect("keys"), vec![key.to_string()]);

        // Only the hex file lives in the root; nothing escaped it.
        let entries: Vec<_> = std::fs::read_dir(store.root()).expect("read_dir").collect();
        assert_eq!(entries.len(), 1);

        store.remove(key).expect("remove");
        assert!(store.get(key).expect("get after remove").is_none());
        store.remove(key).expect("remove is idempotent");
    }

    #[test]
    fn file_store_ignores_foreign_files() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        std::fs::write(dir.path().join("notes.txt"), "hi").expect("write foreign");
        std::fs::write(dir.path().join("zz-not-hex.json"), "{}").expect("write foreign json");
        store.set("k", "v").expect("set");
        assert_eq!(store.keys().expect("keys"), vec!["k".to_string()]);
    }

    #[test]
    fn file_store_rejects_keys_too_long_for_a_file_name() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");

        let longest = "k".repeat(FileStore::MAX_KEY_BYTES);
        store.set(&longest, "fits").expect("set at the limit");
        assert_eq!(store.get(&longest).expect("get").as_deref(), Some("fits"));

        let too_long = format!("@dictionary_app:cache:{}", "w".repeat(150));
        let err = store.set(&too_long, "[]").expect_err("over the limit");
        assert!(matches!(err, WordbookError::Storage { ref key, .. } if *key == too_long));
        assert!(store.get(&too_long).expect("get").is_none());
        store.remove(&too_long).expect("remove");
        assert_eq!(store.keys().expect("keys"), vec![longest]);
    }

    #[test]
    fn arc_store_delegates() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        store.set("x", "y").expect("set through arc");
        assert_eq!(store.get("x").expect("get").as_deref(), Some("y"));
    }
}
