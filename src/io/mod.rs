//! Persistence primitives: key-value stores and chunked list records.

pub mod chunked;
pub mod store;

pub use chunked::{chunk_count, read_chunked, write_chunked};
pub use store::{FileStore, KvStore, MemoryStore};
