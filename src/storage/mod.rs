mod kv_store;
mod repository;

pub use kv_store::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use repository::Repository;
