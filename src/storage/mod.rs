//! Durable storage for rounds and lifetime stats

mod error;
mod kv;
mod repository;

pub use error::StorageError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repository::{GameRepository, History, ROUND_KEY_PREFIX, STATS_KEY, round_key};
