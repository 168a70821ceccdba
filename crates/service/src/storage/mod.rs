//! Storage abstractions for the service layer
//!
//! `StorageBackend` is the raw string key/value substrate (memory or a JSON
//! file). `KvStore` sits on top of it, adds JSON encoding and typed accessors
//! for the reserved collections, and turns every failure into a log line.

pub mod backend;
pub mod memory;
pub mod file;
pub mod keys;
pub mod kv_store;

pub use backend::StorageBackend;
pub use file::FileBackend;
pub use keys::{Collection, StorageKeys};
pub use kv_store::KvStore;
pub use memory::MemoryBackend;
