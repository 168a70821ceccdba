use crate::errors::StorageError;

/// Synchronous string-keyed, string-valued storage.
/// Implementations can be in-memory, file-backed, or anything with the same
/// whole-value get/set semantics as browser local storage.
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Bytes a map would occupy after writing `value` under `key`.
/// Keys and values both count, like browser storage quotas.
pub(crate) fn size_after_write<'a, I>(entries: I, key: &str, value: &str) -> usize
where
    I: Iterator<Item = (&'a str, &'a str)>,
{
    let others: usize = entries.filter(|(k, _)| *k != key).map(|(k, v)| k.len() + v.len()).sum();
    others + key.len() + value.len()
}
