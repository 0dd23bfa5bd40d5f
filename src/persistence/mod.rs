//! Key-value persistence seam
//!
//! The game only ever stores small JSON blobs under fixed keys. The browser
//! build writes them to LocalStorage; native builds and tests keep them in
//! memory. Callers treat every failure as non-fatal.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No backing store (private browsing, no window)
    #[error("storage unavailable")]
    Unavailable,
    /// The store refused the write (quota, permissions)
    #[error("storage rejected write: {0}")]
    Rejected(String),
    /// Stored value could not be decoded
    #[error("stored value is corrupt: {0}")]
    Corrupt(String),
}

/// String key-value store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read and decode a JSON value; missing keys are `Ok(None)`
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get_item(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(e.to_string())),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: serde::Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|e| StoreError::Rejected(e.to_string()))?;
    store.set_item(key, &json)
}
