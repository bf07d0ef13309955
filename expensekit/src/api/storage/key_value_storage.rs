use std::{collections::HashMap, fmt::Display, sync::Arc};

use tokio::sync::Mutex;

/// Failure to write a value to the backing store
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serialize(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "Storage I/O error: {}", e),
            StorageError::Serialize(e) => write!(f, "Failed to serialize storage data: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialize(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Trait for string key-value persistence (the expense list lives under a single key)
#[async_trait::async_trait]
pub trait KeyValueStorageTrait: Send + Sync {
    /// Get the value stored under a key, if any
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value under a key, replacing the previous one
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// In-memory key-value storage, lost when the process exits
#[derive(Clone, Default)]
pub struct MemoryKeyValueStorage {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored key-value pair
    pub(crate) async fn entries(&self) -> HashMap<String, String> {
        self.data.lock().await.clone()
    }

    /// Replace all stored pairs at once
    pub(crate) async fn replace_entries(&self, entries: HashMap<String, String>) {
        *self.data.lock().await = entries;
    }
}

#[async_trait::async_trait]
impl KeyValueStorageTrait for MemoryKeyValueStorage {
    async fn get(&self, key: &str) -> Option<String> {
        let storage_guard = self.data.lock().await;
        storage_guard.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut storage_guard = self.data.lock().await;
        storage_guard.insert(key.to_string(), value);
        Ok(())
    }
}
