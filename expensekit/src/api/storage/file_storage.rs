use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::PathBuf, sync::Arc};
use tokio::{fs, sync::Mutex};

use super::key_value_storage::{KeyValueStorageTrait, MemoryKeyValueStorage, StorageError};

/// Serializable structure for the whole key-value document saved as YAML
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StorageData {
    /// Maps storage key to its string value
    #[serde(default)]
    pub entries: HashMap<String, String>,
}

/// Persistent key-value storage backed by a single YAML file
/// The file is read lazily on first access and rewritten on every `set`
#[derive(Clone)]
pub struct FileKeyValueStorage {
    // Path of the YAML document
    storage_file: PathBuf,
    // In-memory mirror of the file contents
    memory_storage: MemoryKeyValueStorage,
    // Whether the file has been read yet
    loaded: Arc<Mutex<bool>>,
}

impl FileKeyValueStorage {
    /// Create a new persistent storage writing to the specified file
    pub fn new(storage_file: PathBuf) -> Self {
        Self {
            storage_file,
            memory_storage: MemoryKeyValueStorage::new(),
            loaded: Arc::new(Mutex::new(false)),
        }
    }

    /// Read the document from disk, treating a missing or unreadable file as empty
    async fn load_entries(&self) -> HashMap<String, String> {
        match fs::read_to_string(&self.storage_file).await {
            Ok(content) => match serde_yaml::from_str::<StorageData>(&content) {
                Ok(data) => data.entries,
                Err(e) => {
                    log::warn!(
                        "Ignoring unreadable storage file {:?}: {}",
                        self.storage_file,
                        e
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        }
    }

    /// Write the document to disk
    async fn save_entries(&self, entries: HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_yaml::to_string(&StorageData { entries })
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        fs::write(&self.storage_file, content).await?;
        Ok(())
    }

    /// Ensure the file is loaded into memory (lazy loading)
    async fn ensure_loaded(&self) {
        // Hold the flag while reading so two callers can't load twice
        let mut loaded_guard = self.loaded.lock().await;
        if *loaded_guard {
            return;
        }
        log::info!("Loading storage file {:?}", self.storage_file);
        let entries = self.load_entries().await;
        self.memory_storage.replace_entries(entries).await;
        *loaded_guard = true;
    }
}

#[async_trait::async_trait]
impl KeyValueStorageTrait for FileKeyValueStorage {
    async fn get(&self, key: &str) -> Option<String> {
        self.ensure_loaded().await;
        self.memory_storage.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.ensure_loaded().await;
        self.memory_storage.set(key, value).await?;

        // Save updated entries to disk
        let entries = self.memory_storage.entries().await;
        self.save_entries(entries).await
    }
}
