use crate::error::StoreError;
use ahash::AHashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key/value contract every persisted record goes through.
///
/// Keys are logical names (`flows`, `globalVariables`, `draft_<id>`) and
/// values are JSON documents. Implementations are last-write-wins; there is
/// a single logical writer per process.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage for tests and short-lived embeddings.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<AHashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock(key)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock(key)?.remove(key);
        Ok(())
    }
}

impl MemoryStorage {
    fn lock(
        &self,
        key: &str,
    ) -> Result<std::sync::MutexGuard<'_, AHashMap<String, String>>, StoreError> {
        self.entries.lock().map_err(|_| StoreError::Io {
            key: key.to_string(),
            message: "storage lock poisoned".to_string(),
        })
    }
}

/// Durable storage backed by one JSON file per key under a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (and if necessary creates) the storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            key: dir.display().to_string(),
            message: format!("could not create storage directory: {}", e),
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value).map_err(|e| StoreError::Io {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
