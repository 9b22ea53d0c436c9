//! Key/value persistence backends
//!
//! Settings and the high score are small text documents stored under fixed
//! keys:
//! - `FileStore`: one file per key in a directory (native)
//! - `LocalStore`: browser LocalStorage (wasm)
//! - `MemoryStore`: in-process map (tests, headless runs)

use std::collections::HashMap;
use std::io;
#[cfg(not(target_arch = "wasm32"))]
use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Key for the settings document
pub const SETTINGS_KEY: &str = "snake_settings.json";
/// Key for the high score
pub const HIGH_SCORE_KEY: &str = "snake_highscore.txt";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage is not available")]
    Unavailable,
    #[error("storage rejected the request: {0}")]
    Rejected(String),
}

/// Minimal text storage used by settings and high scores
pub trait Storage {
    /// `Ok(None)` when nothing was stored under `key`
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Files in a directory, one per key
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Write to a temporary sibling, then rename over the target
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path(key);
        let tmp = self.path(&format!("{key}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - settings will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        let storage = self.storage.as_ref().ok_or(PersistError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| PersistError::Rejected(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let storage = self.storage.as_ref().ok_or(PersistError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| PersistError::Rejected(format!("{e:?}")))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "snake-arcade-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.read("a").unwrap().is_none());
        store.write("a", "1").unwrap();
        assert_eq!(store.read("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let store = FileStore::new(scratch_dir("missing"));
        assert!(store.read(SETTINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = scratch_dir("overwrite");
        let mut store = FileStore::new(&dir);
        store.write(HIGH_SCORE_KEY, "3").unwrap();
        store.write(HIGH_SCORE_KEY, "12").unwrap();

        assert_eq!(store.read(HIGH_SCORE_KEY).unwrap().as_deref(), Some("12"));
        assert!(!dir.join(format!("{HIGH_SCORE_KEY}.tmp")).exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
