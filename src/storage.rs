//! Persistence of the chosen locale.
//!
//! A [`PreferenceStore`] is a tiny key/value store. The localizer writes one
//! entry (the active locale, under the configured storage key) and reads it
//! back on startup.

use std::collections::HashMap;
use std::io;
use std::path::{ Path, PathBuf };
use std::sync::{ Arc, Mutex };

use serde::{ Deserialize, Serialize };

/// Key under which the active locale is stored by default.
pub const DEFAULT_STORAGE_KEY: &str = "uiLanguage";

/// Key/value storage for user preferences.
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory store.
///
/// Clones share the same map, so a store handed to a new localizer sees what
/// an earlier one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries
            .lock()
            .map_err(|_| io::Error::other("preference store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// On-disk layout of a [`FileStore`]: one flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct PreferenceFile {
    entries: HashMap<String, String>,
}

/// Store backed by a JSON object file, rewritten on every save.
///
/// A missing or unreadable file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> io::Result<PreferenceFile> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) =>
                serde_json
                    ::from_str(&content)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PreferenceFile::default()),
            Err(e) => Err(e),
        }
    }
}

impl PreferenceStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.read_file()
            .ok()
            .and_then(|mut file| file.entries.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> io::Result<()> {
        // Unrelated entries survive; a corrupt file is replaced.
        let mut file = self.read_file().unwrap_or_default();
        file.entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&file).map_err(io::Error::other)?;
        std::fs::write(&self.path, json)
    }
}

/// Which store the plugin opens for the locale preference.
#[derive(Debug, Clone)]
pub enum PreferenceBackend {
    Memory(MemoryStore),
    File(PathBuf),
}

impl Default for PreferenceBackend {
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Memory(MemoryStore::new())
        } else {
            Self::File(PathBuf::from("preferences.json"))
        }
    }
}

impl PreferenceBackend {
    pub fn open(&self) -> Box<dyn PreferenceStore> {
        match self {
            Self::Memory(store) => Box::new(store.clone()),
            Self::File(path) => Box::new(FileStore::new(path.clone())),
        }
    }
}
