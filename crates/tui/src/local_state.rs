use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Key under which the bearer token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Small persisted key-value store, the terminal counterpart of browser
/// local storage.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalState {
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl LocalState {
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }
}

/// [`LocalState`] backed by a JSON file, written through on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: Mutex<LocalState>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = LocalState::load(&path)?;
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.insert(key.to_string(), value.to_string());
        state.save(&self.path)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.entries.remove(key).is_some() {
            state.save(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore(Mutex<BTreeMap<String, String>>);

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.0
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.0.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("finboard_tui_{}", std::process::id()))
            .join(format!("{name}.json"))
    }

    #[test]
    fn missing_file_is_empty() {
        let store = FileStore::open(temp_path("missing")).unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
    }

    #[test]
    fn token_survives_reopen_and_can_be_removed() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let store = FileStore::open(&path).unwrap();
        store.set(ACCESS_TOKEN_KEY, "abc.def").unwrap();
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("abc.def"));
        store.remove(ACCESS_TOKEN_KEY).unwrap();
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let path = temp_path("corrupted");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        assert!(FileStore::open(&path).is_err());
        let _ = fs::remove_file(&path);
    }
}
