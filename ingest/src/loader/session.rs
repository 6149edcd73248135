use crate::record::BenchmarkRecord;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// key under which the normalized result set is cached
pub const DATA_KEY: &str = "data";

/// persisted entries are named `<key>.session.json`, apart from any results document
/// kept in the same directory
const ENTRY_SUFFIX: &str = ".session.json";

/// shared, immutable view of a cached result set
pub type RecordSet = Arc<[BenchmarkRecord]>;

static GLOBAL: Lazy<SessionStore> = Lazy::new(SessionStore::in_memory);

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to remove session entry {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

/// Session scoped key/value storage for result sets
///
/// Entries always live in memory for the lifetime of the store. With a session directory
/// every entry is additionally written to `<dir>/<key>.session.json`, so a later process pointed
/// at the same directory continues the session instead of fetching again.
#[derive(Debug)]
pub struct SessionStore {
    entries: Mutex<BTreeMap<String, RecordSet>>,
    directory: Option<PathBuf>,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            directory: None,
        }
    }

    pub fn persistent(directory: impl Into<PathBuf>) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            directory: Some(directory.into()),
        }
    }

    /// process wide, memory only store
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<RecordSet> {
        let mut entries = self.entries.lock();

        if let Some(records) = entries.get(key) {
            return Some(records.clone());
        }

        let path = self.entry_path(key)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return None,
            Err(error) => {
                warn!(path = ?path, error = ?error, "Failed to read session entry, ignoring it");
                return None;
            }
        };

        match serde_json::from_str::<Vec<BenchmarkRecord>>(&content) {
            Ok(records) => {
                debug!(path = ?path, records = records.len(), "Restored session entry");
                let records = RecordSet::from(records);
                entries.insert(key.to_owned(), records.clone());

                Some(records)
            }
            Err(error) => {
                warn!(path = ?path, error = %error, "Session entry is corrupt, ignoring it");
                None
            }
        }
    }

    /// store a result set under `key`, replacing any previous entry
    pub fn set(&self, key: &str, records: Vec<BenchmarkRecord>) -> RecordSet {
        let records = RecordSet::from(records);

        if let Some(path) = self.entry_path(key) {
            match persist(&path, &records) {
                Ok(()) => debug!(path = ?path, "Persisted session entry"),
                Err(error) => warn!(
                    path = ?path,
                    error = ?error,
                    "Failed to persist session entry, keeping it in memory only"
                ),
            }
        }

        self.entries.lock().insert(key.to_owned(), records.clone());

        records
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
            || self.entry_path(key).map_or(false, |path| path.is_file())
    }

    /// end the session: drop every entry in memory and on disk
    ///
    /// Only files this store writes are removed, anything else in the directory is left
    /// alone.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut keys = {
            let mut entries = self.entries.lock();
            let keys: Vec<String> = entries.keys().cloned().collect();
            entries.clear();
            keys
        };

        // entries of an earlier process are only known on disk
        if !keys.iter().any(|key| key == DATA_KEY) {
            keys.push(DATA_KEY.to_owned());
        }

        for key in &keys {
            let Some(path) = self.entry_path(key) else {
                continue;
            };

            for path in [staging_path(&path), path] {
                match fs::remove_file(&path) {
                    Ok(()) => debug!(path = ?path, "Removed session entry"),
                    Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                    Err(error) => return Err(SessionError::Io { path, error }),
                }
            }
        }

        info!(entries = keys.len(), "Cleared session");

        Ok(())
    }

    /// file an entry is persisted in, `None` for memory only stores
    pub fn entry_path(&self, key: &str) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|directory| directory.join(format!("{key}{ENTRY_SUFFIX}")))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".partial");
    PathBuf::from(staging)
}

fn persist(path: &Path, records: &[BenchmarkRecord]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string(records)?;
    let staging = staging_path(path);

    // rename is atomic, readers never observe a half written entry
    fs::write(&staging, content)?;
    fs::rename(&staging, path)
}
