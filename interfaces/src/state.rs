use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const FAVORITES_KEY: &str = "favorites";
pub const PREFERENCES_KEY: &str = "preferences";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot storage unavailable: {0}")]
    Unavailable(String),

    #[error("snapshot IO error: {0}")]
    Io(#[from] io::Error),
}

/// Keyed blob store backing the session stores.
///
/// Snapshots are opaque strings; the stores decide their shape.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, key: &str, snapshot: &str) -> Result<(), SnapshotError>;

    /// `Ok(None)` means nothing has been saved under `key` yet.
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;
}

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, snapshot: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), snapshot.to_owned());
        }
        self
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&self, key: &str, snapshot: &str) -> Result<(), SnapshotError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SnapshotError::Unavailable("memory store lock poisoned".to_owned()))?;
        entries.insert(key.to_owned(), snapshot.to_owned());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| SnapshotError::Unavailable("memory store lock poisoned".to_owned()))?;
        Ok(entries.get(key).cloned())
    }
}

/// Stores each key as `<dir>/<key>.json`. The directory is created on first save.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    dir: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn save(&self, key: &str, snapshot: &str) -> Result<(), SnapshotError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            SnapshotError::Unavailable(format!("cannot create {}: {}", self.dir.display(), e))
        })?;
        fs::write(self.path_for(key), snapshot)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(SnapshotError::Unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotError::Io(e)),
        }
    }
}
