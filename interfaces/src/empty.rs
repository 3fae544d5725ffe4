use crate::state::{SnapshotError, SnapshotStore};

/// A store for environments with no persistent storage at all.
pub struct UnavailableSnapshotStore;

impl SnapshotStore for UnavailableSnapshotStore {
    fn save(&self, key: &str, _snapshot: &str) -> Result<(), SnapshotError> {
        // Nothing survives the session.
        Err(SnapshotError::Unavailable(format!("cannot save {}", key)))
    }

    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Err(SnapshotError::Unavailable(format!("cannot load {}", key)))
    }
}
