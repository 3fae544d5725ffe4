use crate::types::{Content, Result, SnapshotStore, FAVORITES_KEY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesSnapshot {
    #[serde(default)]
    items: Vec<Content>,
}

/// Ordered, id-unique list of favorited content, newest first.
pub struct FavoritesStore {
    items: Vec<Content>,
    store: Arc<dyn SnapshotStore>,
    hydrated: bool,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            items: Vec::new(),
            store,
            hydrated: false,
        }
    }

    /// Insert at the front unless an item with the same id is already present.
    pub fn add(&mut self, content: Content) {
        if self.is_favorite(content.id()) {
            debug!("{} is already a favorite", content.id());
            return;
        }
        info!("Adding favorite {}", content.id());
        self.items.insert(0, content);
        self.persist();
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() != before {
            info!("Removed favorite {}", id);
        }
        self.persist();
    }

    pub fn clear(&mut self) {
        info!("Clearing {} favorites", self.items.len());
        self.items.clear();
        self.persist();
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Add when absent, remove when present. Returns whether `content` is now a favorite.
    pub fn toggle(&mut self, content: Content) -> bool {
        if self.is_favorite(content.id()) {
            self.remove(content.id());
            false
        } else {
            self.add(content);
            true
        }
    }

    pub fn items(&self) -> &[Content] {
        &self.items
    }

    pub fn ids(&self) -> HashSet<String> {
        self.items.iter().map(|item| item.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Load the persisted snapshot once. Absent, malformed, or unreachable
    /// snapshots leave the store at its current state.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        self.hydrated = true;

        let raw = match self.store.load(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No favorites snapshot to hydrate from");
                return;
            }
            Err(e) => {
                warn!("Favorites snapshot unavailable, continuing in memory: {}", e);
                return;
            }
        };

        match serde_json::from_str::<FavoritesSnapshot>(&raw) {
            Ok(snapshot) => {
                let mut seen = HashSet::new();
                self.items = snapshot
                    .items
                    .into_iter()
                    .filter(|item| seen.insert(item.id().to_string()))
                    .collect();
                info!("Hydrated {} favorites", self.items.len());
            }
            Err(e) => warn!("Ignoring malformed favorites snapshot: {}", e),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!("Failed to persist favorites, keeping them in memory: {}", e);
        }
    }

    fn try_persist(&self) -> Result<()> {
        let snapshot = FavoritesSnapshot {
            items: self.items.clone(),
        };
        let raw = serde_json::to_string(&snapshot)?;
        self.store.save(FAVORITES_KEY, &raw)?;
        Ok(())
    }
}
