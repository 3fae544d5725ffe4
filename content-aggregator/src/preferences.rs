use crate::types::{ContentCategory, ContentTypeFilter, Result, SnapshotStore, PREFERENCES_KEY};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Selection order is preserved; an empty list means no category restriction.
    pub categories: Vec<ContentCategory>,
    pub dark_mode: bool,
    pub content_type_filter: ContentTypeFilter,
    pub show_favorites_only: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            categories: vec![ContentCategory::Technology, ContentCategory::Business],
            dark_mode: false,
            content_type_filter: ContentTypeFilter::All,
            show_favorites_only: false,
        }
    }
}

impl Preferences {
    pub fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Overlay every field of `snapshot` that is present and well-formed.
    fn merge_snapshot(&mut self, snapshot: &Map<String, Value>) {
        merge_field(snapshot, "categories", &mut self.categories);
        self.categories = unique_categories(std::mem::take(&mut self.categories));
        merge_field(snapshot, "darkMode", &mut self.dark_mode);
        merge_field(snapshot, "contentTypeFilter", &mut self.content_type_filter);
        merge_field(snapshot, "showFavoritesOnly", &mut self.show_favorites_only);
    }
}

/// First occurrence wins; selection order is otherwise kept.
fn unique_categories(categories: Vec<ContentCategory>) -> Vec<ContentCategory> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .filter(|category| seen.insert(*category))
        .collect()
}

fn merge_field<T: DeserializeOwned>(snapshot: &Map<String, Value>, key: &str, target: &mut T) {
    let Some(value) = snapshot.get(key) else {
        debug!("Preferences snapshot has no {}, keeping default", key);
        return;
    };
    match T::deserialize(value) {
        Ok(parsed) => *target = parsed,
        Err(e) => warn!("Ignoring malformed {} in preferences snapshot: {}", key, e),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

/// Receives theme changes synchronously with the dark-mode mutation.
pub trait ThemeSignal: Send + Sync {
    fn theme_changed(&self, theme: Theme);
}

impl ThemeSignal for watch::Sender<Theme> {
    fn theme_changed(&self, theme: Theme) {
        self.send_replace(theme);
    }
}

pub struct PreferencesStore {
    preferences: Preferences,
    store: Arc<dyn SnapshotStore>,
    theme_signal: Option<Arc<dyn ThemeSignal>>,
    hydrated: bool,
}

impl PreferencesStore {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            preferences: Preferences::default(),
            store,
            theme_signal: None,
            hydrated: false,
        }
    }

    pub fn with_theme_signal(mut self, signal: Arc<dyn ThemeSignal>) -> Self {
        self.theme_signal = Some(signal);
        self
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Remove `category` if selected, otherwise append it.
    pub fn toggle_category(&mut self, category: ContentCategory) {
        let categories = &mut self.preferences.categories;
        if let Some(position) = categories.iter().position(|c| *c == category) {
            categories.remove(position);
        } else {
            categories.push(category);
        }
        debug!("Categories now {:?}", self.preferences.categories);
        self.persist();
    }

    pub fn set_categories(&mut self, categories: Vec<ContentCategory>) {
        self.preferences.categories = unique_categories(categories);
        self.persist();
    }

    pub fn clear_categories(&mut self) {
        self.preferences.categories.clear();
        self.persist();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.preferences.dark_mode);
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.preferences.dark_mode = enabled;
        self.signal_theme();
        self.persist();
    }

    pub fn set_content_type_filter(&mut self, filter: ContentTypeFilter) {
        self.preferences.content_type_filter = filter;
        self.persist();
    }

    pub fn toggle_favorites_only(&mut self) {
        self.preferences.show_favorites_only = !self.preferences.show_favorites_only;
        self.persist();
    }

    /// Merge the persisted snapshot once. Fields missing from it keep their
    /// current values, so older snapshots never blank out newer fields.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        self.hydrated = true;

        match self.store.load(PREFERENCES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(snapshot)) => {
                    self.preferences.merge_snapshot(&snapshot);
                    info!("Hydrated preferences: {:?}", self.preferences);
                }
                Ok(_) => warn!("Ignoring preferences snapshot that is not an object"),
                Err(e) => warn!("Ignoring malformed preferences snapshot: {}", e),
            },
            Ok(None) => debug!("No preferences snapshot to hydrate from"),
            Err(e) => warn!("Preferences snapshot unavailable, continuing in memory: {}", e),
        }

        self.signal_theme();
    }

    fn signal_theme(&self) {
        if let Some(signal) = &self.theme_signal {
            signal.theme_changed(self.preferences.theme());
        }
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!("Failed to persist preferences, keeping them in memory: {}", e);
        }
    }

    fn try_persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.preferences)?;
        self.store.save(PREFERENCES_KEY, &raw)?;
        Ok(())
    }
}
