mod common;

use common::{init_tracing, news, recommendation, social};
use content_aggregator::{
    ContentCategory, ContentTypeFilter, FavoritesStore, JsonFileSnapshotStore,
    MemorySnapshotStore, Preferences, PreferencesStore, SnapshotStore, Theme,
    UnavailableSnapshotStore, FAVORITES_KEY, PREFERENCES_KEY,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

fn memory() -> Arc<MemorySnapshotStore> {
    Arc::new(MemorySnapshotStore::new())
}

#[test]
fn favorites_insert_at_front_and_dedup() {
    init_tracing();
    info!("Testing favorites ordering");

    let mut favorites = FavoritesStore::new(memory());
    favorites.add(news("n1", "One", ContentCategory::Technology));
    favorites.add(recommendation("r1", "Two"));
    favorites.add(news("n1", "One again", ContentCategory::Technology));

    let ids: Vec<&str> = favorites.items().iter().map(|item| item.id()).collect();
    assert_eq!(ids, vec!["r1", "n1"]);
    assert_eq!(favorites.len(), 2);
    assert_eq!(favorites.items()[1].title(), "One");
}

#[test]
fn favorites_remove_toggle_and_clear() {
    let mut favorites = FavoritesStore::new(memory());
    favorites.add(social("s1", "Post", None));
    assert!(favorites.is_favorite("s1"));

    favorites.remove("s1");
    assert!(!favorites.is_favorite("s1"));
    favorites.remove("missing");

    assert!(favorites.toggle(social("s2", "Other", None)));
    assert!(!favorites.toggle(social("s2", "Other", None)));
    assert!(favorites.is_empty());

    favorites.add(social("s3", "Third", None));
    favorites.clear();
    assert!(favorites.is_empty());
}

#[test]
fn favorites_survive_a_new_session() {
    init_tracing();

    let store = memory();
    let mut first = FavoritesStore::new(store.clone());
    first.add(news("n1", "One", ContentCategory::Technology));
    first.add(recommendation("r1", "Two"));

    let mut second = FavoritesStore::new(store.clone());
    assert!(second.is_empty());
    second.hydrate();
    assert!(second.is_hydrated());
    assert_eq!(second.items(), first.items());

    let raw = store.load(FAVORITES_KEY).unwrap().unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(snapshot["items"][0]["type"], "recommendation");
}

#[test]
fn favorites_hydrate_is_idempotent_and_tolerates_garbage() {
    let store = Arc::new(MemorySnapshotStore::new().with_entry(FAVORITES_KEY, "not json"));
    let mut favorites = FavoritesStore::new(store);
    favorites.hydrate();
    assert!(favorites.is_empty());

    favorites.add(social("s1", "Post", None));
    favorites.hydrate();
    assert_eq!(favorites.len(), 1);
}

#[test]
fn favorites_work_without_persistent_storage() {
    init_tracing();

    let mut favorites = FavoritesStore::new(Arc::new(UnavailableSnapshotStore));
    favorites.hydrate();
    favorites.add(social("s1", "Post", None));
    assert!(favorites.is_favorite("s1"));
}

#[test]
fn preferences_start_from_defaults() {
    let store = PreferencesStore::new(memory());
    assert_eq!(
        store.preferences(),
        &Preferences {
            categories: vec![ContentCategory::Technology, ContentCategory::Business],
            dark_mode: false,
            content_type_filter: ContentTypeFilter::All,
            show_favorites_only: false,
        }
    );
    assert!(!store.is_hydrated());
}

#[test]
fn toggle_category_removes_or_appends() {
    let mut store = PreferencesStore::new(memory());
    store.toggle_category(ContentCategory::Technology);
    assert_eq!(store.preferences().categories, vec![ContentCategory::Business]);

    store.toggle_category(ContentCategory::Sports);
    store.toggle_category(ContentCategory::Technology);
    assert_eq!(
        store.preferences().categories,
        vec![
            ContentCategory::Business,
            ContentCategory::Sports,
            ContentCategory::Technology
        ]
    );

    store.clear_categories();
    assert!(store.preferences().categories.is_empty());

    store.set_categories(vec![ContentCategory::Health]);
    assert_eq!(store.preferences().categories, vec![ContentCategory::Health]);
}

#[test]
fn dark_mode_toggle_is_symmetric_and_signals_theme() {
    init_tracing();

    let (tx, rx) = watch::channel(Theme::Light);
    let mut store = PreferencesStore::new(memory()).with_theme_signal(Arc::new(tx));

    store.toggle_dark_mode();
    assert!(store.preferences().dark_mode);
    assert_eq!(*rx.borrow(), Theme::Dark);

    store.toggle_dark_mode();
    assert!(!store.preferences().dark_mode);
    assert_eq!(*rx.borrow(), Theme::Light);

    store.set_dark_mode(true);
    assert_eq!(*rx.borrow(), Theme::Dark);
}

#[test]
fn other_mutations_persist() {
    let snapshots = memory();
    let mut store = PreferencesStore::new(snapshots.clone());
    store.set_content_type_filter(ContentTypeFilter::Movies);
    store.toggle_favorites_only();

    let raw = snapshots.load(PREFERENCES_KEY).unwrap().unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(snapshot["contentTypeFilter"], "movies");
    assert_eq!(snapshot["showFavoritesOnly"], true);
}

#[test]
fn hydrate_merges_missing_fields_with_defaults() {
    init_tracing();

    let snapshots = Arc::new(MemorySnapshotStore::new().with_entry(
        PREFERENCES_KEY,
        r#"{"categories": ["sports"], "darkMode": true}"#,
    ));
    let (tx, rx) = watch::channel(Theme::Light);
    let mut store = PreferencesStore::new(snapshots).with_theme_signal(Arc::new(tx));
    store.hydrate();

    let preferences = store.preferences();
    assert_eq!(preferences.categories, vec![ContentCategory::Sports]);
    assert!(preferences.dark_mode);
    assert!(!preferences.show_favorites_only);
    assert_eq!(preferences.content_type_filter, ContentTypeFilter::All);
    assert_eq!(*rx.borrow(), Theme::Dark);
}

#[test]
fn hydrate_skips_malformed_fields_only() {
    let snapshots = Arc::new(MemorySnapshotStore::new().with_entry(
        PREFERENCES_KEY,
        r#"{"categories": "sports", "contentTypeFilter": "news", "showFavoritesOnly": true}"#,
    ));
    let mut store = PreferencesStore::new(snapshots);
    store.hydrate();

    let preferences = store.preferences();
    assert_eq!(
        preferences.categories,
        vec![ContentCategory::Technology, ContentCategory::Business]
    );
    assert_eq!(preferences.content_type_filter, ContentTypeFilter::News);
    assert!(preferences.show_favorites_only);
}

#[test]
fn preferences_round_trip_through_files() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state");

    let mut first = PreferencesStore::new(Arc::new(JsonFileSnapshotStore::new(path.clone())));
    first.toggle_category(ContentCategory::Science);
    first.toggle_favorites_only();

    let mut second = PreferencesStore::new(Arc::new(JsonFileSnapshotStore::new(path.clone())));
    second.hydrate();
    assert_eq!(second.preferences(), first.preferences());
    assert!(path.join("preferences.json").exists());
}

#[test]
fn preferences_work_without_persistent_storage() {
    let mut store = PreferencesStore::new(Arc::new(UnavailableSnapshotStore));
    store.hydrate();
    store.toggle_dark_mode();
    assert!(store.preferences().dark_mode);
}

#[test]
fn set_categories_drops_repeats() {
    let mut store = PreferencesStore::new(memory());
    store.set_categories(vec![
        ContentCategory::Sports,
        ContentCategory::Health,
        ContentCategory::Sports,
    ]);
    assert_eq!(
        store.preferences().categories,
        vec![ContentCategory::Sports, ContentCategory::Health]
    );

    store.toggle_category(ContentCategory::Sports);
    assert_eq!(store.preferences().categories, vec![ContentCategory::Health]);
}

#[test]
fn hydrate_drops_repeated_categories() {
    init_tracing();

    let snapshots = Arc::new(MemorySnapshotStore::new().with_entry(
        PREFERENCES_KEY,
        r#"{"categories": ["health", "science", "health"]}"#,
    ));
    let mut store = PreferencesStore::new(snapshots);
    store.hydrate();
    assert_eq!(
        store.preferences().categories,
        vec![ContentCategory::Health, ContentCategory::Science]
    );

    store.toggle_category(ContentCategory::Health);
    assert!(!store.preferences().categories.contains(&ContentCategory::Health));
}
