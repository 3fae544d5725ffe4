use crate::config::{AppConfig, DEFAULT_FEED_PAGE_SIZE};
use crate::favorites::FavoritesStore;
use crate::loader::FeedLoader;
use crate::pipeline::{FilterCriteria, SourceStates};
use crate::preferences::{PreferencesStore, ThemeSignal};
use crate::traits::ProviderGateway;
use crate::types::{
    AggregatorError, Content, ContentCategory, MediaType, NewsQuery, RecommendationQuery, Result,
    SnapshotStore,
};
use crate::view::FeedView;
use std::sync::Arc;
use tracing::info;

/// One user's dashboard: the feed loader plus the two persisted stores.
pub struct DashboardSession {
    loader: Arc<FeedLoader>,
    favorites: FavoritesStore,
    preferences: PreferencesStore,
    news_page_size: u32,
    media_type: MediaType,
}

impl DashboardSession {
    pub fn new(gateway: Arc<dyn ProviderGateway>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            loader: Arc::new(FeedLoader::new(gateway)),
            favorites: FavoritesStore::new(snapshots.clone()),
            preferences: PreferencesStore::new(snapshots),
            news_page_size: DEFAULT_FEED_PAGE_SIZE,
            media_type: MediaType::Movie,
        }
    }

    pub fn from_config(
        config: &AppConfig,
        gateway: Arc<dyn ProviderGateway>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self::new(gateway, snapshots)
            .with_news_page_size(config.news_page_size)
            .with_media_type(config.recommendation_media_type)
    }

    pub fn with_news_page_size(mut self, page_size: u32) -> Self {
        self.news_page_size = page_size;
        self
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    pub fn with_theme_signal(mut self, signal: Arc<dyn ThemeSignal>) -> Self {
        self.preferences = self.preferences.with_theme_signal(signal);
        self
    }

    /// Merge persisted favorites and preferences. Safe to skip; the stores
    /// then keep their defaults.
    pub fn hydrate(&mut self) {
        self.favorites.hydrate();
        self.preferences.hydrate();
        info!(
            "Session hydrated with {} favorites and {} selected categories",
            self.favorites.len(),
            self.preferences.preferences().categories.len()
        );
    }

    /// Headlines follow the first selected category, or technology when none is selected.
    pub fn news_query(&self) -> NewsQuery {
        let category = self
            .preferences
            .preferences()
            .categories
            .first()
            .copied()
            .unwrap_or(ContentCategory::Technology);
        NewsQuery::new(category).with_page_size(self.news_page_size)
    }

    pub fn recommendation_query(&self) -> RecommendationQuery {
        RecommendationQuery::new(self.media_type)
    }

    pub async fn refresh(&self) -> SourceStates {
        self.loader
            .refresh(self.news_query(), self.recommendation_query())
            .await
    }

    /// The current feed, filtered by the session's preferences, favorites, and `search`.
    pub async fn view(&self, search: &str) -> FeedView {
        let states = self.loader.states().await;
        let favorite_ids = self.favorites.ids();
        let criteria = FilterCriteria::new(self.preferences.preferences(), &favorite_ids, search);
        let items = states.aggregate(&criteria);
        FeedView::new(states.status(), items, &criteria)
    }

    /// Look up an item among loaded content first, then among favorites.
    pub async fn find_content(&self, id: &str) -> Option<Content> {
        let states = self.loader.states().await;
        states
            .news
            .items()
            .iter()
            .chain(states.recommendations.items())
            .chain(states.social.items())
            .chain(self.favorites.items())
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Star or unstar `id`. Returns whether it is a favorite afterwards.
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let content = self
            .find_content(id)
            .await
            .ok_or_else(|| AggregatorError::ContentNotFound { id: id.to_string() })?;
        Ok(self.favorites.toggle(content))
    }

    pub fn loader(&self) -> &Arc<FeedLoader> {
        &self.loader
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    pub fn preferences(&self) -> &PreferencesStore {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut PreferencesStore {
        &mut self.preferences
    }
}
