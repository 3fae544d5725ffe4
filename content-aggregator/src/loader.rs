use crate::normalizer::ContentNormalizer;
use crate::pipeline::{SourceState, SourceStates};
use crate::traits::ProviderGateway;
use crate::types::{Content, NewsQuery, RecommendationQuery, Result, Source};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Whether a finished load was written to its source slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load for the same source started first; this result was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    state: SourceState,
}

#[derive(Debug, Default)]
struct Slots {
    news: Slot,
    recommendations: Slot,
    social: Slot,
}

impl Slots {
    fn get_mut(&mut self, source: Source) -> &mut Slot {
        match source {
            Source::News => &mut self.news,
            Source::Recommendations => &mut self.recommendations,
            Source::Social => &mut self.social,
        }
    }
}

/// Fetches and normalizes each source, keeping only the latest request's result per source.
pub struct FeedLoader {
    gateway: Arc<dyn ProviderGateway>,
    normalizer: ContentNormalizer,
    slots: RwLock<Slots>,
}

impl FeedLoader {
    pub fn new(gateway: Arc<dyn ProviderGateway>) -> Self {
        Self {
            gateway,
            normalizer: ContentNormalizer::new(),
            slots: RwLock::new(Slots::default()),
        }
    }

    pub async fn load_news(&self, query: NewsQuery) -> LoadOutcome {
        let ticket = self.begin(Source::News).await;
        let result = match self.gateway.fetch_news(&query).await {
            Ok(body) => self.normalizer.news(&body, &query),
            Err(e) => Err(e),
        };
        self.settle(Source::News, ticket, result).await
    }

    pub async fn load_recommendations(&self, query: RecommendationQuery) -> LoadOutcome {
        let ticket = self.begin(Source::Recommendations).await;
        let result = match self.gateway.fetch_recommendations(&query).await {
            Ok(body) => self.normalizer.recommendations(&body, &query),
            Err(e) => Err(e),
        };
        self.settle(Source::Recommendations, ticket, result).await
    }

    pub async fn load_social(&self) -> LoadOutcome {
        let ticket = self.begin(Source::Social).await;
        let result = match self.gateway.fetch_social().await {
            Ok(body) => self.normalizer.social(&body),
            Err(e) => Err(e),
        };
        self.settle(Source::Social, ticket, result).await
    }

    /// Load all three sources concurrently and return once every one has settled.
    pub async fn refresh(
        &self,
        news: NewsQuery,
        recommendations: RecommendationQuery,
    ) -> SourceStates {
        info!(
            "Refreshing feed (news category {}, {} recommendations)",
            news.category, recommendations.media_type
        );
        let (news_outcome, recommendation_outcome, social_outcome) = tokio::join!(
            self.load_news(news),
            self.load_recommendations(recommendations),
            self.load_social()
        );
        debug!(
            "Refresh outcomes: news {:?}, recommendations {:?}, social {:?}",
            news_outcome, recommendation_outcome, social_outcome
        );
        self.states().await
    }

    pub async fn states(&self) -> SourceStates {
        let slots = self.slots.read().await;
        SourceStates {
            news: slots.news.state.clone(),
            recommendations: slots.recommendations.state.clone(),
            social: slots.social.state.clone(),
        }
    }

    async fn begin(&self, source: Source) -> u64 {
        let mut slots = self.slots.write().await;
        let slot = slots.get_mut(source);
        slot.generation += 1;
        slot.state = SourceState::Pending;
        debug!("Started {} load #{}", source, slot.generation);
        slot.generation
    }

    async fn settle(&self, source: Source, ticket: u64, result: Result<Vec<Content>>) -> LoadOutcome {
        let mut slots = self.slots.write().await;
        let slot = slots.get_mut(source);
        if slot.generation != ticket {
            info!(
                "Discarding {} load #{}; load #{} is newer",
                source, ticket, slot.generation
            );
            return LoadOutcome::Superseded;
        }

        slot.state = match result {
            Ok(items) => {
                info!("Loaded {} {} items", items.len(), source);
                SourceState::Loaded(items)
            }
            Err(e) => {
                error!("{} source unavailable: {}", source, e);
                SourceState::Unavailable(e.to_failure())
            }
        };
        LoadOutcome::Applied
    }
}
