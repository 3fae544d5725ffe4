use crate::config::AppConfig;
use crate::fetcher::Fetcher;
use crate::sources::{NewsApiSource, SocialSource, TmdbSource};
use crate::traits::ProviderGateway;
use crate::types::{NewsQuery, RecommendationQuery, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Provider gateway over HTTP, sharing one fetcher (and its cache) across providers.
pub struct HttpGateway {
    news: NewsApiSource,
    recommendations: TmdbSource,
    social: SocialSource,
}

impl HttpGateway {
    pub fn new(news: NewsApiSource, recommendations: TmdbSource, social: SocialSource) -> Self {
        Self {
            news,
            recommendations,
            social,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = Arc::new(Fetcher::new(config.fetch.clone())?);

        let news = NewsApiSource::new(config.news_api_key.clone(), fetcher.clone())
            .with_base_url(config.news_api_base_url.clone());
        let recommendations = TmdbSource::new(config.tmdb_api_key.clone(), fetcher)
            .with_base_url(config.tmdb_api_base_url.clone());
        let social = SocialSource::from_path(config.social_feed_path.clone());

        if !news.is_configured() {
            warn!("News provider has no API key; headlines will be unavailable");
        }
        if !recommendations.is_configured() {
            warn!("Recommendation provider has no API key; recommendations will be unavailable");
        }

        Ok(Self::new(news, recommendations, social))
    }
}

#[async_trait]
impl ProviderGateway for HttpGateway {
    async fn fetch_news(&self, query: &NewsQuery) -> Result<String> {
        self.news.fetch(query).await
    }

    async fn fetch_recommendations(&self, query: &RecommendationQuery) -> Result<String> {
        self.recommendations.fetch(query).await
    }

    async fn fetch_social(&self) -> Result<String> {
        self.social.fetch().await
    }
}
