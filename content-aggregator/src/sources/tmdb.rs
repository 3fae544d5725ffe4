use crate::fetcher::Fetcher;
use crate::types::{AggregatorError, RecommendationQuery, Result, Source};
use crate::utils::url::endpoint;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_TMDB_API_BASE: &str = "https://api.themoviedb.org";
pub const TMDB_API_KEY_VAR: &str = "TMDB_API_KEY";

/// Popular movie/TV titles provider
pub struct TmdbSource {
    api_key: Option<String>,
    base_url: String,
    fetcher: Arc<Fetcher>,
}

impl TmdbSource {
    pub fn new(api_key: Option<String>, fetcher: Arc<Fetcher>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url: DEFAULT_TMDB_API_BASE.to_string(),
            fetcher,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn fetch(&self, query: &RecommendationQuery) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or(AggregatorError::ProviderNotConfigured {
            provider: Source::Recommendations,
            credential: TMDB_API_KEY_VAR,
        })?;

        let url = endpoint(
            &self.base_url,
            &format!("3/{}/popular", query.media_type),
            &[
                ("api_key", api_key.clone()),
                ("page", query.page.to_string()),
            ],
        )?;

        info!("Fetching popular {} titles (page {})", query.media_type, query.page);
        self.fetcher.fetch_text(Source::Recommendations, url).await
    }
}
