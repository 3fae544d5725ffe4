use crate::fetcher::Fetcher;
use crate::types::{AggregatorError, NewsQuery, Result, Source};
use crate::utils::url::endpoint;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_NEWS_API_BASE: &str = "https://newsapi.org";
pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";

/// Top-headlines provider
pub struct NewsApiSource {
    api_key: Option<String>,
    base_url: String,
    fetcher: Arc<Fetcher>,
}

impl NewsApiSource {
    pub fn new(api_key: Option<String>, fetcher: Arc<Fetcher>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url: DEFAULT_NEWS_API_BASE.to_string(),
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

    pub async fn fetch(&self, query: &NewsQuery) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or(AggregatorError::ProviderNotConfigured {
            provider: Source::News,
            credential: NEWS_API_KEY_VAR,
        })?;

        let url = endpoint(
            &self.base_url,
            "v2/top-headlines",
            &[
                ("country", "us".to_string()),
                ("category", query.category.to_string()),
                ("pageSize", query.page_size.to_string()),
                ("apiKey", api_key.clone()),
            ],
        )?;

        info!("Fetching {} headlines (page size {})", query.category, query.page_size);
        self.fetcher.fetch_text(Source::News, url).await
    }
}
