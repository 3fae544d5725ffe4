use crate::types::{NewsQuery, RecommendationQuery, Result};
use async_trait::async_trait;

/// Fetches raw provider payloads for the normalizer.
///
/// Implementations report missing credentials, error statuses, and transport
/// failures as distinct `AggregatorError` variants; the dashboard words each
/// of them differently.
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Raw `{ "articles": [...] }` headlines body.
    async fn fetch_news(&self, query: &NewsQuery) -> Result<String>;

    /// Raw `{ "results": [...] }` popular-titles body.
    async fn fetch_recommendations(&self, query: &RecommendationQuery) -> Result<String>;

    /// A JSON array already in the shared content shape.
    async fn fetch_social(&self) -> Result<String>;
}
