//! Converts raw provider payloads into the shared [`Content`] model.
//!
//! Optional provider fields never fail normalization; they fall back to the
//! documented placeholders instead. Only a payload missing its item array (or
//! one that is not JSON at all) is rejected as `MalformedPayload`.

use crate::types::{
    AggregatorError, Content, ContentBase, MediaType, NewsContent, NewsQuery, RecommendationContent,
    RecommendationQuery, Result, Source,
};
use crate::utils::time::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

pub const NO_DESCRIPTION: &str = "No description available";
pub const UNTITLED: &str = "Untitled";
/// Recommendations beyond this many are dropped regardless of page size.
pub const MAX_RECOMMENDATIONS: usize = 10;

const POSTER_URL_PREFIX: &str = "https://image.tmdb.org/t/p/w500";
const TMDB_PAGE_PREFIX: &str = "https://www.themoviedb.org";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    pub articles: Vec<NewsArticle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(default)]
    pub source: Option<NewsArticleSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbResponse {
    #[serde(default)]
    pub page: Option<u32>,
    pub results: Vec<TmdbResult>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbResult {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Empty strings count as absent, matching how providers leave fields blank.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn malformed(provider: Source, err: serde_json::Error) -> AggregatorError {
    AggregatorError::MalformedPayload {
        provider,
        reason: err.to_string(),
    }
}

/// Normalize a headlines payload fetched for `query` at `now`.
///
/// Headlines carry no native id, so ids are synthesized from the source name,
/// position, and fetch time. They differ across refetches.
pub fn normalize_news(body: &str, query: &NewsQuery, now: DateTime<Utc>) -> Result<Vec<Content>> {
    let response: NewsApiResponse =
        serde_json::from_str(body).map_err(|e| malformed(Source::News, e))?;
    let stamp = now.timestamp_millis();

    let items: Vec<Content> = response
        .articles
        .into_iter()
        .enumerate()
        .map(|(index, article)| {
            let source = article
                .source
                .and_then(|s| present(s.name))
                .unwrap_or_else(|| "unknown".to_string());
            let published_at = article
                .published_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(now);

            Content::News(NewsContent {
                base: ContentBase {
                    id: format!("news-{}-{}-{}", source, index, stamp),
                    title: present(article.title).unwrap_or_else(|| UNTITLED.to_string()),
                    description: present(article.description)
                        .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                    image_url: present(article.url_to_image),
                    url: present(article.url),
                    published_at,
                    // The provider filters headlines by the requested category.
                    category: Some(query.category),
                },
                source,
                author: present(article.author),
            })
        })
        .collect();

    info!("Normalized {} news items for category {}", items.len(), query.category);
    Ok(items)
}

/// Normalize a popular-titles payload. Ids are deterministic across refetches.
pub fn normalize_recommendations(
    body: &str,
    query: &RecommendationQuery,
    now: DateTime<Utc>,
) -> Result<Vec<Content>> {
    let response: TmdbResponse =
        serde_json::from_str(body).map_err(|e| malformed(Source::Recommendations, e))?;
    let total = response.results.len();
    let media_type = query.media_type;

    let items: Vec<Content> = response
        .results
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|result| recommendation_from(result, media_type, now))
        .collect();

    if total > items.len() {
        debug!("Dropped {} recommendations beyond the cap", total - items.len());
    }
    info!("Normalized {} {} recommendations", items.len(), media_type);
    Ok(items)
}

fn recommendation_from(result: TmdbResult, media_type: MediaType, now: DateTime<Utc>) -> Content {
    let published_at = result
        .release_date
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| result.first_air_date.as_deref().and_then(parse_timestamp))
        .unwrap_or(now);

    Content::Recommendation(RecommendationContent {
        base: ContentBase {
            id: format!("tmdb-{}-{}", media_type, result.id),
            title: present(result.title)
                .or_else(|| present(result.name))
                .unwrap_or_else(|| UNTITLED.to_string()),
            description: present(result.overview).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image_url: present(result.poster_path)
                .map(|path| format!("{}{}", POSTER_URL_PREFIX, path)),
            url: Some(format!("{}/{}/{}", TMDB_PAGE_PREFIX, media_type, result.id)),
            published_at,
            category: None,
        },
        rating: result.vote_average,
        media_type,
    })
}

/// Social payloads already use the shared shape and pass through unchanged.
pub fn normalize_social(body: &str) -> Result<Vec<Content>> {
    let items: Vec<Content> =
        serde_json::from_str(body).map_err(|e| malformed(Source::Social, e))?;
    info!("Loaded {} social items", items.len());
    Ok(items)
}

/// Normalization bound to the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentNormalizer;

impl ContentNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn news(&self, body: &str, query: &NewsQuery) -> Result<Vec<Content>> {
        normalize_news(body, query, Utc::now())
    }

    pub fn recommendations(&self, body: &str, query: &RecommendationQuery) -> Result<Vec<Content>> {
        normalize_recommendations(body, query, Utc::now())
    }

    pub fn social(&self, body: &str) -> Result<Vec<Content>> {
        normalize_social(body)
    }
}
