#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use content_aggregator::{
    AggregatorError, Content, ContentBase, ContentCategory, MediaType, NewsContent, NewsQuery,
    ProviderGateway, RecommendationContent, RecommendationQuery, Result, SocialContent,
    SocialPlatform, Source,
};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

fn base(id: &str, title: &str, category: Option<ContentCategory>) -> ContentBase {
    ContentBase {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("About {}", title),
        image_url: None,
        url: None,
        published_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        category,
    }
}

pub fn news(id: &str, title: &str, category: ContentCategory) -> Content {
    Content::News(NewsContent {
        base: base(id, title, Some(category)),
        source: "Example Wire".to_string(),
        author: None,
    })
}

pub fn recommendation(id: &str, title: &str) -> Content {
    Content::Recommendation(RecommendationContent {
        base: base(id, title, None),
        rating: Some(7.5),
        media_type: MediaType::Movie,
    })
}

pub fn social(id: &str, title: &str, category: Option<ContentCategory>) -> Content {
    Content::Social(SocialContent {
        base: base(id, title, category),
        platform: SocialPlatform::Twitter,
        author: "Casey".to_string(),
        likes: 10,
        comments: 2,
    })
}

pub const NEWS_BODY: &str = r#"{
    "status": "ok",
    "totalResults": 2,
    "articles": [
        {"source": {"id": null, "name": "Wire"}, "author": "Ana", "title": "Chip shortage eases", "description": "Supply recovers", "url": "https://example.com/a", "urlToImage": null, "publishedAt": "2024-05-01T10:00:00Z"},
        {"source": {"id": null, "name": "Wire"}, "title": "React Tips", "url": "https://example.com/b", "publishedAt": "2024-05-01T09:00:00Z"}
    ]
}"#;

pub const TMDB_BODY: &str = r#"{
    "page": 1,
    "results": [
        {"id": 42, "title": "Arrival", "overview": "Linguist meets visitors", "poster_path": "/arrival.jpg", "release_date": "2016-11-11", "vote_average": 7.9}
    ]
}"#;

pub const SOCIAL_BODY: &str = r#"[
    {"id": "social-1", "type": "social", "title": "Rust at work", "description": "A thread", "publishedAt": "2024-05-01T08:00:00Z", "category": "technology", "platform": "twitter", "author": "Casey", "likes": 3, "comments": 1}
]"#;

/// Gateway answering from fixed bodies; `None` reports the provider as unconfigured.
pub struct StaticGateway {
    pub news: Option<String>,
    pub recommendations: Option<String>,
    pub social: Option<String>,
}

impl StaticGateway {
    pub fn healthy() -> Self {
        Self {
            news: Some(NEWS_BODY.to_string()),
            recommendations: Some(TMDB_BODY.to_string()),
            social: Some(SOCIAL_BODY.to_string()),
        }
    }
}

fn answer(body: &Option<String>, provider: Source, credential: &'static str) -> Result<String> {
    body.clone()
        .ok_or(AggregatorError::ProviderNotConfigured { provider, credential })
}

#[async_trait]
impl ProviderGateway for StaticGateway {
    async fn fetch_news(&self, _query: &NewsQuery) -> Result<String> {
        answer(&self.news, Source::News, "NEWS_API_KEY")
    }

    async fn fetch_recommendations(&self, _query: &RecommendationQuery) -> Result<String> {
        answer(&self.recommendations, Source::Recommendations, "TMDB_API_KEY")
    }

    async fn fetch_social(&self) -> Result<String> {
        answer(&self.social, Source::Social, "SOCIAL_FEED_PATH")
    }
}
