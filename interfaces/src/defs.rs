use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed topical tags used for coarse filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Technology,
    Business,
    Entertainment,
    Sports,
    Health,
    Science,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 6] = [
        ContentCategory::Technology,
        ContentCategory::Business,
        ContentCategory::Entertainment,
        ContentCategory::Sports,
        ContentCategory::Health,
        ContentCategory::Science,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Technology => "technology",
            ContentCategory::Business => "business",
            ContentCategory::Entertainment => "entertainment",
            ContentCategory::Sports => "sports",
            ContentCategory::Health => "health",
            ContentCategory::Science => "science",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Structural kind of a content item, independent of its topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    News,
    Recommendation,
    Social,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::News => f.write_str("news"),
            ContentKind::Recommendation => f.write_str("recommendation"),
            ContentKind::Social => f.write_str("social"),
        }
    }
}

/// User-facing content type selector. `Movies` is the UI name for recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentTypeFilter {
    #[default]
    All,
    News,
    Movies,
    Social,
}

impl ContentTypeFilter {
    pub fn matches(&self, kind: ContentKind) -> bool {
        match self {
            ContentTypeFilter::All => true,
            ContentTypeFilter::News => kind == ContentKind::News,
            ContentTypeFilter::Movies => kind == ContentKind::Recommendation,
            ContentTypeFilter::Social => kind == ContentKind::Social,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentTypeFilter::All => "all",
            ContentTypeFilter::News => "news",
            ContentTypeFilter::Movies => "movies",
            ContentTypeFilter::Social => "social",
        }
    }
}

impl fmt::Display for ContentTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentTypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ContentTypeFilter::All),
            "news" => Ok(ContentTypeFilter::News),
            "movies" => Ok(ContentTypeFilter::Movies),
            "social" => Ok(ContentTypeFilter::Social),
            other => Err(format!("unknown content type filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("unknown media type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Instagram,
    Linkedin,
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocialPlatform::Twitter => f.write_str("twitter"),
            SocialPlatform::Instagram => f.write_str("instagram"),
            SocialPlatform::Linkedin => f.write_str("linkedin"),
        }
    }
}

/// Fields every content item carries, regardless of provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBase {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ContentCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsContent {
    #[serde(flatten)]
    pub base: ContentBase,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationContent {
    #[serde(flatten)]
    pub base: ContentBase,
    /// 0-10 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub media_type: MediaType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialContent {
    #[serde(flatten)]
    pub base: ContentBase,
    pub platform: SocialPlatform,
    pub author: String,
    pub likes: u64,
    pub comments: u64,
}

/// A single normalized unit of aggregated data, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    News(NewsContent),
    Recommendation(RecommendationContent),
    Social(SocialContent),
}

impl Content {
    pub fn base(&self) -> &ContentBase {
        match self {
            Content::News(news) => &news.base,
            Content::Recommendation(recommendation) => &recommendation.base,
            Content::Social(social) => &social.base,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Content::News(_) => ContentKind::News,
            Content::Recommendation(_) => ContentKind::Recommendation,
            Content::Social(_) => ContentKind::Social,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn title(&self) -> &str {
        &self.base().title
    }

    pub fn description(&self) -> &str {
        &self.base().description
    }

    pub fn category(&self) -> Option<ContentCategory> {
        self.base().category
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.base().published_at
    }
}
