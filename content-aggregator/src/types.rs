use serde::{Deserialize, Serialize};
use std::fmt;
// Use the interfaces crate for the shared content model
pub use interfaces::defs::{
    Content, ContentBase, ContentCategory, ContentKind, ContentTypeFilter, MediaType, NewsContent,
    RecommendationContent, SocialContent, SocialPlatform,
};
pub use interfaces::state::{SnapshotError, SnapshotStore, FAVORITES_KEY, PREFERENCES_KEY};

/// The three logical providers feeding the dashboard, in concatenation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    News,
    Recommendations,
    Social,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::News, Source::Recommendations, Source::Social];
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::News => f.write_str("news"),
            Source::Recommendations => f.write_str("recommendations"),
            Source::Social => f.write_str("social"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub category: ContentCategory,
    pub page_size: u32,
}

impl NewsQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    pub fn new(category: ContentCategory) -> Self {
        Self {
            category,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationQuery {
    pub media_type: MediaType,
    pub page: u32,
}

impl RecommendationQuery {
    pub fn new(media_type: MediaType) -> Self {
        Self { media_type, page: 1 }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Retries apply to transport failures only; error statuses are never retried.
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    /// Staleness tolerance for provider responses. `0` disables caching.
    pub revalidate_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Content-Aggregator/1.0".to_string(),
            timeout_seconds: 30,
            max_retries: 2,
            retry_delay_seconds: 1,
            revalidate_seconds: 300,
        }
    }
}

/// How a source failure is presented outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotConfigured,
    RequestFailed,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("{provider} provider is not configured: {credential} is missing")]
    ProviderNotConfigured {
        provider: Source,
        credential: &'static str,
    },

    #[error("{provider} provider returned HTTP {status}")]
    ProviderRequestFailed { provider: Source, status: u16 },

    #[error("transport failure talking to {provider} provider: {message}")]
    Transport { provider: Source, message: String },

    #[error("malformed {provider} payload: {reason}")]
    MalformedPayload { provider: Source, reason: String },

    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Content not found: {id}")]
    ContentNotFound { id: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AggregatorError {
    /// Outward classification for per-source reporting.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AggregatorError::ProviderNotConfigured { .. } => FailureKind::NotConfigured,
            AggregatorError::Transport { .. } | AggregatorError::Io(_) => FailureKind::Transport,
            _ => FailureKind::RequestFailed,
        }
    }

    pub fn to_failure(&self) -> SourceFailure {
        SourceFailure {
            kind: self.failure_kind(),
            message: self.to_string(),
        }
    }
}

impl From<SnapshotError> for AggregatorError {
    fn from(err: SnapshotError) -> Self {
        AggregatorError::PersistenceUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
