use crate::sources::news_api::{DEFAULT_NEWS_API_BASE, NEWS_API_KEY_VAR};
use crate::sources::tmdb::{DEFAULT_TMDB_API_BASE, TMDB_API_KEY_VAR};
use crate::types::{AggregatorError, FetchConfig, MediaType, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_STATE_DIR: &str = ".dashboard";
/// The dashboard asks for fewer headlines than the provider's default page.
pub const DEFAULT_FEED_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Absent keys are not a config error; the provider reports itself unconfigured.
    pub news_api_key: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub news_api_base_url: String,
    pub tmdb_api_base_url: String,
    pub social_feed_path: Option<PathBuf>,
    pub state_dir: PathBuf,
    pub news_page_size: u32,
    pub recommendation_media_type: MediaType,
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            tmdb_api_key: None,
            news_api_base_url: DEFAULT_NEWS_API_BASE.to_string(),
            tmdb_api_base_url: DEFAULT_TMDB_API_BASE.to_string(),
            social_feed_path: None,
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            news_page_size: DEFAULT_FEED_PAGE_SIZE,
            recommendation_media_type: MediaType::Movie,
            fetch: FetchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut fetch = defaults.fetch.clone();
        if let Some(seconds) = parse_var(&var, "REVALIDATE_SECONDS")? {
            fetch.revalidate_seconds = seconds;
        }
        if let Some(seconds) = parse_var(&var, "FETCH_TIMEOUT_SECONDS")? {
            fetch.timeout_seconds = seconds;
        }
        if let Some(retries) = parse_var(&var, "FETCH_MAX_RETRIES")? {
            fetch.max_retries = retries;
        }

        Ok(Self {
            news_api_key: var(NEWS_API_KEY_VAR),
            tmdb_api_key: var(TMDB_API_KEY_VAR),
            news_api_base_url: var("NEWS_API_BASE_URL").unwrap_or(defaults.news_api_base_url),
            tmdb_api_base_url: var("TMDB_API_BASE_URL").unwrap_or(defaults.tmdb_api_base_url),
            social_feed_path: var("SOCIAL_FEED_PATH").map(PathBuf::from),
            state_dir: var("DASHBOARD_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_dir),
            news_page_size: parse_var(&var, "NEWS_PAGE_SIZE")?.unwrap_or(defaults.news_page_size),
            recommendation_media_type: parse_var(&var, "RECOMMENDATION_MEDIA_TYPE")?
                .unwrap_or(defaults.recommendation_media_type),
            fetch,
        })
    }
}

fn parse_var<T, F>(var: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AggregatorError::Config(format!("{}={:?}: {}", key, raw, e)))
        })
        .transpose()
}
