use crate::types::{AggregatorError, Result, Source};
use std::path::PathBuf;
use tracing::{debug, info};

/// Posts shipped with the crate, used when no social feed file is configured.
pub const BUNDLED_SOCIAL_FEED: &str = include_str!("../../data/social.json");

/// Local social feed: the bundled posts or a JSON file on disk.
pub enum SocialSource {
    Bundled,
    File(PathBuf),
}

impl SocialSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => SocialSource::File(path),
            None => SocialSource::Bundled,
        }
    }

    pub async fn fetch(&self) -> Result<String> {
        match self {
            SocialSource::Bundled => {
                debug!("Serving bundled social feed");
                Ok(BUNDLED_SOCIAL_FEED.to_string())
            }
            SocialSource::File(path) => {
                info!("Reading social feed from {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| AggregatorError::Transport {
                        provider: Source::Social,
                        message: format!("cannot read {}: {}", path.display(), e),
                    })
            }
        }
    }
}
