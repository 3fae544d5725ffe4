use crate::types::{AggregatorError, FetchConfig, Result, Source};
use crate::utils::url::redacted;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use moka::future::Cache;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use url::Url;

const CACHE_CAPACITY: u64 = 64;

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
    cache: Option<Cache<String, String>>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .map_err(|e| AggregatorError::Config(format!("failed to create HTTP client: {}", e)))?;

        let cache = if config.revalidate_seconds > 0 {
            Some(
                Cache::builder()
                    .max_capacity(CACHE_CAPACITY)
                    .time_to_live(Duration::from_secs(config.revalidate_seconds))
                    .build(),
            )
        } else {
            None
        };

        Ok(Self {
            client,
            config,
            cache,
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// GET `url` for `provider`, serving from cache while the response is fresh.
    pub async fn fetch_text(&self, provider: Source, url: Url) -> Result<String> {
        let cache_key = url.to_string();
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(&cache_key).await {
                debug!("Serving cached {} response for {}", provider, redacted(&url));
                return Ok(body);
            }
        }

        let body = self.fetch_with_retries(provider, &url).await?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, body.clone()).await;
        }
        Ok(body)
    }

    async fn fetch_with_retries(&self, provider: Source, url: &Url) -> Result<String> {
        let start_time = Instant::now();
        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 32),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(self.config.retry_delay_seconds * 60)),
            ..Default::default()
        };

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.fetch_once(provider, url).await {
                Ok(body) => {
                    info!(
                        "Fetched {} ({} bytes) in {}ms",
                        redacted(url),
                        body.len(),
                        start_time.elapsed().as_millis()
                    );
                    return Ok(body);
                }
                // A provider that answered is not retried; the user re-fetches.
                Err(e @ AggregatorError::ProviderRequestFailed { .. }) => {
                    error!("{} provider rejected request {}: {}", provider, redacted(url), e);
                    return Err(e);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        if let Some(delay) = backoff.next_backoff() {
                            warn!("Attempt {} failed for {}, retrying in {:?}", attempt + 1, redacted(url), delay);
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }
                    break;
                }
            }
        }

        let err = last_error.unwrap_or_else(|| AggregatorError::Transport {
            provider,
            message: "unknown error".to_string(),
        });
        error!(
            "Failed to fetch {} after {} attempts: {}",
            redacted(url),
            self.config.max_retries + 1,
            err
        );
        Err(err)
    }

    async fn fetch_once(&self, provider: Source, url: &Url) -> Result<String> {
        let transport = |e: reqwest::Error| AggregatorError::Transport {
            provider,
            message: e.without_url().to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::ProviderRequestFailed {
                provider,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}
