//! Disguised single-shot page fetches using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::market::models::FetchResult;
use crate::proxy::{ProxyClient, ProxyEndpoint};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for page fetching - enables mocking in orchestrator tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches one URL and classifies the response.
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// What went wrong with a fetch, before it collapses into a failed
/// `FetchResult`. Transport covers DNS, connect, timeout, and TLS failures.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(#[from] wreq::Error),
}

const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Issues one browser-like GET per scrape request.
///
/// Every call acquires its own proxy and builds its own HTTP client, so
/// concurrent scrapes share no connection or header state.
pub struct Fetcher {
    proxy: ProxyClient,
    user_agents: Vec<String>,
    fetch_timeout: Duration,
    connect_timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher from the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            proxy: ProxyClient::new(config),
            user_agents: config.user_agents.clone(),
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }

    /// Picks a user agent uniformly at random from the configured pool.
    fn pick_user_agent(&self) -> &str {
        if self.user_agents.is_empty() {
            return FALLBACK_USER_AGENT;
        }
        let idx = rand::rng().random_range(0..self.user_agents.len());
        &self.user_agents[idx]
    }

    /// Performs the GET with all anti-bot measures applied.
    async fn get(&self, url: &str, proxy: Option<&ProxyEndpoint>) -> Result<String, FetchError> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(self.fetch_timeout)
            .connect_timeout(self.connect_timeout);

        if let Some(endpoint) = proxy {
            if !endpoint.is_direct() {
                debug!("Routing through proxy: {}", endpoint.url);
                builder = builder.proxy(wreq::Proxy::all(&endpoint.url)?);
            }
        }

        let client = builder.build()?;

        debug!("GET {}", url);

        let response = client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("User-Agent", self.pick_user_agent())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Sec-Fetch-User", "?1")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for Fetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        let proxy = self.proxy.acquire().await;

        match self.get(url, proxy.as_ref()).await {
            Ok(body) => FetchResult::success(body),
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                if let Some(endpoint) = &proxy {
                    if !endpoint.is_direct() {
                        self.proxy.report_failure(&endpoint.url).await;
                    }
                }
                FetchResult::failed()
            }
        }
    }
}
