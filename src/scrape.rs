//! Fail-soft scrape orchestration.
//!
//! A run either succeeds with some records or yields nothing; no failure in
//! proxy acquisition, fetch, parsing, or persistence crosses this boundary.

use crate::config::Config;
use crate::market::extract::extract;
use crate::market::fetch::{Fetcher, PageFetcher};
use crate::market::models::ScrapeRequest;
use crate::market::sites::Site;
use crate::store::{ProductStore, StoredProduct};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Ties fetch output to the right extraction engine and hands validated
/// records to the persistence boundary.
pub struct Scraper {
    config: Config,
    store: Arc<dyn ProductStore>,
}

impl Scraper {
    /// Creates a scraper writing to the given store.
    pub fn new(config: Config, store: Arc<dyn ProductStore>) -> Self {
        Self { config, store }
    }

    /// Runs one scrape described by a request.
    pub async fn run_request(&self, request: &ScrapeRequest) -> Vec<StoredProduct> {
        self.run(&request.url, request.limit).await
    }

    /// Runs one scrape. Every failure mode degrades to fewer or zero records.
    pub async fn run(&self, url: &str, limit: usize) -> Vec<StoredProduct> {
        // Fresh fetcher per run: no HTTP client state shared across runs
        let fetcher = Fetcher::new(&self.config);
        self.run_with_fetcher(&fetcher, url, limit).await
    }

    /// Runs one scrape with a provided fetcher (for testing).
    pub async fn run_with_fetcher(
        &self,
        fetcher: &impl PageFetcher,
        url: &str,
        limit: usize,
    ) -> Vec<StoredProduct> {
        let Some(site) = Site::detect(url) else {
            debug!("Unsupported site, skipping: {}", url);
            return Vec::new();
        };

        info!("Scraping {} (limit {})", url, limit);

        let fetched = fetcher.fetch(url).await;
        if !fetched.ok {
            return Vec::new();
        }

        let products = extract(&fetched.body, site, limit);

        let mut stored = Vec::new();
        for (i, product) in products.iter().enumerate() {
            if i > 0 && self.config.pace_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.pace_delay_ms)).await;
            }
            match self.store.create(product).await {
                Ok(record) => stored.push(record),
                Err(e) => warn!("Dropping record \"{}\": {}", product.title, e),
            }
        }

        info!("Stored {} of {} extracted records", stored.len(), products.len());
        stored
    }
}
