//! Scrape command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::market::fetch::PageFetcher;
use crate::market::models::ScrapeRequest;
use crate::scrape::Scraper;
use crate::store::MemoryStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Executes one scrape run and formats the stored records.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the scrape and returns formatted output.
    pub async fn execute(&self, url: &str, limit: usize) -> Result<String> {
        let store = Arc::new(MemoryStore::new());
        let scraper = Scraper::new(self.config.clone(), store);

        let request = ScrapeRequest::new(url).with_limit(limit);
        let records = scraper.run_request(&request).await;
        info!("Scrape finished with {} records", records.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&records))
    }

    /// Runs the scrape with a provided fetcher (for testing).
    pub async fn execute_with_fetcher(
        &self,
        fetcher: &impl PageFetcher,
        url: &str,
        limit: usize,
    ) -> Result<String> {
        let store = Arc::new(MemoryStore::new());
        let scraper = Scraper::new(self.config.clone(), store);

        let records = scraper.run_with_fetcher(fetcher, url, limit).await;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&records))
    }
}
