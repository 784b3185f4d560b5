//! Data models for scrape requests, fetch outcomes, and extracted products.

use serde::{Deserialize, Serialize};

/// One scrape invocation: a target URL and a result cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Search-results URL to fetch
    pub url: String,
    /// Maximum number of records to accept
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

impl ScrapeRequest {
    /// Creates a request with the default limit of 10.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), limit: default_limit() }
    }

    /// Sets the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Outcome of one page fetch. Failed fetches carry an empty body.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Raw HTML body
    pub body: String,
    /// Whether the fetch produced a usable response
    pub ok: bool,
}

impl FetchResult {
    /// A usable response body.
    pub fn success(body: impl Into<String>) -> Self {
        Self { body: body.into(), ok: true }
    }

    /// A failed fetch: transport error or non-2xx status.
    pub fn failed() -> Self {
        Self { body: String::new(), ok: false }
    }
}

/// A validated product record produced by the extraction engine.
///
/// Emitted only when both title and price pass validation; a missing image
/// degrades to an empty string, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProduct {
    /// Product title, trimmed, more than 5 characters
    pub title: String,
    /// Unit price, strictly positive
    pub price: f64,
    /// Absolute image URL, or `""` when no image validated
    pub image_url: String,
}
