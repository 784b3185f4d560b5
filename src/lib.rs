//! souq-crawler - Marketplace search-result scraper
//!
//! Fetches e-commerce search pages through rotating proxies with TLS
//! fingerprint emulation, and extracts product records from Amazon and
//! Jumia result layouts via data-driven selector fallback tables.

pub mod commands;
pub mod config;
pub mod format;
pub mod market;
pub mod proxy;
pub mod scrape;
pub mod store;

pub use config::Config;
pub use market::models::{ExtractedProduct, FetchResult, ScrapeRequest};
pub use market::sites::Site;
pub use market::{extract, parse_price};
pub use scrape::Scraper;
pub use store::{MemoryStore, ProductStore, StoredProduct};
