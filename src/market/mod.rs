//! Marketplace-specific modules: fetching, selector tables, and extraction.

pub mod extract;
pub mod fetch;
pub mod models;
pub mod price;
pub mod selectors;
pub mod sites;

pub use extract::extract;
pub use fetch::{Fetcher, PageFetcher};
pub use models::{ExtractedProduct, FetchResult, ScrapeRequest};
pub use price::parse_price;
pub use sites::Site;
