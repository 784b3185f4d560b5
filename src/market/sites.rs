//! Supported marketplaces and their URL conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplaces the extraction engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Amazon,
    Jumia,
}

impl Site {
    /// Detects the marketplace from a search-results URL.
    ///
    /// Any URL that names neither marketplace is unsupported, which callers
    /// treat as "zero results", not an error.
    pub fn detect(url: &str) -> Option<Site> {
        if url.contains("amazon") {
            Some(Site::Amazon)
        } else if url.contains("jumia") {
            Some(Site::Jumia)
        } else {
            None
        }
    }

    /// Returns the canonical origin for this marketplace.
    pub fn base_origin(&self) -> &'static str {
        match self {
            Site::Amazon => "https://www.amazon.com",
            Site::Jumia => "https://www.jumia.com.eg",
        }
    }

    /// Whether scheme/host repair is applied to protocol-relative and
    /// root-relative image URLs. Jumia serves both forms; Amazon image URLs
    /// are accepted only fully qualified.
    pub fn repairs_relative_images(&self) -> bool {
        matches!(self, Site::Jumia)
    }

    /// Builds a search-results URL for a free-text query.
    pub fn search_url(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        match self {
            Site::Amazon => format!("{}/s?k={}", self.base_origin(), encoded),
            Site::Jumia => format!("{}/catalog/?q={}", self.base_origin(), encoded),
        }
    }

    /// Returns all supported marketplaces.
    pub fn all() -> &'static [Site] {
        &[Site::Amazon, Site::Jumia]
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Amazon => write!(f, "amazon"),
            Site::Jumia => write!(f, "jumia"),
        }
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amazon" => Ok(Site::Amazon),
            "jumia" => Ok(Site::Jumia),
            _ => Err(format!("Unknown site: {}. Use: amazon, jumia", s)),
        }
    }
}
