//! CSS selector fallback tables for product extraction.
//!
//! Each marketplace gets an ordered list of container selectors (one per
//! historically-observed result-card variant) and, per field, an ordered
//! fallback chain tried until one yields a valid value. New markup variants
//! are handled by extending these tables, not by new code.
//!
//! **Update process**: when extraction starts missing fields, capture an HTML
//! sample, extend the affected chain, and add a test fixture.

use crate::market::sites::Site;
use scraper::Selector;
use std::sync::LazyLock;

/// A selector paired with the attribute carrying the value.
pub struct AttrQuery {
    pub selector: Selector,
    pub attr: &'static str,
}

impl AttrQuery {
    fn src(css: &str) -> Self {
        Self { selector: Selector::parse(css).unwrap(), attr: "src" }
    }

    fn attr(css: &str, attr: &'static str) -> Self {
        Self { selector: Selector::parse(css).unwrap(), attr }
    }
}

/// Selector tables for one marketplace.
pub struct SiteSelectors {
    /// Result-card containers, broadest variant first
    pub containers: Vec<Selector>,
    /// Title fallback chain
    pub title: Vec<Selector>,
    /// Price fallback chain
    pub price: Vec<Selector>,
    /// Image fallback chain with source attributes
    pub image: Vec<AttrQuery>,
}

fn chain(css: &[&str]) -> Vec<Selector> {
    css.iter().map(|s| Selector::parse(s).unwrap()).collect()
}

/// Amazon search-result selectors.
pub static AMAZON: LazyLock<SiteSelectors> = LazyLock::new(|| SiteSelectors {
    containers: chain(&[
        "div[data-component-type='s-search-result']",
        "div.s-result-item[data-asin]",
        "div.s-result-item[data-asin]:not([data-asin=''])",
        "div.puis-card-container",
    ]),
    title: chain(&[
        "h2.a-size-base-plus span",
        "h2.a-size-mini a span",
        "a.a-link-normal h2 span",
        "h2 span",
        "a h2 span",
    ]),
    price: chain(&[
        "span.a-offscreen",
        "span.a-price span.a-offscreen",
        "span.a-price-whole",
        "span.a-price-fraction",
    ]),
    image: vec![
        AttrQuery::src("img.s-image"),
        AttrQuery::src("div.s-product-image-container img"),
        AttrQuery::src("img"),
    ],
});

/// Jumia catalog selectors.
pub static JUMIA: LazyLock<SiteSelectors> = LazyLock::new(|| SiteSelectors {
    containers: chain(&["article.prd.c-prd", "article.prd"]),
    title: chain(&["h3.name", "div.info h3.name", "a.core div.info h3.name"]),
    price: chain(&["div.prc", "div.info div.prc", "a.core div.info div.prc"]),
    image: vec![
        AttrQuery::src("div.img-c img"),
        AttrQuery::attr("div.img-c img", "data-src"),
        AttrQuery::src("a.core div.img-c img"),
        AttrQuery::src("img"),
    ],
});

/// Returns the selector tables for a marketplace.
pub fn for_site(site: Site) -> &'static SiteSelectors {
    match site {
        Site::Amazon => &AMAZON,
        Site::Jumia => &JUMIA,
    }
}
