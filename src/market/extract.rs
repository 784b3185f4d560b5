//! Structural extraction of product records from search-result HTML.
//!
//! Pure and synchronous: HTML in, validated records out. Malformed markup is
//! tolerated by the parser; selector misses simply yield fewer records.

use crate::market::models::ExtractedProduct;
use crate::market::price::parse_price;
use crate::market::selectors::{self, AttrQuery, SiteSelectors};
use crate::market::sites::Site;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};
use url::Url;

/// Minimum trimmed title length, exclusive.
const MIN_TITLE_CHARS: usize = 5;

/// Extracts up to `limit` validated product records from a search page.
///
/// Container groups are tried in order and every group is walked in document
/// order; the pass ends as soon as `limit` records are accepted. A node
/// matched by more than one group can therefore appear twice below the limit;
/// that mirrors the observed behavior of the page layouts this was built
/// against and is deliberately not deduplicated.
pub fn extract(html: &str, site: Site, limit: usize) -> Vec<ExtractedProduct> {
    let document = Html::parse_document(html);
    let tables = selectors::for_site(site);

    let mut products = Vec::new();
    let mut candidates = 0usize;

    'groups: for container in &tables.containers {
        for node in document.select(container) {
            if products.len() >= limit {
                break 'groups;
            }
            candidates += 1;
            match extract_node(site, tables, node) {
                Some(product) => {
                    trace!(title = %product.title, price = product.price, "accepted record");
                    products.push(product);
                }
                None => trace!("candidate node rejected"),
            }
        }
    }

    debug!(
        site = %site,
        candidates,
        accepted = products.len(),
        limit,
        "extraction pass complete"
    );

    products
}

/// Derives the three fields for one candidate node.
///
/// Title and price are both required; image degrades to an empty string.
fn extract_node(
    site: Site,
    tables: &SiteSelectors,
    node: ElementRef<'_>,
) -> Option<ExtractedProduct> {
    let title = extract_title(&tables.title, node)?;
    let price = extract_price(&tables.price, node)?;
    let image_url = extract_image(site, &tables.image, node).unwrap_or_default();

    Some(ExtractedProduct { title, price, image_url })
}

/// First matching sub-node's trimmed text, if the selector matches at all.
fn first_text(selector: &Selector, node: ElementRef<'_>) -> Option<String> {
    node.select(selector).next().map(|e| e.text().collect::<String>().trim().to_string())
}

fn extract_title(chain: &[Selector], node: ElementRef<'_>) -> Option<String> {
    for selector in chain {
        if let Some(text) = first_text(selector, node) {
            if text.chars().count() > MIN_TITLE_CHARS {
                return Some(text);
            }
        }
    }
    None
}

fn extract_price(chain: &[Selector], node: ElementRef<'_>) -> Option<f64> {
    for selector in chain {
        if let Some(text) = first_text(selector, node) {
            if let Some(price) = parse_price(&text) {
                if price > 0.0 {
                    return Some(price);
                }
            }
        }
    }
    None
}

fn extract_image(site: Site, chain: &[AttrQuery], node: ElementRef<'_>) -> Option<String> {
    for query in chain {
        let Some(element) = node.select(&query.selector).next() else {
            continue;
        };
        let Some(raw) = element.value().attr(query.attr) else {
            continue;
        };
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        if is_absolute_url(raw) {
            return Some(raw.to_string());
        }
        if site.repairs_relative_images() {
            if let Some(rest) = raw.strip_prefix("//") {
                return Some(format!("https://{}", rest));
            }
            if raw.starts_with('/') {
                return Some(format!("{}{}", site.base_origin(), raw));
            }
        }
    }
    None
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).map(|u| u.has_host()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Matches only the first container group; the overlap test below builds
    // its own card with the s-result-item class.
    fn amazon_card(asin: &str, title: &str, price: &str, image: &str) -> String {
        format!(
            r#"<div data-component-type="s-search-result" data-asin="{asin}">
                <div class="s-product-image-container"><img class="s-image" src="{image}"></div>
                <h2 class="a-size-mini"><a class="a-link-normal"><span>{title}</span></a></h2>
                <span class="a-price"><span class="a-offscreen">{price}</span></span>
            </div>"#
        )
    }

    fn jumia_card(title: &str, price: &str, image_attr: &str) -> String {
        format!(
            r#"<article class="prd c-prd">
                <a class="core">
                    <div class="img-c"><img {image_attr}></div>
                    <div class="info">
                        <h3 class="name">{title}</h3>
                        <div class="prc">{price}</div>
                    </div>
                </a>
            </article>"#
        )
    }

    fn page(cards: &[String]) -> String {
        format!("<html><body>{}</body></html>", cards.join("\n"))
    }

    #[test]
    fn test_amazon_basic_extraction() {
        let html = page(&[amazon_card(
            "B001",
            "Wireless Vertical Mouse",
            "$1,299.00",
            "https://m.media-amazon.com/images/I/1.jpg",
        )]);

        let products = extract(&html, Site::Amazon, 10);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Wireless Vertical Mouse");
        assert_eq!(products[0].price, 1299.00);
        assert_eq!(products[0].image_url, "https://m.media-amazon.com/images/I/1.jpg");
    }

    #[test]
    fn test_jumia_basic_extraction() {
        let html = page(&[jumia_card(
            "Ceramic Cooking Pot Set",
            "EGP 850",
            r#"src="https://img.jumia.is/p/pot.jpg""#,
        )]);

        let products = extract(&html, Site::Jumia, 10);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Ceramic Cooking Pot Set");
        assert_eq!(products[0].price, 850.0);
        assert_eq!(products[0].image_url, "https://img.jumia.is/p/pot.jpg");
    }

    #[test]
    fn test_limit_terminates_across_groups() {
        let cards: Vec<String> = (0..5)
            .map(|i| {
                amazon_card(
                    &format!("B00{i}"),
                    &format!("Mechanical Keyboard {i}"),
                    "$49.99",
                    "https://m.media-amazon.com/images/I/k.jpg",
                )
            })
            .collect();
        let html = page(&cards);

        let products = extract(&html, Site::Amazon, 2);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Mechanical Keyboard 0");
        assert_eq!(products[1].title, "Mechanical Keyboard 1");
    }

    #[test]
    fn test_overlapping_groups_duplicate_below_limit() {
        // One card matches both the s-search-result group and the
        // s-result-item group; with headroom in the limit it is emitted twice.
        let html = page(&[format!(
            r#"<div data-component-type="s-search-result" data-asin="B001" class="s-result-item">
                <h2><span>Noise Cancelling Headphones</span></h2>
                <span class="a-offscreen">$199.00</span>
            </div>"#
        )]);

        let products = extract(&html, Site::Amazon, 10);
        assert!(products.len() >= 2);
        assert_eq!(products[0].title, products[1].title);

        // A limit of one stops before the second group revisits the node
        assert_eq!(extract(&html, Site::Amazon, 1).len(), 1);
    }

    #[test]
    fn test_short_title_rejected() {
        let html = page(&[amazon_card(
            "B001",
            "Mouse",
            "$29.99",
            "https://m.media-amazon.com/images/I/m.jpg",
        )]);

        assert!(extract(&html, Site::Amazon, 10).is_empty());
    }

    #[test]
    fn test_unparseable_price_rejected() {
        let html = page(&[amazon_card(
            "B001",
            "Wireless Vertical Mouse",
            "See price in cart",
            "https://m.media-amazon.com/images/I/m.jpg",
        )]);

        assert!(extract(&html, Site::Amazon, 10).is_empty());
    }

    #[test]
    fn test_zero_price_rejected() {
        let html = page(&[jumia_card("Promotional Sticker Pack", "EGP 0.00", r#"src="x""#)]);
        assert!(extract(&html, Site::Jumia, 10).is_empty());
    }

    #[test]
    fn test_missing_image_degrades_to_empty() {
        let html = page(&[format!(
            r#"<div data-component-type="s-search-result" data-asin="B001">
                <h2><span>Wireless Vertical Mouse</span></h2>
                <span class="a-offscreen">$29.99</span>
            </div>"#
        )]);

        let products = extract(&html, Site::Amazon, 10);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].image_url, "");
    }

    #[test]
    fn test_amazon_relative_image_not_repaired() {
        let html = page(&[amazon_card("B001", "Wireless Vertical Mouse", "$29.99", "/images/1.jpg")]);

        let products = extract(&html, Site::Amazon, 10);
        assert_eq!(products.len(), 1);
        // Every chain entry finds the same relative URL; none qualify
        assert_eq!(products[0].image_url, "");
    }

    #[test]
    fn test_jumia_protocol_relative_image_repaired() {
        let html = page(&[jumia_card(
            "Stainless Steel Kettle",
            "EGP 1,250",
            r#"src="//img.jumia.is/p/kettle.jpg""#,
        )]);

        let products = extract(&html, Site::Jumia, 10);
        assert_eq!(products[0].image_url, "https://img.jumia.is/p/kettle.jpg");
    }

    #[test]
    fn test_jumia_root_relative_image_repaired() {
        let html = page(&[jumia_card("Stainless Steel Kettle", "EGP 1,250", r#"src="/p/kettle.jpg""#)]);

        let products = extract(&html, Site::Jumia, 10);
        assert_eq!(products[0].image_url, "https://www.jumia.com.eg/p/kettle.jpg");
    }

    #[test]
    fn test_jumia_data_src_fallback() {
        // Lazy-loaded images carry data-src and no src
        let html = page(&[jumia_card(
            "Stainless Steel Kettle",
            "EGP 1,250",
            r#"data-src="https://img.jumia.is/p/kettle.jpg""#,
        )]);

        let products = extract(&html, Site::Jumia, 10);
        assert_eq!(products[0].image_url, "https://img.jumia.is/p/kettle.jpg");
    }

    #[test]
    fn test_invalid_field_falls_through_chain_not_node() {
        // First title selector matches an empty span; a later, broader
        // selector still rescues the node.
        let html = page(&[format!(
            r#"<div data-component-type="s-search-result" data-asin="B001">
                <h2 class="a-size-base-plus"><span></span></h2>
                <a><h2><span>Ergonomic Trackball Mouse</span></h2></a>
                <span class="a-offscreen">$59.99</span>
            </div>"#
        )]);

        let products = extract(&html, Site::Amazon, 10);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Ergonomic Trackball Mouse");
    }

    #[test]
    fn test_malformed_html_tolerated() {
        let html = "<div data-component-type='s-search-result'><h2><span>Unclosed tags everywhere";
        let products = extract(html, Site::Amazon, 10);
        // No price present, so nothing validates, and nothing panics
        assert!(products.is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(extract("", Site::Amazon, 10).is_empty());
        assert!(extract("", Site::Jumia, 10).is_empty());
    }

    #[test]
    fn test_document_order_preserved() {
        let cards = vec![
            jumia_card("Portable Blender 500ml", "EGP 600", r#"src="https://img.jumia.is/a.jpg""#),
            jumia_card("Electric Hand Mixer", "EGP 450", r#"src="https://img.jumia.is/b.jpg""#),
        ];
        let html = page(&cards);

        let products = extract(&html, Site::Jumia, 2);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Portable Blender 500ml");
        assert_eq!(products[1].title, "Electric Hand Mixer");
    }
}
