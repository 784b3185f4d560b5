//! Output formatting for stored records (table, JSON).

use crate::config::OutputFormat;
use crate::store::StoredProduct;

/// Formats scrape results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a list of stored records.
    pub fn format_products(&self, products: &[StoredProduct]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Table => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
        }
    }

    fn json_products(&self, products: &[StoredProduct]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    fn table_products(&self, products: &[StoredProduct]) -> String {
        let id_width = 6;
        let price_width = 12;
        let title_width = 60;

        let mut lines = Vec::new();

        lines.push(format!("{:<id_width$}  {:<price_width$}  {}", "ID", "Price", "Title"));
        lines.push(format!("{:-<id_width$}  {:-<price_width$}  {:-<title_width$}", "", "", ""));

        for product in products {
            let title: String = if product.title.chars().count() > title_width {
                let truncated: String = product.title.chars().take(title_width - 3).collect();
                format!("{}...", truncated)
            } else {
                product.title.clone()
            };

            lines.push(format!(
                "{:<id_width$}  {:>price_width$.2}  {}",
                product.id, product.price, title
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }
}
