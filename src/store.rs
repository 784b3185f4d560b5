//! Persistence boundary for validated product records.

use crate::market::models::ExtractedProduct;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// A record with identity assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProduct {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub image_url: String,
}

/// External "create record" operation the orchestrator hands records to.
///
/// Implementations may fail per record; the orchestrator catches and skips.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists one record and returns it with its stored identity.
    async fn create(&self, product: &ExtractedProduct) -> Result<StoredProduct>;
}

/// In-memory store used by the CLI and tests.
pub struct MemoryStore {
    next_id: AtomicU64,
    records: Mutex<Vec<StoredProduct>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self { next_id: AtomicU64::new(1), records: Mutex::new(Vec::new()) }
    }

    /// Returns a snapshot of everything stored so far.
    pub fn all(&self) -> Vec<StoredProduct> {
        self.records.lock().expect("store mutex poisoned").clone()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn create(&self, product: &ExtractedProduct) -> Result<StoredProduct> {
        let record = StoredProduct {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: product.title.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
        };
        self.records.lock().expect("store mutex poisoned").push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(title: &str) -> ExtractedProduct {
        ExtractedProduct { title: title.to_string(), price: 29.99, image_url: String::new() }
    }

    #[tokio::test]
    async fn test_memory_store_assigns_sequential_ids() {
        let store = MemoryStore::new();

        let first = store.create(&make_product("Wireless Vertical Mouse")).await.unwrap();
        let second = store.create(&make_product("Mechanical Keyboard")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_preserves_fields() {
        let store = MemoryStore::new();
        let product = ExtractedProduct {
            title: "Ceramic Cooking Pot".to_string(),
            price: 850.0,
            image_url: "https://img.jumia.is/p/pot.jpg".to_string(),
        };

        let record = store.create(&product).await.unwrap();
        assert_eq!(record.title, product.title);
        assert_eq!(record.price, product.price);
        assert_eq!(record.image_url, product.image_url);

        assert_eq!(store.all(), vec![record]);
    }

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_stored_product_serde() {
        let record = StoredProduct {
            id: 7,
            title: "Wireless Vertical Mouse".to_string(),
            price: 29.99,
            image_url: String::new(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: StoredProduct = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
