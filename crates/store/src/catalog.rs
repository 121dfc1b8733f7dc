//! Item catalog trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::ItemId;
use domain::Item;
use tokio::sync::RwLock;

use crate::Result;

/// Read access to purchasable items.
///
/// Used to resolve order lines before they reach the processor.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// Returns the item with the given ID, if it exists.
    async fn get(&self, item_id: ItemId) -> Result<Option<Item>>;

    /// Adds an item, replacing any existing item with the same ID.
    async fn add(&self, item: Item) -> Result<()>;
}

/// In-memory item catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemCatalog {
    items: Arc<RwLock<HashMap<ItemId, Item>>>,
}

impl InMemoryItemCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of items in the catalog.
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl ItemCatalog for InMemoryItemCatalog {
    async fn get(&self, item_id: ItemId) -> Result<Option<Item>> {
        Ok(self.items.read().await.get(&item_id).cloned())
    }

    async fn add(&self, item: Item) -> Result<()> {
        self.items.write().await.insert(item.id, item);
        Ok(())
    }
}
