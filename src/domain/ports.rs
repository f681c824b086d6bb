use super::expression::UpdateExpression;
use super::record::Item;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Key-value capability every collection is accessed through.
///
/// Items are keyed by their `id` attribute. All writes are unconditional.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts or replaces the item stored under its `id`.
    async fn put(&self, collection: &str, item: Item) -> Result<()>;
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Item>>;
    /// Applies `expression` to the item under `id`, creating it if absent.
    async fn update(&self, collection: &str, id: &str, expression: &UpdateExpression)
    -> Result<()>;
    /// Removes the item under `id`. Removing a missing key succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
    async fn scan(&self, collection: &str) -> Result<Vec<Item>>;
}

pub type RecordStoreHandle = Arc<dyn RecordStore>;
pub type RecordStoreFactory = Box<dyn Fn() -> RecordStoreHandle + Send + Sync>;
