use super::{apply_update, item_key};
use crate::domain::expression::UpdateExpression;
use crate::domain::ports::RecordStore;
use crate::domain::record::Item;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory record store.
///
/// Uses `Arc<RwLock<..>>` so clones share the same collections. Collections
/// spring into existence on first write.
#[derive(Default, Clone)]
pub struct InMemoryRecordStore {
    collections: Arc<RwLock<HashMap<String, HashMap<String, Item>>>>,
}

impl InMemoryRecordStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put(&self, collection: &str, item: Item) -> Result<()> {
        let id = item_key(&item)?.to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, item);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Item>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|items| items.get(id))
            .cloned())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        expression: &UpdateExpression,
    ) -> Result<()> {
        let mut collections = self.collections.write().await;
        let items = collections.entry(collection.to_string()).or_default();
        let item = apply_update(items.remove(id), id, expression)?;
        items.insert(id.to_string(), item);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        if let Some(items) = collections.get_mut(collection) {
            items.remove(id);
        }
        Ok(())
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Item>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, name: &str) -> Item {
        json!({"id": id, "name": name, "inventory": 1})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_put_get() {
        let store = InMemoryRecordStore::new();
        store.put("door", item("a", "Front")).await.unwrap();

        let retrieved = store.get("door", "a").await.unwrap().unwrap();
        assert_eq!(retrieved, item("a", "Front"));

        assert!(store.get("door", "b").await.unwrap().is_none());
        assert!(store.get("task", "a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_put_overwrites() {
        let store = InMemoryRecordStore::new();
        store.put("door", item("a", "Front")).await.unwrap();
        store.put("door", item("a", "Back")).await.unwrap();

        let all = store.scan("door").await.unwrap();
        assert_eq!(all, vec![item("a", "Back")]);
    }

    #[tokio::test]
    async fn test_in_memory_put_requires_key() {
        let store = InMemoryRecordStore::new();
        let keyless = json!({"name": "x"}).as_object().cloned().unwrap();
        assert!(store.put("door", keyless).await.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_update_touches_only_listed_attributes() {
        let store = InMemoryRecordStore::new();
        store.put("door", item("a", "Front")).await.unwrap();

        let update = UpdateExpression::from_assignments([("name", json!("Side"))]);
        store.update("door", "a", &update).await.unwrap();

        let retrieved = store.get("door", "a").await.unwrap().unwrap();
        assert_eq!(retrieved["name"], json!("Side"));
        assert_eq!(retrieved["inventory"], json!(1));
    }

    #[tokio::test]
    async fn test_in_memory_update_missing_key_creates_item() {
        let store = InMemoryRecordStore::new();
        let update = UpdateExpression::from_assignments([("inventory", json!(9))]);
        store.update("door", "new", &update).await.unwrap();

        let retrieved = store.get("door", "new").await.unwrap().unwrap();
        assert_eq!(retrieved["id"], json!("new"));
        assert_eq!(retrieved["inventory"], json!(9));
    }

    #[tokio::test]
    async fn test_in_memory_delete_and_scan() {
        let store = InMemoryRecordStore::new();
        store.put("door", item("a", "Front")).await.unwrap();
        store.put("door", item("b", "Back")).await.unwrap();

        store.delete("door", "a").await.unwrap();
        store.delete("door", "missing").await.unwrap();
        store.delete("nowhere", "a").await.unwrap();

        let all = store.scan("door").await.unwrap();
        assert_eq!(all, vec![item("b", "Back")]);
        assert!(store.scan("nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_clones_share_state() {
        let store = InMemoryRecordStore::new();
        let clone = store.clone();
        clone.put("task", item("t", "Knock")).await.unwrap();
        assert!(store.get("task", "t").await.unwrap().is_some());
    }
}
