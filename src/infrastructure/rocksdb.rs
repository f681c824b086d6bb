use super::{apply_update, item_key};
use crate::domain::expression::UpdateExpression;
use crate::domain::ports::RecordStore;
use crate::domain::record::Item;
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A persistent record store backed by RocksDB.
///
/// Every collection lives in its own column family. Items are stored as JSON
/// keyed by the bytes of their `id`.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
/// Updates are a read followed by a write, so they are serialized through
/// `update_lock` to keep concurrent updates from dropping each other's
/// attributes.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    update_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that a column family exists for each name in `collections`.
    /// Repeated names share one column family.
    pub fn open<P, I, S>(path: P, collections: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let mut seen = HashSet::new();
        let descriptors: Vec<ColumnFamilyDescriptor> = collections
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| seen.insert(name.clone()))
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            update_lock: Arc::new(Mutex::new(())),
        })
    }

    fn column_family(&self, collection: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Item> {
        match serde_json::from_slice(bytes)? {
            Value::Object(item) => Ok(item),
            _ => Err(StoreError::InvalidItem),
        }
    }
}

#[async_trait]
impl RecordStore for RocksDBStore {
    async fn put(&self, collection: &str, item: Item) -> Result<()> {
        let cf = self.column_family(collection)?;
        let key = item_key(&item)?.as_bytes().to_vec();
        let value = serde_json::to_vec(&item)?;

        self.db.put_cf(cf, key, value)?;

        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Item>> {
        let cf = self.column_family(collection)?;

        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        expression: &UpdateExpression,
    ) -> Result<()> {
        let _guard = self.update_lock.lock().await;
        let cf = self.column_family(collection)?;

        let existing = match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Some(Self::decode(&bytes)?),
            None => None,
        };
        let item = apply_update(existing, id, expression)?;

        self.db.put_cf(cf, id.as_bytes(), serde_json::to_vec(&item)?)?;

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let cf = self.column_family(collection)?;
        self.db.delete_cf(cf, id.as_bytes())?;
        Ok(())
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Item>> {
        let cf = self.column_family(collection)?;

        let mut items = Vec::new();
        for entry in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = entry?;
            items.push(Self::decode(&value)?);
        }

        Ok(items)
    }
}
