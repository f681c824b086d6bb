use super::outcome::Outcome;
use crate::domain::expression::UpdateExpression;
use crate::domain::ports::RecordStoreHandle;
use crate::domain::record::{EntityKind, EntityRecord, RecordPatch};
use crate::error::{Result, StoreError};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// CRUD operations for one entity kind.
///
/// `EntityEngine` is bound to a single collection of the injected store.
/// It holds no state of its own; every call is one request to the store.
/// Store errors are logged here and surface only as `Outcome::Failed`.
#[derive(Clone)]
pub struct EntityEngine {
    kind: EntityKind,
    collection: String,
    store: RecordStoreHandle,
}

impl EntityEngine {
    /// Creates a new `EntityEngine`.
    ///
    /// # Arguments
    ///
    /// * `kind` - The entity kind served by this engine.
    /// * `collection` - The store collection records of this kind live in.
    /// * `store` - The record store shared by all engines.
    pub fn new(kind: EntityKind, collection: impl Into<String>, store: RecordStoreHandle) -> Self {
        Self {
            kind,
            collection: collection.into(),
            store,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Stores `record`, assigning a fresh id when it has none.
    ///
    /// Overwrites any record with the same id.
    pub async fn create(&self, mut record: EntityRecord) -> Outcome<EntityRecord> {
        if record.id.is_empty() {
            record.id = Uuid::new_v4().to_string();
        }

        let result = match record.to_item() {
            Ok(item) => self.store.put(&self.collection, item).await,
            Err(e) => Err(e),
        };
        self.settle("create", result.map(|()| record))
    }

    /// Fetches one record. A missing id is `NotFound`, not a failure.
    pub async fn read(&self, id: &str) -> Outcome<EntityRecord> {
        let result = match self.store.get(&self.collection, id).await {
            Ok(Some(item)) => EntityRecord::from_item(item).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        match self.settle("read", result) {
            Outcome::Success(Some(record)) => Outcome::Success(record),
            Outcome::Success(None) => Outcome::NotFound,
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Invalid => Outcome::Invalid,
            Outcome::Failed => Outcome::Failed,
        }
    }

    /// Every record in the collection, in no particular order.
    ///
    /// Items that do not decode as records are skipped with a warning.
    pub async fn list(&self) -> Outcome<Vec<EntityRecord>> {
        let result = self.store.scan(&self.collection).await.map(|items| {
            items
                .into_iter()
                .filter_map(|item| match EntityRecord::from_item(item) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(
                            kind = %self.kind,
                            collection = %self.collection,
                            error = %e,
                            "skipping undecodable item"
                        );
                        None
                    }
                })
                .collect()
        });
        self.settle("list", result)
    }

    /// Sets only the attributes present in `patch` and echoes it back.
    ///
    /// A patch without an id is rejected. A patch carrying nothing besides
    /// the id succeeds without touching the store.
    pub async fn update(&self, patch: RecordPatch) -> Outcome<RecordPatch> {
        if patch.id.is_empty() {
            debug!(kind = %self.kind, "update rejected: missing id");
            return Outcome::Invalid;
        }

        let expression = UpdateExpression::from_assignments(patch.assignments());
        if expression.is_empty() {
            debug!(kind = %self.kind, id = %patch.id, "update has no attributes, skipping");
            return Outcome::Success(patch);
        }

        let result = self
            .store
            .update(&self.collection, &patch.id, &expression)
            .await;
        self.settle("update", result.map(|()| patch))
    }

    /// Removes a record and returns its id, whether or not it existed.
    pub async fn delete(&self, id: &str) -> Outcome<String> {
        let result = self.store.delete(&self.collection, id).await;
        self.settle("delete", result.map(|()| id.to_string()))
    }

    fn settle<T>(&self, operation: &'static str, result: Result<T>) -> Outcome<T> {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => {
                self.log_failure(operation, &e);
                Outcome::Failed
            }
        }
    }

    fn log_failure(&self, operation: &'static str, err: &StoreError) {
        error!(
            kind = %self.kind,
            collection = %self.collection,
            operation,
            error = %err,
            "record store error"
        );
    }
}
