use super::engine::EntityEngine;
use super::outcome::Outcome;
use crate::config::TableConfig;
use crate::domain::ports::RecordStoreHandle;
use crate::domain::record::{EntityKind, EntityRecord, RecordPatch};
use crate::interfaces::event::ApiEvent;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// The five things a resolver can ask of an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Update,
    Delete,
    Get,
    List,
}

impl Verb {
    pub const ALL: [Verb; 5] = [Verb::Create, Verb::Update, Verb::Delete, Verb::Get, Verb::List];

    /// The resolver field name for this verb on `kind`, e.g. `listDoors`.
    pub fn field_name(self, kind: EntityKind) -> String {
        match self {
            Verb::Create => format!("create{}", kind.type_name()),
            Verb::Update => format!("update{}", kind.type_name()),
            Verb::Delete => format!("delete{}", kind.type_name()),
            Verb::Get => format!("get{}", kind.type_name()),
            Verb::List => format!("list{}", kind.plural()),
        }
    }
}

/// A recognized resolver field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub kind: EntityKind,
    pub verb: Verb,
}

impl Operation {
    pub fn parse(field_name: &str) -> Option<Self> {
        EntityKind::ALL.into_iter().find_map(|kind| {
            Verb::ALL
                .into_iter()
                .find(|verb| verb.field_name(kind) == field_name)
                .map(|verb| Operation { kind, verb })
        })
    }
}

/// Whatever a successful operation hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Record(EntityRecord),
    Patch(RecordPatch),
    Records(Vec<EntityRecord>),
    Id(String),
}

/// Routes resolver invocations to the engine for their entity kind.
pub struct Dispatcher {
    engines: HashMap<EntityKind, EntityEngine>,
}

impl Dispatcher {
    /// Builds one engine per entity kind, all sharing `store`.
    pub fn new(store: RecordStoreHandle, tables: &TableConfig) -> Self {
        let engines = EntityKind::ALL
            .into_iter()
            .map(|kind| {
                let engine = EntityEngine::new(kind, tables.table(kind), store.clone());
                (kind, engine)
            })
            .collect();
        Self { engines }
    }

    pub fn engine(&self, kind: EntityKind) -> Option<&EntityEngine> {
        self.engines.get(&kind)
    }

    /// Runs the operation named by `event`.
    ///
    /// Returns `None` when the field name is not a known operation.
    pub async fn dispatch(&self, event: &ApiEvent) -> Option<Outcome<Payload>> {
        let Some(operation) = Operation::parse(event.field_name()) else {
            debug!(field = event.field_name(), "unrecognized operation, ignoring");
            return None;
        };
        let engine = self.engines.get(&operation.kind)?;

        debug!(
            field = event.field_name(),
            kind = %engine.kind(),
            collection = engine.collection(),
            caller = event.username().unwrap_or("anonymous"),
            "dispatching"
        );

        let outcome = match operation.verb {
            Verb::Create => match decode::<EntityRecord>(event) {
                Some(record) => engine.create(record).await.map(Payload::Record),
                None => Outcome::Invalid,
            },
            Verb::Update => match decode::<RecordPatch>(event) {
                Some(patch) => engine.update(patch).await.map(Payload::Patch),
                None => Outcome::Invalid,
            },
            Verb::Delete => match id_argument(event) {
                Some(id) => engine.delete(id).await.map(Payload::Id),
                None => Outcome::Invalid,
            },
            Verb::Get => match id_argument(event) {
                Some(id) => engine.read(id).await.map(Payload::Record),
                None => Outcome::Invalid,
            },
            Verb::List => engine.list().await.map(Payload::Records),
        };
        Some(outcome)
    }

    /// Like `dispatch`, rendered as the JSON result the gateway returns.
    pub async fn handle(&self, event: &ApiEvent) -> Value {
        match self.dispatch(event).await {
            Some(outcome) => outcome.into_json(),
            None => Value::Null,
        }
    }
}

fn decode<T: DeserializeOwned>(event: &ApiEvent) -> Option<T> {
    match serde_json::from_value(event.arguments.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(field = event.field_name(), error = %e, "rejected arguments");
            None
        }
    }
}

/// Accepts both `{"id": ".."}` and a bare string id.
fn id_argument(event: &ApiEvent) -> Option<&str> {
    let id = event.id_argument().or_else(|| event.arguments.as_str());
    if id.is_none() {
        warn!(field = event.field_name(), "missing id argument");
    }
    id
}
