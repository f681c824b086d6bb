use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};

/// A resolver invocation as delivered by the GraphQL gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEvent {
    pub info: FieldInfo,
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
    #[serde(default)]
    pub identity: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub field_name: String,
}

/// The authenticated caller. Carried along for logging only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    #[serde(default)]
    pub claims: HashMap<String, Vec<String>>,
}

fn empty_arguments() -> Value {
    Value::Object(Map::new())
}

impl ApiEvent {
    pub fn new(field_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            info: FieldInfo {
                field_name: field_name.into(),
            },
            arguments,
            identity: None,
        }
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn field_name(&self) -> &str {
        &self.info.field_name
    }

    /// The `id` argument, if present and a string.
    pub fn id_argument(&self) -> Option<&str> {
        self.arguments.get("id").and_then(Value::as_str)
    }

    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.username.as_str())
    }
}

/// Reads events from a JSON-lines source, one event per line.
///
/// Blank lines are skipped. A line that fails to parse yields an error
/// without ending the stream.
pub struct EventReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> EventReader<R> {
    /// Creates a new `EventReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes events.
    pub fn events(self) -> impl Iterator<Item = Result<ApiEvent>> {
        self.reader.lines().filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(serde_json::from_str(&line).map_err(StoreError::from)),
            Err(e) => Some(Err(StoreError::from(e))),
        })
    }
}
