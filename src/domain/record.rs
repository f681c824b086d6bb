use crate::error::{Result, StoreError};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Attribute map as held by the record store.
pub type Item = Map<String, Value>;

/// Name of the key attribute in every collection.
pub const KEY_ATTRIBUTE: &str = "id";

/// The seven kinds of records the backend manages.
///
/// Every kind shares the same record shape; each is stored in its own
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Assignment,
    Campaign,
    Door,
    Resident,
    Route,
    Task,
    Volunteer,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Assignment,
        EntityKind::Campaign,
        EntityKind::Door,
        EntityKind::Resident,
        EntityKind::Route,
        EntityKind::Task,
        EntityKind::Volunteer,
    ];

    /// The capitalized name used in operation names, e.g. `Door` in `createDoor`.
    pub fn type_name(self) -> &'static str {
        match self {
            EntityKind::Assignment => "Assignment",
            EntityKind::Campaign => "Campaign",
            EntityKind::Door => "Door",
            EntityKind::Resident => "Resident",
            EntityKind::Route => "Route",
            EntityKind::Task => "Task",
            EntityKind::Volunteer => "Volunteer",
        }
    }

    /// The name used by the list operation, e.g. `Doors` in `listDoors`.
    pub fn plural(self) -> String {
        format!("{}s", self.type_name())
    }

    /// Environment variable holding the collection name for this kind.
    pub fn table_env_var(self) -> String {
        format!("{}_TABLE", self.type_name().to_ascii_uppercase())
    }

    pub fn default_collection(self) -> String {
        self.type_name().to_ascii_lowercase()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A record as created and read back.
///
/// Attributes besides `id` are optional: an update addressed to an id that was
/// never created leaves an item holding only the key and the updated
/// attributes, and such items still read and list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Empty until the engine assigns one on create.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "price")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
}

impl EntityRecord {
    pub fn to_item(&self) -> Result<Item> {
        match serde_json::to_value(self)? {
            Value::Object(item) => Ok(item),
            _ => Err(StoreError::InvalidItem),
        }
    }

    pub fn from_item(item: Item) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(item))?)
    }
}

/// A sparse update: the key plus whichever attributes should change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "price")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
}

impl RecordPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// The supplied attributes, in declaration order. `id` is never included.
    pub fn assignments(&self) -> Vec<(&'static str, Value)> {
        let mut pairs = Vec::new();
        if let Some(name) = &self.name {
            pairs.push(("name", Value::from(name.as_str())));
        }
        if let Some(description) = &self.description {
            pairs.push(("description", Value::from(description.as_str())));
        }
        if let Some(price) = self.price {
            pairs.push(("price", price::to_value(price)));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", Value::from(category.as_str())));
        }
        if let Some(inventory) = self.inventory {
            pairs.push(("inventory", Value::from(inventory)));
        }
        pairs
    }
}

/// Treats an explicit `null` id the same as a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Prices travel as JSON numbers. Whole amounts are written as integers so
/// `0` comes back as `0`, fractional ones as floats.
///
/// Only values within `Decimal`'s range (about ±7.9e28) are accepted.
mod price {
    use super::*;
    use serde::Serializer;

    pub fn to_value(value: Decimal) -> Value {
        if value.fract().is_zero()
            && let Some(whole) = value.to_i64()
        {
            return Value::from(whole);
        }
        value
            .to_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }

    pub fn serialize<S>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(price) => to_value(*price).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> std::result::Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::float_option::deserialize(deserializer)
    }
}
