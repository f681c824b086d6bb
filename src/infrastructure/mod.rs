//! Record store adapters.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

use crate::domain::expression::UpdateExpression;
use crate::domain::record::{Item, KEY_ATTRIBUTE};
use crate::error::{Result, StoreError};
use serde_json::Value;

/// Applies `expression` to `existing`, or to a fresh item holding only the key.
pub(crate) fn apply_update(
    existing: Option<Item>,
    id: &str,
    expression: &UpdateExpression,
) -> Result<Item> {
    let assignments = expression.resolve()?;
    let mut item = existing.unwrap_or_else(|| {
        let mut item = Item::new();
        item.insert(KEY_ATTRIBUTE.to_string(), Value::from(id));
        item
    });
    for (attribute, value) in assignments {
        if attribute != KEY_ATTRIBUTE {
            item.insert(attribute, value);
        }
    }
    Ok(item)
}

/// Reads the key attribute of an item being stored.
pub(crate) fn item_key(item: &Item) -> Result<&str> {
    item.get(KEY_ATTRIBUTE)
        .and_then(Value::as_str)
        .ok_or(StoreError::InvalidItem)
}
