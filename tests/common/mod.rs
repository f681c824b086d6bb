#![allow(dead_code)]

use direct_campaign::application::dispatcher::Dispatcher;
use direct_campaign::config::TableConfig;
use direct_campaign::domain::record::EntityRecord;
use direct_campaign::infrastructure::in_memory::InMemoryRecordStore;
use rand::Rng;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::sync::Arc;

pub fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(InMemoryRecordStore::new()), &TableConfig::default())
}

pub fn front_door() -> Value {
    json!({
        "name": "Front",
        "description": "Main entrance",
        "price": 0,
        "category": "exterior",
        "inventory": 1
    })
}

/// A record without an id and with randomized attributes.
pub fn random_record(rng: &mut impl Rng, n: usize) -> EntityRecord {
    EntityRecord {
        id: String::new(),
        name: Some(format!("record-{n}")),
        description: Some(format!("generated #{}", rng.gen_range(0..10_000))),
        price: Some(Decimal::from(rng.gen_range(0..1_000i64))),
        category: Some(["north", "south", "east", "west"][rng.gen_range(0..4)].to_string()),
        inventory: Some(rng.gen_range(0..500)),
    }
}

pub fn event_line(field_name: &str, arguments: Value) -> String {
    json!({
        "info": {"fieldName": field_name},
        "arguments": arguments,
        "identity": {"username": "tester", "claims": {}}
    })
    .to_string()
}
