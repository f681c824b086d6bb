//! Domain types shared by every entity kind, plus the storage port the
//! engine is written against.

pub mod expression;
pub mod ports;
pub mod record;
