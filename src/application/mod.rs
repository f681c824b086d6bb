//! Application layer containing the CRUD engine and request routing.
//!
//! `EntityEngine` runs the five record operations against one collection.
//! `Dispatcher` owns one engine per entity kind and maps inbound operation
//! names onto them.

pub mod dispatcher;
pub mod engine;
pub mod outcome;
