//! Inbound request shapes and the readers that produce them.

pub mod event;
