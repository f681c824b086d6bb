use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Diagnostic, Debug)]
pub enum StoreError {
    #[error("unknown collection: {0}")]
    #[diagnostic(code(store::unknown_collection))]
    UnknownCollection(String),

    #[error("malformed update expression: {0}")]
    #[diagnostic(code(store::malformed_expression))]
    MalformedExpression(String),

    #[error("stored item is not an attribute map")]
    #[diagnostic(code(store::invalid_item))]
    InvalidItem,

    #[error("codec error: {0}")]
    #[diagnostic(code(store::codec))]
    Codec(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(store::io))]
    Io(#[from] std::io::Error),

    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    #[diagnostic(code(store::backend))]
    Backend(#[from] rocksdb::Error),
}
