use clap::Parser;
use direct_campaign::application::dispatcher::Dispatcher;
use direct_campaign::config::TableConfig;
use direct_campaign::domain::ports::RecordStoreHandle;
use direct_campaign::infrastructure::in_memory::InMemoryRecordStore;
use direct_campaign::interfaces::event::EventReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file of resolver events, one JSON object per line
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let tables = TableConfig::from_env();
    let store = open_store(cli.db_path, &tables)?;
    let dispatcher = Dispatcher::new(store, &tables);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for event_result in reader.events() {
        match event_result {
            Ok(event) => {
                let result = dispatcher.handle(&event).await;
                writeln!(out, "{}", result).into_diagnostic()?;
            }
            Err(e) => {
                error!(error = %e, "Error reading event");
            }
        }
    }

    out.flush().into_diagnostic()?;
    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>, tables: &TableConfig) -> Result<RecordStoreHandle> {
    use direct_campaign::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => {
            info!(path = %path.display(), "using RocksDB storage");
            let store = RocksDBStore::open(path, tables.collections())?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(InMemoryRecordStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>, _tables: &TableConfig) -> Result<RecordStoreHandle> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    } else {
        info!("using in-memory storage");
    }
    Ok(Arc::new(InMemoryRecordStore::new()))
}
