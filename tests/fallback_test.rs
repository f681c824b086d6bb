mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use common::{event_line, front_door};
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let mut events = tempfile::NamedTempFile::new().unwrap();
    writeln!(events, "{}", event_line("createRoute", front_door())).unwrap();

    let mut cmd = Command::new(cargo_bin!("direct-campaign"));
    cmd.arg(events.path()).arg("--db-path").arg("some_db");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"Front\""))
        .stderr(predicate::str::contains("Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let mut events = tempfile::NamedTempFile::new().unwrap();
    writeln!(events, "{}", event_line("createRoute", front_door())).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("direct-campaign"));
    cmd.arg(events.path()).arg("--db-path").arg(&db_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Falling back").not());
}
