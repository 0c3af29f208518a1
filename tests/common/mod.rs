#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use rupeewise::{core::TransactionStore, storage::JsonStorage};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique data directory that outlives the calling test.
pub fn data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Loads a store persisted as JSON under `base`.
pub fn open_store(base: &Path) -> TransactionStore {
    let storage = JsonStorage::new(Some(base.to_path_buf())).expect("create json storage backend");
    TransactionStore::load(Box::new(storage))
}

/// The CLI binary in script mode, isolated to `home` and without AI credentials.
pub fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rupeewise_cli").expect("binary built");
    cmd.env("RUPEEWISE_CLI_SCRIPT", "1")
        .env("RUPEEWISE_HOME", home)
        .env_remove("RUPEEWISE_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG");
    cmd
}
