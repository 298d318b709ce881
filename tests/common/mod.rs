#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use bank_ledger::{
    core::{BankDirectory, Clock, FixedClock},
    storage::DataLayout,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date")
}

pub fn test_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(test_date()))
}

/// Creates an isolated data layout backed by a unique directory.
pub fn test_layout() -> DataLayout {
    let temp = TempDir::new().expect("create temp dir");
    let root: PathBuf = temp.path().join("database");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    DataLayout::new(root)
}

/// Opens a fresh directory over an empty layout.
pub fn setup_test_env() -> (BankDirectory, DataLayout) {
    let layout = test_layout();
    let directory =
        BankDirectory::open_with_clock(layout.clone(), test_clock()).expect("open directory");
    (directory, layout)
}

/// Re-opens a directory over an existing layout, as a restarted process would.
pub fn reopen(layout: &DataLayout) -> BankDirectory {
    BankDirectory::open_with_clock(layout.clone(), test_clock()).expect("reopen directory")
}
