#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use earning_ledger::{
    config::ConfigManager,
    core::services::PurchaseService,
    currency::ExchangeRate,
    storage::{JsonFileStore, PurchaseStore},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates a file-backed store and config manager rooted in a fresh directory.
pub fn setup_test_env() -> (PurchaseStore, ConfigManager) {
    let base = temp_base();
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    let backend =
        JsonFileStore::new(config_manager.store_dir()).expect("create json store backend");
    (PurchaseStore::new(Box::new(backend)), config_manager)
}

pub fn setup_service() -> PurchaseService {
    let (store, _) = setup_test_env();
    PurchaseService::new(store, ExchangeRate::default())
}
