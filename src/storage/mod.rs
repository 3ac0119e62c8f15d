pub mod json_backend;
pub mod memory;
pub mod purchase_store;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Key under which the purchase collection is persisted.
pub const PURCHASES_KEY: &str = "purchases";

/// Abstraction over string-blob key-value persistence.
///
/// `set` must either replace the whole value or fail; readers never observe a partial write.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use purchase_store::PurchaseStore;
