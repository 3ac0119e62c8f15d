use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Purchase, PurchaseId};

use super::{KeyValueStore, Result, PURCHASES_KEY};

/// Ordered purchase collection persisted as a single JSON blob.
///
/// Every mutating call is a full load, modify, save cycle.
pub struct PurchaseStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl PurchaseStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, PURCHASES_KEY)
    }

    pub fn with_key(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Returns the stored purchases, or an empty list when nothing readable is stored.
    ///
    /// Records saved without an id get one here, and the backfilled collection is written back.
    pub fn load_all(&self) -> Vec<Purchase> {
        let blob = match self.backend.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read purchases; treating as empty");
                return Vec::new();
            }
        };
        let mut purchases: Vec<Purchase> = match serde_json::from_str(&blob) {
            Ok(purchases) => purchases,
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored purchases are corrupt; treating as empty");
                return Vec::new();
            }
        };

        let mut backfilled = 0usize;
        for purchase in purchases.iter_mut().filter(|p| !p.has_id()) {
            purchase.id = Uuid::new_v4();
            backfilled += 1;
        }
        if backfilled > 0 {
            info!(count = backfilled, "assigned ids to purchases stored without one");
            if let Err(err) = self.save_all(&purchases) {
                warn!(error = %err, "failed to persist backfilled purchase ids");
            }
        }
        purchases
    }

    pub fn save_all(&self, purchases: &[Purchase]) -> Result<()> {
        let json = serde_json::to_string(purchases)?;
        self.backend.set(&self.key, &json)
    }

    pub fn append(&self, purchase: Purchase) -> Result<()> {
        let mut purchases = self.load_all();
        purchases.push(purchase);
        self.save_all(&purchases)
    }

    pub fn replace_at(&self, index: usize, purchase: Purchase) -> Result<()> {
        let mut purchases = self.load_all();
        let len = purchases.len();
        let slot = purchases
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;
        *slot = purchase;
        self.save_all(&purchases)
    }

    pub fn remove_at(&self, index: usize) -> Result<Purchase> {
        let mut purchases = self.load_all();
        if index >= purchases.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: purchases.len(),
            });
        }
        let removed = purchases.remove(index);
        self.save_all(&purchases)?;
        Ok(removed)
    }

    pub fn position_of(&self, id: PurchaseId) -> Option<usize> {
        self.load_all().iter().position(|p| p.id == id)
    }

    /// Overwrites the purchase with `id` in place, keeping its position.
    pub fn replace(&self, id: PurchaseId, mut purchase: Purchase) -> Result<()> {
        let mut purchases = self.load_all();
        let slot = purchases
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LedgerError::PurchaseNotFound(id))?;
        purchase.id = id;
        *slot = purchase;
        self.save_all(&purchases)
    }

    pub fn remove(&self, id: PurchaseId) -> Result<Purchase> {
        let mut purchases = self.load_all();
        let index = purchases
            .iter()
            .position(|p| p.id == id)
            .ok_or(LedgerError::PurchaseNotFound(id))?;
        let removed = purchases.remove(index);
        self.save_all(&purchases)?;
        Ok(removed)
    }
}
