//! Add, edit, and delete flows for purchases, driven by an explicit edit session.

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::edit_session::EditSession;
use crate::core::services::{ServiceResult, Summary, SummaryService};
use crate::currency::ExchangeRate;
use crate::errors::LedgerError;
use crate::ledger::{MonthScope, Purchase, PurchaseForm};
use crate::storage::PurchaseStore;

/// Whether `add_or_update` created a new record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    Updated,
}

pub struct PurchaseService {
    store: PurchaseStore,
    rate: ExchangeRate,
    month_scope: MonthScope,
}

impl PurchaseService {
    pub fn new(store: PurchaseStore, rate: ExchangeRate) -> Self {
        Self {
            store,
            rate,
            month_scope: MonthScope::default(),
        }
    }

    pub fn with_month_scope(mut self, scope: MonthScope) -> Self {
        self.month_scope = scope;
        self
    }

    pub fn rate(&self) -> ExchangeRate {
        self.rate
    }

    pub fn store(&self) -> &PurchaseStore {
        &self.store
    }

    pub fn list(&self) -> Vec<Purchase> {
        self.store.load_all()
    }

    /// Validates `form` and appends it, or replaces the record `session` is editing.
    ///
    /// A validation failure leaves both the store and the session untouched. A stale
    /// session (its record was removed) fails with `PurchaseNotFound` and is reset.
    pub fn add_or_update(
        &self,
        form: &PurchaseForm,
        session: &mut EditSession,
    ) -> ServiceResult<(Purchase, SaveOutcome)> {
        let input = form.validate()?;
        match session.target() {
            None => {
                let purchase = Purchase::from_input(Uuid::new_v4(), &input, self.rate);
                self.store.append(purchase.clone())?;
                info!(id = %purchase.id, date = %purchase.date, "purchase added");
                Ok((purchase, SaveOutcome::Added))
            }
            Some(id) => {
                let purchase = Purchase::from_input(id, &input, self.rate);
                let result = self.store.replace(id, purchase.clone());
                session.reset();
                if let Err(err) = result {
                    warn!(%id, error = %err, "edit target no longer available");
                    return Err(err.into());
                }
                info!(%id, date = %purchase.date, "purchase updated");
                Ok((purchase, SaveOutcome::Updated))
            }
        }
    }

    /// Starts editing the purchase at `index`, returning its current form values.
    ///
    /// An out-of-range index leaves `session` as it was.
    pub fn begin_edit(
        &self,
        index: usize,
        session: &mut EditSession,
    ) -> ServiceResult<PurchaseForm> {
        let purchases = self.store.load_all();
        let Some(purchase) = purchases.get(index) else {
            warn!(index, len = purchases.len(), "edit requested for a missing row");
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: purchases.len(),
            }
            .into());
        };
        *session = EditSession::Editing(purchase.id);
        Ok(purchase.to_form())
    }

    pub fn cancel_edit(&self, session: &mut EditSession) {
        session.reset();
    }

    /// Deletes the purchase at `index`. A successful delete abandons any edit in progress;
    /// an out-of-range index changes nothing.
    pub fn delete(&self, index: usize, session: &mut EditSession) -> ServiceResult<Purchase> {
        let purchases = self.store.load_all();
        let id = purchases
            .get(index)
            .map(|p| p.id)
            .ok_or(LedgerError::IndexOutOfRange {
                index,
                len: purchases.len(),
            })?;
        let removed = self.store.remove(id)?;
        session.reset();
        info!(%id, "purchase deleted");
        Ok(removed)
    }

    pub fn summarize(&self, today: NaiveDate) -> Summary {
        SummaryService::summarize_with_scope(&self.store.load_all(), today, self.month_scope)
    }

    /// Display position (0-based) of the record being edited, if it still exists.
    pub fn editing_index(&self, session: &EditSession) -> Option<usize> {
        session.target().and_then(|id| self.store.position_of(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;
    use crate::errors::ValidationError;
    use crate::storage::MemoryStore;
    use rust_decimal_macros::dec;

    fn service() -> PurchaseService {
        PurchaseService::new(
            PurchaseStore::new(Box::new(MemoryStore::new())),
            ExchangeRate::default(),
        )
    }

    #[test]
    fn add_then_edit_replaces_in_place() {
        let service = service();
        let mut session = EditSession::Idle;
        service
            .add_or_update(&PurchaseForm::new("2024-01-01", "10", "1"), &mut session)
            .expect("add first");
        service
            .add_or_update(&PurchaseForm::new("2024-01-02", "20", "2"), &mut session)
            .expect("add second");

        let form = service.begin_edit(0, &mut session).expect("begin edit");
        assert_eq!(form.purchase_amount, "10.00");
        assert!(session.is_editing());

        let (updated, outcome) = service
            .add_or_update(&PurchaseForm::new("2024-01-05", "15", "1.5"), &mut session)
            .expect("update");
        assert_eq!(outcome, SaveOutcome::Updated);
        assert_eq!(session, EditSession::Idle);

        let purchases = service.list();
        assert_eq!(purchases.len(), 2);
        assert_eq!(purchases[0].id, updated.id);
        assert_eq!(purchases[0].purchase_usd, dec!(15.00));
        assert_eq!(purchases[0].earning_eur, dec!(1.37));
    }

    #[test]
    fn invalid_form_keeps_session_and_store() {
        let service = service();
        let mut session = EditSession::Idle;
        service
            .add_or_update(&PurchaseForm::new("2024-01-01", "10", "1"), &mut session)
            .expect("add");
        service.begin_edit(0, &mut session).expect("begin edit");
        let before = service.list();

        let err = service
            .add_or_update(&PurchaseForm::new("2024-01-01", "abc", "1"), &mut session)
            .expect_err("non-numeric amount");
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::InvalidAmount { .. })
        ));
        assert!(session.is_editing());
        assert_eq!(service.list(), before);
    }

    #[test]
    fn delete_invalidates_pending_edit() {
        let service = service();
        let mut session = EditSession::Idle;
        for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            service
                .add_or_update(&PurchaseForm::new(day, "10", "1"), &mut session)
                .expect("add");
        }
        service.begin_edit(2, &mut session).expect("begin edit");
        let removed = service.delete(0, &mut session).expect("delete");
        assert_eq!(removed.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(session, EditSession::Idle);

        let (_, outcome) = service
            .add_or_update(&PurchaseForm::new("2024-02-01", "5", "1"), &mut session)
            .expect("add after delete");
        assert_eq!(outcome, SaveOutcome::Added);
        assert_eq!(service.list().len(), 3);
    }

    #[test]
    fn stale_session_is_reported_and_reset() {
        let service = service();
        let mut session = EditSession::Idle;
        service
            .add_or_update(&PurchaseForm::new("2024-01-01", "10", "1"), &mut session)
            .expect("add");
        service.begin_edit(0, &mut session).expect("begin edit");
        let target = session.target().expect("editing");
        service.store().remove(target).expect("remove behind the session");

        let err = service
            .add_or_update(&PurchaseForm::new("2024-01-09", "10", "1"), &mut session)
            .expect_err("stale edit");
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::PurchaseNotFound(id)) if id == target
        ));
        assert_eq!(session, EditSession::Idle);
        assert!(service.list().is_empty());
    }

    #[test]
    fn out_of_range_rows_are_rejected() {
        let service = service();
        let mut session = EditSession::Idle;
        assert!(matches!(
            service.delete(0, &mut session),
            Err(ServiceError::Ledger(LedgerError::IndexOutOfRange { index: 0, len: 0 }))
        ));
        assert!(service.begin_edit(4, &mut session).is_err());
        assert_eq!(session, EditSession::Idle);
    }

    #[test]
    fn out_of_range_rows_keep_the_current_edit() {
        let service = service();
        let mut session = EditSession::Idle;
        service
            .add_or_update(&PurchaseForm::new("2024-01-01", "10", "1"), &mut session)
            .expect("add");
        service.begin_edit(0, &mut session).expect("begin edit");
        let editing = session;

        assert!(service.begin_edit(3, &mut session).is_err());
        assert_eq!(session, editing);
        assert!(matches!(
            service.delete(5, &mut session),
            Err(ServiceError::Ledger(LedgerError::IndexOutOfRange { index: 5, len: 1 }))
        ));
        assert_eq!(session, editing);
        assert_eq!(service.list().len(), 1);
    }
}
