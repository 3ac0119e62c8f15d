//! Purchase records, form validation, and the calendar math behind a purchase term.

pub mod purchase;
pub mod term;

pub use purchase::{Purchase, PurchaseForm, PurchaseId, PurchaseInput};
pub use term::{
    expiry_date, last_day_of_month, month_end_accrual_days, MonthScope,
    TERM_DAYS,
};
