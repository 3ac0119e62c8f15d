use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::currency::format_pair;
use crate::ledger::{month_end_accrual_days, MonthScope, Purchase, TERM_DAYS};

/// An aggregate expressed in both currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoneyPair {
    pub usd: Decimal,
    pub eur: Decimal,
}

impl MoneyPair {
    fn add(&mut self, usd: Decimal, eur: Decimal) {
        self.usd = self.usd.saturating_add(usd);
        self.eur = self.eur.saturating_add(eur);
    }

    pub fn display(&self) -> String {
        format_pair(self.usd, self.eur)
    }
}

/// The four figures shown under the purchase table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_purchased: MoneyPair,
    pub total_earnings: MoneyPair,
    pub projected_earnings: MoneyPair,
    pub month_end_earnings: MoneyPair,
    pub purchase_count: usize,
    pub current_month_count: usize,
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(purchases: &[Purchase], today: NaiveDate) -> Summary {
        Self::summarize_with_scope(purchases, today, MonthScope::default())
    }

    /// Recomputes every aggregate from scratch.
    ///
    /// Month-end earnings only include purchases inside `scope` relative to `today`, each
    /// accruing `min(days from purchase to the end of today's month, term)` days at its
    /// stored daily rate. Sums saturate at `Decimal::MAX`.
    pub fn summarize_with_scope(
        purchases: &[Purchase],
        today: NaiveDate,
        scope: MonthScope,
    ) -> Summary {
        let term = Decimal::from(TERM_DAYS);
        let mut summary = Summary {
            purchase_count: purchases.len(),
            ..Summary::default()
        };

        for purchase in purchases {
            summary
                .total_purchased
                .add(purchase.purchase_usd, purchase.purchase_eur);
            summary
                .total_earnings
                .add(purchase.earning_usd, purchase.earning_eur);
            summary
                .projected_earnings
                .add(
                    purchase.earning_usd.saturating_mul(term),
                    purchase.earning_eur.saturating_mul(term),
                );

            if scope.contains(purchase.date, today) {
                let days = Decimal::from(month_end_accrual_days(purchase.date, today));
                summary.month_end_earnings.add(
                    purchase.earning_usd.saturating_mul(days),
                    purchase.earning_eur.saturating_mul(days),
                );
                summary.current_month_count += 1;
            }
        }

        debug!(
            purchases = summary.purchase_count,
            current_month = summary.current_month_count,
            %today,
            "summary recomputed"
        );
        summary
    }
}
