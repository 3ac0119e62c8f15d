use chrono::NaiveDate;
use earning_ledger::{
    core::services::SummaryService,
    currency::ExchangeRate,
    ledger::{expiry_date, MonthScope, Purchase, PurchaseForm},
};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn purchase(date: &str, amount: &str, earning: &str) -> Purchase {
    let input = PurchaseForm::new(date, amount, earning)
        .validate()
        .expect("valid form");
    Purchase::from_input(Uuid::new_v4(), &input, ExchangeRate::default())
}

#[test]
fn totals_are_sums_and_euro_side_uses_the_rate() {
    let purchases = vec![
        purchase("2024-06-01", "100", "5"),
        purchase("2024-05-01", "50.50", "2.25"),
    ];
    let summary = SummaryService::summarize(&purchases, date(2024, 6, 20));
    assert_eq!(summary.total_purchased.usd, dec!(150.50));
    assert_eq!(summary.total_purchased.eur, dec!(136.96));
    assert_eq!(summary.total_earnings.usd, dec!(7.25));
    assert_eq!(summary.total_earnings.eur, dec!(6.60));
    assert_eq!(summary.purchase_count, 2);
}

#[test]
fn projected_earnings_cover_sixty_days_of_every_purchase() {
    let purchases = vec![
        purchase("2024-06-01", "100", "6"),
        purchase("2023-01-15", "100", "4"),
    ];
    let summary = SummaryService::summarize(&purchases, date(2024, 6, 20));
    assert_eq!(summary.current_month_count, 1);
    assert_eq!(summary.projected_earnings.usd, dec!(600.00));
    assert_eq!(summary.projected_earnings.eur, dec!(546.00));
}

#[test]
fn month_end_earnings_count_days_left_in_the_current_month() {
    let purchases = vec![purchase("2024-06-01", "100", "5")];
    let summary = SummaryService::summarize(&purchases, date(2024, 6, 20));
    assert_eq!(summary.month_end_earnings.usd, dec!(145.00));
}

#[test]
fn month_scope_controls_which_year_qualifies() {
    let purchases = vec![purchase("2023-06-10", "100", "1")];
    let today = date(2024, 6, 20);
    let calendar = SummaryService::summarize_with_scope(&purchases, today, MonthScope::CalendarMonth);
    assert_eq!(calendar.current_month_count, 0);
    assert_eq!(calendar.month_end_earnings.usd, dec!(0));
    let month_only = SummaryService::summarize_with_scope(&purchases, today, MonthScope::MonthOnly);
    assert_eq!(month_only.current_month_count, 1);
    assert_eq!(month_only.month_end_earnings.usd, dec!(60.00));
    assert_eq!(month_only.month_end_earnings.eur, dec!(54.60));
}

#[test]
fn expiry_crosses_year_boundary() {
    assert_eq!(expiry_date(date(2024, 12, 15)), Some(date(2025, 2, 13)));
}

#[test]
fn empty_ledger_summarizes_to_zero() {
    let summary = SummaryService::summarize(&[], date(2024, 6, 20));
    assert_eq!(summary.total_purchased.display(), "$0.00 / €0.00");
    assert_eq!(summary.month_end_earnings.display(), "$0.00 / €0.00");
}
