use crate::cli::table::{Alignment, Table, TableColumn};
use crate::core::services::Summary;
use crate::currency::{format_amount, CurrencyCode};
use crate::ledger::Purchase;

/// Builds the purchase table; the row being edited is flagged with `*`.
pub fn purchase_table(purchases: &[Purchase], editing: Option<usize>) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("#", Alignment::Right),
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Purchase (USD)", Alignment::Right),
        TableColumn::new("Purchase (EUR)", Alignment::Right),
        TableColumn::new("Earning (USD)", Alignment::Right),
        TableColumn::new("Earning (EUR)", Alignment::Right),
        TableColumn::new("Expiry", Alignment::Left),
    ]);
    for (idx, purchase) in purchases.iter().enumerate() {
        let marker = if editing == Some(idx) { "*" } else { "" };
        table.push_row(vec![
            format!("{}{}", marker, idx + 1),
            purchase.date.to_string(),
            format_amount(purchase.purchase_usd, CurrencyCode::Usd),
            format_amount(purchase.purchase_eur, CurrencyCode::Eur),
            format_amount(purchase.earning_usd, CurrencyCode::Usd),
            format_amount(purchase.earning_eur, CurrencyCode::Eur),
            purchase.expiry_date.to_string(),
        ]);
    }
    table
}

pub fn summary_rows(summary: &Summary) -> Vec<(&'static str, String)> {
    vec![
        ("Total purchases", summary.total_purchased.display()),
        ("Total earnings", summary.total_earnings.display()),
        ("Projected earnings (60 days)", summary.projected_earnings.display()),
        ("Earnings until month end", summary.month_end_earnings.display()),
    ]
}

pub fn summary_block(summary: &Summary) -> String {
    let rows = summary_rows(summary);
    two_column(&rows)
}

pub fn two_column(rows: &[(&str, String)]) -> String {
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{:<width$}  {}", format!("{label}:"), value, width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
