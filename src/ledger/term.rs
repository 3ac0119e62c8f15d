use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of every purchase's earning term.
pub const TERM_DAYS: u32 = 60;

/// Decides which purchases count as "bought this month".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonthScope {
    /// Year and month must both match.
    #[default]
    CalendarMonth,
    /// Only the month number is compared, so the same month of another year qualifies.
    MonthOnly,
}

impl MonthScope {
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            MonthScope::CalendarMonth => date.year() == today.year() && date.month() == today.month(),
            MonthScope::MonthOnly => date.month() == today.month(),
        }
    }
}

/// Expiry of a purchase made on `date`, or `None` past the end of the calendar.
pub fn expiry_date(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(TERM_DAYS)))
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Days of earnings a purchase made on `date` accrues through the end of `today`'s month.
///
/// Capped by the term and never negative.
pub fn month_end_accrual_days(date: NaiveDate, today: NaiveDate) -> i64 {
    (last_day_of_month(today) - date)
        .num_days()
        .clamp(0, i64::from(TERM_DAYS))
}
