use chrono::{DateTime, Local, NaiveDate};

/// Clock abstracts access to the current date so summaries stay deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock backed by the local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
