//! Calendar date source for due-date evaluation
//!
//! All date-gated rules (maintenance fees, interest schedules) compare
//! against "today" supplied by a `Clock`, never against the wall clock
//! directly. Tests and the `--as-of` CLI flag pin the date with
//! [`FixedClock`]; production runs use [`SystemClock`].

use chrono::{Local, NaiveDate};

/// Supplies the calendar date used for all due-date comparisons
///
/// Object-safe so callers can pick an implementation at runtime.
pub trait Clock {
    /// The current calendar date (no time-of-day component)
    fn today(&self) -> NaiveDate;
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn today(&self) -> NaiveDate {
        self.as_ref().today()
    }
}

/// Wall-clock date in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date
///
/// Used by tests and by the CLI's `--as-of` flag to make sweep output
/// reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    /// Create a clock that always reports `today`
    pub fn new(today: NaiveDate) -> Self {
        FixedClock { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let clock = FixedClock::new(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_boxed_clock_delegates() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock::new(date));
        assert_eq!(clock.today(), date);
    }
}
