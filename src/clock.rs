//! Clock - where stores and derived views get "today" from.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Utc};

/// Source of the current date and time.
///
/// Record ids are derived from `now_millis`; `date_added`, `sold_date` and
/// every date comparison in the derived views use `today`.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock, reporting dates in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock pinned to one date, at midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn now_millis(&self) -> i64 {
        self.date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    }
}
