//! Source of the current date and time
//!
//! "Current month" statistics and default dates are evaluated at call time,
//! so the store takes a [`Clock`] instead of reading the system time directly.

use chrono::{DateTime, NaiveDate, Utc};

/// Provides the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Today's date (UTC)
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The real system clock, in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to midday on the given date
    ///
    /// Returns `None` for dates that don't exist.
    pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
