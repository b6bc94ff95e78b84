//! Source of "now" for date arithmetic and month aggregation.
//!
//! Everything that depends on the current date takes a [`Clock`] instead of
//! reading the wall clock inline, so tests can pin the date.

//!
//! The whole app uses one calendar: the UTC date of [`Clock::now`]. Default
//! purchase dates and month boundaries both come from [`Clock::today`].

use chrono::{DateTime, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date (UTC), for default purchase dates and month
    /// boundaries.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Pin the clock to midnight UTC of the given date.
    #[must_use]
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today_matches_now() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let clock = FixedClock::at_date(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().date_naive(), date);
    }

    #[test]
    fn test_system_clock_today_is_utc_date() {
        let before = Utc::now().date_naive();
        let today = SystemClock.today();
        let after = Utc::now().date_naive();
        assert!(today == before || today == after, "{today} not in [{before}, {after}]");
    }

    #[test]
    fn test_fixed_clock_late_evening_stays_on_utc_day() {
        use chrono::TimeZone;
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 30, 23, 0, 0).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }
}
