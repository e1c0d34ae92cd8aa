//! Time source abstraction.
//!
//! Daily bonuses and streaks are keyed to the device's local calendar day,
//! while achievement timestamps are recorded in UTC. The controller is the
//! only component that consults the clock; the engine receives dates as
//! arguments so rule evaluation stays deterministic.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// Source of the current timestamp and local calendar date.
pub trait Clock: Send + Sync {
    /// Current instant, recorded on achievements.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the snapshot owner's local timezone.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests and demos.
///
/// `today()` is derived from the held instant, so advancing past midnight
/// rolls the calendar day the same way a real session would observe it.
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    /// Starts at noon on the given date, leaving headroom on both sides of
    /// midnight.
    pub fn starting_on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).expect("noon is a valid time");
        Self::new(noon.and_utc())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("manual clock lock poisoned") = now;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().expect("manual clock lock poisoned");
        *now += Duration::days(days);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("manual clock lock poisoned")
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
