//! Time source and record id generation.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Source of the current time. Injected so due-date logic can be tested.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date as the farmer sees it.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock; `today` follows the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Freeze at the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Freeze at midnight UTC of the given date.
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Move the clock forward.
    pub fn advance(&mut self, by: chrono::Duration) {
        self.now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Record ids are the millisecond creation timestamp as a decimal string.
///
/// Ids handed out by one generator strictly increase, so two records created
/// within the same millisecond still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Create a generator with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for a record created at `now`.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        let id = if millis > self.last {
            millis
        } else {
            self.last + 1
        };
        self.last = id;
        id.to_string()
    }
}
