//! Time utilities: parsing ledger timestamps, duration computations, the clock.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, TimeDelta};

/// Timestamp format used in ledgers, pause markers and `--now`.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Day-only prefix of [`TIMESTAMP_FORMAT`].
pub const DAY_FORMAT: &str = "%d.%m.%Y";

pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Whole minutes between two instants: integer seconds floor-divided by 60.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds().div_euclid(60)
}

/// `None` when the result falls outside chrono's date range.
pub fn shift_minutes(ts: NaiveDateTime, minutes: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_minutes(minutes).and_then(|delta| ts.checked_add_signed(delta))
}

/// Source of "now" for every command, so tests and scripts can pin it.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        // Ledgers hold minute resolution only.
        let now = Local::now().naive_local();
        parse_timestamp(&format_timestamp(&now)).unwrap_or(now)
    }
}

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
