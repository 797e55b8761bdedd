//! Clock helpers
//!
//! Scoring works on UTC instants while target days are local calendar dates.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Day of the month (1-31) for the local calendar
pub fn day_of_month() -> u32 {
    today().day()
}
