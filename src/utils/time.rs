//! Time helpers
//!
//! Availability windows are stored as times of day; bookings and "now" are
//! absolute timestamps. Conversions between the two live here.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Anchor a time of day onto a calendar date as an absolute timestamp.
pub fn at_time(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

/// Half-open interval overlap: [a_start, a_end) and [b_start, b_end)
/// conflict iff `a_start < b_end && a_end > b_start`. Touching boundaries
/// do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}
