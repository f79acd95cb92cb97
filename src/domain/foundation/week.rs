//! Week bucket value object for keying persisted updates.

use chrono::{DateTime, Datelike, IsoWeek, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ISO week bucket in `YYYY-WW` form.
///
/// Updates are stored one per user per week; this is the week half of that
/// key. Uses the ISO week-date year, which can differ from the calendar year
/// around January 1st.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekBucket {
    year: i32,
    week: u32,
}

impl WeekBucket {
    /// Returns the bucket for the current moment.
    pub fn current() -> Self {
        Self::from_datetime(&Utc::now())
    }

    /// Returns the bucket containing the given instant.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self::from_iso_week(dt.iso_week())
    }

    fn from_iso_week(iso: IsoWeek) -> Self {
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Returns the ISO week-date year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the ISO week number (1..=53).
    pub fn week(&self) -> u32 {
        self.week
    }
}

impl fmt::Display for WeekBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.week)
    }
}
