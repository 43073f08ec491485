//! Calendar-day keys for conversation bucketing and streak arithmetic
//!
//! A `DayStamp` is the day number (days from the Common Era) of a
//! timestamp's local-time date. Conversations store it as their grouping
//! key so "today's conversation" lookup and streak comparisons never
//! depend on locale-formatted date strings.

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

/// Integer calendar-day key in the user's local time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayStamp(pub i32);

impl DayStamp {
    /// Day key of the given instant, in local time
    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        DayStamp(ts.with_timezone(&Local).date_naive().num_days_from_ce())
    }

    /// Day key of the current instant
    pub fn today() -> Self {
        Self::from_timestamp(Utc::now())
    }

    /// Whole calendar days elapsed from `earlier` to `self`
    pub fn days_since(&self, earlier: DayStamp) -> i32 {
        self.0 - earlier.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_same_instant_same_day() {
        let now = Utc::now();
        assert_eq!(DayStamp::from_timestamp(now), DayStamp::from_timestamp(now));
    }

    #[test]
    fn test_days_since_consecutive() {
        let now = Utc::now();
        let today = DayStamp::from_timestamp(now);
        let yesterday = DayStamp::from_timestamp(now - Duration::days(1));

        assert_eq!(today.days_since(yesterday), 1);
        assert_eq!(yesterday.days_since(today), -1);
    }

    #[test]
    fn test_days_since_gap() {
        let now = Utc::now();
        let today = DayStamp::from_timestamp(now);
        let last_week = DayStamp::from_timestamp(now - Duration::days(7));

        assert_eq!(today.days_since(last_week), 7);
    }
}
