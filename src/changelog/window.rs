use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::ChangelogError;

/// Inclusive time window from the start of `start_date` to the end of
/// `end_date`, both taken in the local time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ChangelogError> {
        Self::new_in(&Local, start_date, end_date)
    }

    /// Same as `new` but with an explicit time zone for the day boundaries.
    pub fn new_in<Tz: TimeZone>(
        tz: &Tz,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ChangelogError> {
        if start_date > end_date {
            return Err(ChangelogError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        let start = start_date.and_time(NaiveTime::MIN);
        let end = end_date
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or_default();

        Ok(Self {
            start_date,
            end_date,
            start: earliest_utc(tz, start),
            end: latest_utc(tz, end),
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// True when `instant` lies within the window, bounds included
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

// A local midnight may fall in a DST gap; treat the wall clock as UTC then.
fn earliest_utc<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}

fn latest_utc<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&local)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}
