//! Daily schedule time: parsing, formatting, next-occurrence math.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use thiserror::Error;

/// Herald runs on Singapore wall-clock time (UTC+8, no DST).
const UTC_OFFSET_SECS: i32 = 8 * 3600;

/// The fixed timezone all schedules are interpreted in.
pub fn timezone() -> FixedOffset {
    FixedOffset::east_opt(UTC_OFFSET_SECS).expect("static UTC offset is in range")
}

/// Current wall-clock time in the schedule timezone.
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&timezone())
}

/// Error returned when a time-of-day string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid time of day: expected HH:MM (24-hour format)")]
pub struct ParseTimeError;

/// A daily wall-clock firing time in the fixed timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTime {
    hour: u8,
    minute: u8,
}

impl ScheduleTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ParseTimeError> {
        if hour > 23 || minute > 59 {
            return Err(ParseTimeError);
        }
        Ok(Self { hour, minute })
    }

    /// Parse `HH:MM` (24-hour). Lenient about zero-padding, strict about
    /// range: `9:5` is accepted, `24:00` is not.
    pub fn parse(text: &str) -> Result<Self, ParseTimeError> {
        let (h, m) = text.trim().split_once(':').ok_or(ParseTimeError)?;
        let hour = h.trim().parse().map_err(|_| ParseTimeError)?;
        let minute = m.trim().parse().map_err(|_| ParseTimeError)?;
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The next instant this time of day comes around, strictly after `now`.
    pub fn next_occurrence(&self, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        let today = now
            .date_naive()
            .and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .expect("validated hour/minute are in range")
            .and_local_timezone(timezone())
            .single()
            .expect("fixed offset has no DST gaps");
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
