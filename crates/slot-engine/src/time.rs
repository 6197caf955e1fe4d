//! Wall-clock time primitives shared by the availability modules.
//!
//! Everything in this crate is expressed in one representation: local
//! wall-clock minutes since midnight plus a naive calendar date. Input
//! strings that carry a UTC offset (RFC 3339) contribute the date and time
//! **as written**; the offset is never applied. This keeps a working day of
//! `09:00-18:00` meaning 09:00-18:00 no matter where the caller runs.
//!
//! No function here reads the system clock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::error::{Result, SlotError};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u16 = 1440;

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

// ── MinuteOfDay ─────────────────────────────────────────────────────────────

/// A time of day with minute resolution, `0 <= minutes < 1440`.
///
/// Renders as `HH:MM` (both through [`fmt::Display`] and serde).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// `None` when `minutes` does not fall inside a single day.
    pub fn new(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Self::new((hour * 60 + minute) as u16)
    }

    /// Truncates seconds: 10:00:59 is 10:00.
    pub fn of(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for MinuteOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time_of_day(s)
    }
}

impl Serialize for MinuteOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a time of day.
///
/// Accepts `HH:MM`, `HH:MM:SS[.fff]`, an RFC 3339 datetime
/// (`1970-01-01T09:00:00.000Z`) or a naive `YYYY-MM-DDTHH:MM[:SS]`. For the
/// datetime forms only the wall-clock time as written is kept.
///
/// # Errors
///
/// Returns [`SlotError::InvalidTime`] if no form matches.
///
/// # Examples
///
/// ```
/// use slot_engine::time::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("09:30").unwrap().minutes(), 570);
/// assert_eq!(parse_time_of_day("1970-01-01T18:00:00.000Z").unwrap().minutes(), 1080);
/// assert!(parse_time_of_day("nine").is_err());
/// ```
pub fn parse_time_of_day(s: &str) -> Result<MinuteOfDay> {
    let s = s.trim();

    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Ok(MinuteOfDay::of(t));
        }
    }

    parse_wall_clock(s)
        .map(|dt| MinuteOfDay::of(dt.time()))
        .ok_or_else(|| SlotError::InvalidTime(format!("'{}'", s)))
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 datetime or a naive
/// `YYYY-MM-DDTHH:MM[:SS]`; the date is taken as written.
///
/// # Errors
///
/// Returns [`SlotError::InvalidDate`] if no form matches.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }

    parse_wall_clock(s)
        .map(|dt| dt.date())
        .ok_or_else(|| SlotError::InvalidDate(format!("'{}'", s)))
}

/// Parse a wall-clock instant, used for the explicit "now" input.
///
/// # Errors
///
/// Returns [`SlotError::InvalidTime`] if the string is not an RFC 3339 or
/// naive `YYYY-MM-DDTHH:MM[:SS]` datetime.
pub fn parse_wall_clock_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    parse_wall_clock(s).ok_or_else(|| SlotError::InvalidTime(format!("'{}'", s)))
}

fn parse_wall_clock(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

// ── Calendar helpers ────────────────────────────────────────────────────────

/// Day of week numbered from Sunday: Sunday = 0 … Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Minutes since midnight of `now`, seconds truncated.
pub fn minutes_of_day(now: NaiveDateTime) -> MinuteOfDay {
    MinuteOfDay::of(now.time())
}

/// Whether `date` lies before `today` and so cannot be selected for booking.
pub fn is_date_disabled(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── MinuteOfDay ─────────────────────────────────────────────────────

    #[test]
    fn test_minute_of_day_bounds() {
        assert!(MinuteOfDay::new(0).is_some());
        assert!(MinuteOfDay::new(1439).is_some());
        assert!(MinuteOfDay::new(1440).is_none());
        assert!(MinuteOfDay::from_hm(24, 0).is_none());
        assert!(MinuteOfDay::from_hm(9, 60).is_none());
    }

    #[test]
    fn test_minute_of_day_display_pads() {
        assert_eq!(MinuteOfDay::from_hm(9, 5).unwrap().to_string(), "09:05");
        assert_eq!(MinuteOfDay::new(0).unwrap().to_string(), "00:00");
        assert_eq!(MinuteOfDay::new(1439).unwrap().to_string(), "23:59");
    }

    #[test]
    fn test_minute_of_day_serializes_as_hh_mm() {
        let json = serde_json::to_string(&MinuteOfDay::from_hm(17, 30).unwrap()).unwrap();
        assert_eq!(json, "\"17:30\"");
    }

    // ── parse_time_of_day ───────────────────────────────────────────────

    #[test]
    fn test_parse_time_plain_forms() {
        assert_eq!(parse_time_of_day("09:00").unwrap().minutes(), 540);
        assert_eq!(parse_time_of_day("09:00:00").unwrap().minutes(), 540);
        assert_eq!(parse_time_of_day(" 17:45:30.250 ").unwrap().minutes(), 1065);
    }

    #[test]
    fn test_parse_time_rfc3339_keeps_wall_clock() {
        // The offset is not applied: 09:00+03:00 stays 09:00.
        assert_eq!(parse_time_of_day("1970-01-01T09:00:00+03:00").unwrap().minutes(), 540);
        assert_eq!(parse_time_of_day("1970-01-01T09:00:00.000Z").unwrap().minutes(), 540);
    }

    #[test]
    fn test_parse_time_naive_datetime() {
        assert_eq!(parse_time_of_day("2026-03-16T10:30").unwrap().minutes(), 630);
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        let err = parse_time_of_day("25:00").unwrap_err().to_string();
        assert!(err.contains("Invalid time"), "got: {err}");
        assert!(parse_time_of_day("").is_err());
        assert!(parse_time_of_day("noon").is_err());
    }

    // ── parse_calendar_date ─────────────────────────────────────────────

    #[test]
    fn test_parse_date_forms() {
        assert_eq!(parse_calendar_date("2026-03-16").unwrap(), date(2026, 3, 16));
        assert_eq!(
            parse_calendar_date("2026-03-16T00:00:00.000Z").unwrap(),
            date(2026, 3, 16)
        );
        // Late-evening offset is not shifted into the next UTC day.
        assert_eq!(
            parse_calendar_date("2026-03-16T23:30:00-05:00").unwrap(),
            date(2026, 3, 16)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_calendar_date("16.03.2026").unwrap_err().to_string();
        assert!(err.contains("Invalid date"), "got: {err}");
        assert!(parse_calendar_date("2026-02-30").is_err());
    }

    #[test]
    fn test_parse_wall_clock_datetime() {
        let now = parse_wall_clock_datetime("2026-03-16T10:15:42").unwrap();
        assert_eq!(now.date(), date(2026, 3, 16));
        assert_eq!(minutes_of_day(now).minutes(), 615);
        assert!(parse_wall_clock_datetime("10:15").is_err());
    }

    // ── Calendar helpers ────────────────────────────────────────────────

    #[test]
    fn test_weekday_index_sunday_is_zero() {
        // 2026-03-15 is a Sunday, 2026-03-21 a Saturday.
        assert_eq!(weekday_index(date(2026, 3, 15)), 0);
        assert_eq!(weekday_index(date(2026, 3, 16)), 1);
        assert_eq!(weekday_index(date(2026, 3, 21)), 6);
    }

    #[test]
    fn test_minutes_of_day_truncates_seconds() {
        let now = date(2026, 3, 16).and_hms_opt(10, 0, 59).unwrap();
        assert_eq!(minutes_of_day(now).minutes(), 600);
    }

    #[test]
    fn test_is_date_disabled() {
        let today = date(2026, 3, 16);
        assert!(is_date_disabled(date(2026, 3, 15), today));
        assert!(!is_date_disabled(today, today));
        assert!(!is_date_disabled(date(2026, 3, 17), today));
    }
}
