//! Resolve a weekday to the provider's working window.
//!
//! A weekday without an active entry is "closed": [`WorkingHoursIndex::lookup`]
//! returns `None` and callers produce zero slots for that day.

use chrono::NaiveDate;
use tracing::trace;

use crate::error::{Result, SlotError};
use crate::model::WorkingHour;
use crate::time::{parse_time_of_day, weekday_index, MinuteOfDay};

/// A parsed working-hours interval `[start, end)` for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    /// Sunday = 0 … Saturday = 6.
    pub weekday: u8,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
    pub active: bool,
}

impl WorkingWindow {
    /// Build a window, enforcing `start < end`.
    ///
    /// # Errors
    ///
    /// [`SlotError::InvalidWeekday`] for a weekday outside 0-6 and
    /// [`SlotError::InvalidInterval`] when `start >= end`.
    pub fn new(weekday: u8, start: MinuteOfDay, end: MinuteOfDay, active: bool) -> Result<Self> {
        if weekday > 6 {
            return Err(SlotError::InvalidWeekday(weekday as i64));
        }
        if start >= end {
            return Err(SlotError::InvalidInterval(format!(
                "working window {start}-{end} on weekday {weekday} does not end after it starts"
            )));
        }
        Ok(Self {
            weekday,
            start,
            end,
            active,
        })
    }

    pub fn length_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    fn parse(row: &WorkingHour) -> Result<Self> {
        let weekday = u8::try_from(row.day_of_week)
            .ok()
            .filter(|d| *d <= 6)
            .ok_or(SlotError::InvalidWeekday(row.day_of_week))?;
        let start = parse_time_of_day(&row.start_time)?;
        let end = parse_time_of_day(&row.end_time)?;
        Self::new(weekday, start, end, row.is_active)
    }
}

/// The provider's weekly table, one optional active window per weekday.
///
/// A weekday with more than one active row keeps the first and is marked
/// ambiguous; only [`window_on`](Self::window_on) for that weekday fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingHoursIndex {
    days: [Option<WorkingWindow>; 7],
    duplicated: [bool; 7],
}

impl WorkingHoursIndex {
    /// Parse a provider's working-hours rows.
    ///
    /// Inactive rows are validated but never returned by [`lookup`](Self::lookup).
    ///
    /// # Errors
    ///
    /// Any malformed row: bad weekday, unparsable time or `start >= end`.
    pub fn new(rows: &[WorkingHour]) -> Result<Self> {
        let mut days: [Option<WorkingWindow>; 7] = [None; 7];
        let mut duplicated = [false; 7];

        for row in rows {
            let window = WorkingWindow::parse(row)?;
            if !window.active {
                continue;
            }
            let day = window.weekday as usize;
            if days[day].is_some() {
                duplicated[day] = true;
            } else {
                days[day] = Some(window);
            }
        }

        trace!(active_days = days.iter().flatten().count(), "working hours indexed");
        Ok(Self { days, duplicated })
    }

    /// The active window for `weekday` (Sunday = 0), or `None` when closed.
    ///
    /// For a weekday with several active rows this is the first one.
    pub fn lookup(&self, weekday: u8) -> Option<WorkingWindow> {
        self.days.get(weekday as usize).copied().flatten()
    }

    /// The active window for the weekday `date` falls on.
    pub fn lookup_date(&self, date: NaiveDate) -> Option<WorkingWindow> {
        self.lookup(weekday_index(date))
    }

    /// Like [`lookup_date`](Self::lookup_date), but refuses a weekday whose
    /// window is ambiguous.
    ///
    /// # Errors
    ///
    /// [`SlotError::DuplicateWindow`] when `date`'s weekday has more than one
    /// active row.
    pub fn window_on(&self, date: NaiveDate) -> Result<Option<WorkingWindow>> {
        let weekday = weekday_index(date);
        if self.duplicated[weekday as usize] {
            return Err(SlotError::DuplicateWindow(weekday));
        }
        Ok(self.lookup(weekday))
    }
}
