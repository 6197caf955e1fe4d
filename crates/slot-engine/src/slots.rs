//! Cut a working window into back-to-back candidate slots.
//!
//! Starting at the window start, each slot is `[t, t + duration)` and the
//! next one starts where the previous ended (stride == duration). Generation
//! stops before a slot would cross the window end, so a partial trailing
//! slot is never emitted.

use chrono::NaiveDate;

use crate::error::{Result, SlotError};
use crate::model::Slot;
use crate::time::MinuteOfDay;
use crate::working_hours::WorkingWindow;

/// Check a service duration, returning it in minutes.
///
/// # Errors
///
/// Returns [`SlotError::InvalidDuration`] for `duration <= 0`. This is a
/// configuration problem with the service, not an empty day.
pub fn validate_duration(duration: i64) -> Result<u32> {
    if duration <= 0 {
        return Err(SlotError::InvalidDuration(format!(
            "service duration must be positive, got {duration} minutes"
        )));
    }
    Ok(u32::try_from(duration).unwrap_or(u32::MAX))
}

/// Generate every candidate slot of `duration` minutes inside `window`.
///
/// All returned slots are open (available, no conflict). A window shorter
/// than `duration` yields an empty vector.
///
/// # Errors
///
/// Returns [`SlotError::InvalidDuration`] for `duration <= 0`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slot_engine::slots::generate;
/// use slot_engine::time::MinuteOfDay;
/// use slot_engine::working_hours::WorkingWindow;
///
/// let window = WorkingWindow::new(
///     1,
///     MinuteOfDay::from_hm(9, 0).unwrap(),
///     MinuteOfDay::from_hm(18, 0).unwrap(),
///     true,
/// )
/// .unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
///
/// let slots = generate(date, &window, 60).unwrap();
/// assert_eq!(slots.len(), 9);
/// assert_eq!(slots[0].start.to_string(), "09:00");
/// assert_eq!(slots[8].end.to_string(), "18:00");
/// ```
pub fn generate(date: NaiveDate, window: &WorkingWindow, duration: i64) -> Result<Vec<Slot>> {
    let duration = validate_duration(duration)?;
    let window_end = u32::from(window.end.minutes());

    let mut slots = Vec::new();
    let mut t = u32::from(window.start.minutes());

    while let Some(end) = t.checked_add(duration).filter(|end| *end <= window_end) {
        // Both bounds lie inside the window, which lies inside the day.
        let (Some(start), Some(end)) = (minute(t), minute(end)) else {
            break;
        };
        slots.push(Slot::open(date, start, end));
        t += duration;
    }

    Ok(slots)
}

fn minute(value: u32) -> Option<MinuteOfDay> {
    u16::try_from(value).ok().and_then(MinuteOfDay::new)
}
