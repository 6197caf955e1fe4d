//! Annotated slot availability for one provider, service and day.
//!
//! [`availability`] is a pure function of its inputs. The current moment is
//! passed in as `now` (local wall-clock) and never read from the system
//! clock, so identical inputs always produce an identical slot sequence.
//!
//! A slot is unavailable when either:
//!
//! - it overlaps an active booking on the query date (the first such booking,
//!   in input order, is attached to the slot), or
//! - the query date is `now`'s date and the slot starts at or before
//!   `now`'s minute of day. The boundary is inclusive: at exactly 10:00 the
//!   10:00 slot is already past.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::bookings::{first_conflict, BookingIndex};
use crate::error::Result;
use crate::model::{Booking, Provider, Service, Slot};
use crate::slots::{generate, validate_duration};
use crate::time::minutes_of_day;
use crate::working_hours::WorkingHoursIndex;

/// Compute the bookable slots of `service` with `provider` on `date`.
///
/// Returns an empty vector when the provider does not work on `date`'s
/// weekday.
///
/// # Errors
///
/// - [`SlotError::InvalidDuration`](crate::SlotError::InvalidDuration) if the
///   service duration is not positive (checked before the closed-day test).
/// - Parse errors for malformed working hours or bookings.
/// - [`SlotError::DuplicateWindow`](crate::SlotError::DuplicateWindow) if
///   `date`'s weekday has two active windows. Other weekdays are unaffected.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slot_engine::{availability, Booking, BookingStatus, Provider, Service, WorkingHour};
///
/// let provider = Provider {
///     id: "m-1".into(),
///     name: "Anna".into(),
///     services: vec![],
///     working_hours: vec![WorkingHour {
///         day_of_week: 1,
///         start_time: "09:00".into(),
///         end_time: "12:00".into(),
///         is_active: true,
///     }],
/// };
/// let service = Service { id: 1, name: "Cut".into(), duration: 60, is_active: true };
/// let bookings = vec![Booking {
///     id: 7,
///     client_name: "Ivan".into(),
///     booking_date: "2026-03-16".into(),
///     start_time: "10:00".into(),
///     end_time: "11:00".into(),
///     status: BookingStatus::Active,
/// }];
/// let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(); // Monday
/// let now = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
///
/// let slots = availability(date, &provider, &service, &bookings, now).unwrap();
/// assert_eq!(slots.len(), 3);
/// assert!(slots[0].available);
/// assert!(!slots[1].available);
/// assert_eq!(slots[1].booking_id, Some(7));
/// ```
pub fn availability(
    date: NaiveDate,
    provider: &Provider,
    service: &Service,
    bookings: &[Booking],
    now: NaiveDateTime,
) -> Result<Vec<Slot>> {
    let hours = WorkingHoursIndex::new(&provider.working_hours)?;
    let index = BookingIndex::new(bookings)?;
    availability_indexed(date, &hours, service, &index, now)
}

/// [`availability`] over indexes the caller has already built.
///
/// Useful when computing several days from the same snapshot.
pub fn availability_indexed(
    date: NaiveDate,
    hours: &WorkingHoursIndex,
    service: &Service,
    bookings: &BookingIndex,
    now: NaiveDateTime,
) -> Result<Vec<Slot>> {
    validate_duration(service.duration)?;

    let Some(window) = hours.window_on(date)? else {
        debug!(%date, "no working window, day is closed");
        return Ok(Vec::new());
    };

    let mut slots = generate(date, &window, service.duration)?;
    let relevant = bookings.for_date(date);
    let cutoff = (date == now.date()).then(|| minutes_of_day(now));

    debug!(
        %date,
        window_start = %window.start,
        window_end = %window.end,
        window_minutes = window.length_minutes(),
        duration = service.duration,
        candidates = slots.len(),
        bookings = relevant.len(),
        "computing availability"
    );

    for slot in &mut slots {
        if let Some(booking) = first_conflict(slot, &relevant) {
            trace!(
                slot = %slot.start,
                booking = booking.id,
                booking_start = %booking.start,
                booking_end = %booking.end,
                "slot conflicts with booking"
            );
            slot.available = false;
            slot.booking_id = Some(booking.id);
            slot.client_label = Some(booking.client_label.clone());
        }

        if cutoff.is_some_and(|current| slot.start <= current) {
            slot.available = false;
        }
    }

    Ok(slots)
}
