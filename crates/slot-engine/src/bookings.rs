//! Narrow a reservation collection to the bookings that can block a slot.
//!
//! Only bookings on the query date (compared as wall-clock dates) with an
//! active status are relevant. Cancelled and off-date bookings never block,
//! even when their time range would overlap.
//!
//! Overlap uses half-open intervals: `[s1, e1)` and `[s2, e2)` conflict iff
//! `s1 < e2 && s2 < e1`. A booking ending exactly when a slot starts (or
//! starting exactly when it ends) is NOT a conflict.

use chrono::NaiveDate;
use tracing::trace;

use crate::error::{Result, SlotError};
use crate::model::{Booking, BookingStatus, Slot};
use crate::time::{parse_calendar_date, parse_time_of_day, MinuteOfDay};

/// A booking with its date and times parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: u64,
    pub client_label: String,
    pub date: NaiveDate,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
    pub status: BookingStatus,
}

impl Reservation {
    /// Parse a raw booking record.
    ///
    /// # Errors
    ///
    /// [`SlotError::InvalidDate`] / [`SlotError::InvalidTime`] for unparsable
    /// fields and [`SlotError::InvalidInterval`] when `start >= end`.
    pub fn parse(booking: &Booking) -> Result<Self> {
        let date = parse_calendar_date(&booking.booking_date)?;
        let start = parse_time_of_day(&booking.start_time)?;
        let end = parse_time_of_day(&booking.end_time)?;
        if start >= end {
            return Err(SlotError::InvalidInterval(format!(
                "booking {} {start}-{end} does not end after it starts",
                booking.id
            )));
        }
        Ok(Self {
            id: booking.id,
            client_label: booking.client_name.clone(),
            date,
            start,
            end,
            status: booking.status,
        })
    }
}

/// Whether `[a_start, a_end)` and `[b_start, b_end)` share any minute.
pub fn intervals_overlap(
    a_start: MinuteOfDay,
    a_end: MinuteOfDay,
    b_start: MinuteOfDay,
    b_end: MinuteOfDay,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether `booking` occupies any part of `slot`.
pub fn overlaps(slot: &Slot, booking: &Reservation) -> bool {
    intervals_overlap(slot.start, slot.end, booking.start, booking.end)
}

/// A provider's reservations, parsed once and queried per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingIndex {
    reservations: Vec<Reservation>,
}

impl BookingIndex {
    /// Parse every booking in the collection.
    ///
    /// # Errors
    ///
    /// The first booking that fails [`Reservation::parse`]; malformed data is
    /// rejected even for cancelled or off-date bookings.
    pub fn new(bookings: &[Booking]) -> Result<Self> {
        let reservations = bookings
            .iter()
            .map(Reservation::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { reservations })
    }

    /// Active bookings on `date`, in input order.
    pub fn for_date(&self, date: NaiveDate) -> Vec<&Reservation> {
        let relevant: Vec<&Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.date == date && r.status.is_active())
            .collect();
        trace!(%date, total = self.reservations.len(), relevant = relevant.len(), "bookings filtered");
        relevant
    }
}

/// The first booking in `relevant` that overlaps `slot`.
pub fn first_conflict<'a>(slot: &Slot, relevant: &[&'a Reservation]) -> Option<&'a Reservation> {
    relevant.iter().copied().find(|booking| overlaps(slot, booking))
}
