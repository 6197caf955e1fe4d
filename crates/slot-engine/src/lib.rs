//! # slot-engine
//!
//! Deterministic booking-slot availability for a single service provider.
//!
//! Given a provider's weekly working hours, the selected service's duration,
//! the provider's existing reservations, a calendar date and an explicit
//! "now", the engine produces the ordered sequence of appointment slots for
//! that day, each marked available or not. Nothing is stored and nothing
//! reads the system clock.
//!
//! ## Modules
//!
//! - [`working_hours`] — Weekday → active working window (or closed)
//! - [`bookings`] — Active same-day reservations and the half-open overlap test
//! - [`slots`] — Back-to-back candidate slots covering a window
//! - [`availability`] — Orchestrates the above into the annotated slot list
//! - [`model`] — Input records and the [`Slot`] output
//! - [`time`] — Minute-of-day values, parsing, weekday numbering
//! - [`error`] — Error types

pub mod availability;
pub mod bookings;
pub mod error;
pub mod model;
pub mod slots;
pub mod time;
pub mod working_hours;

pub use availability::{availability, availability_indexed};
pub use bookings::{overlaps, BookingIndex, Reservation};
pub use error::SlotError;
pub use model::{Booking, BookingStatus, Provider, Service, Slot, WorkingHour};
pub use slots::generate;
pub use time::{is_date_disabled, MinuteOfDay};
pub use working_hours::{WorkingHoursIndex, WorkingWindow};
