//! Input records supplied by the surrounding system and the [`Slot`] output.
//!
//! Input types mirror the shape the provider API serves (field names
//! included) so a JSON snapshot deserializes without an adapter layer. Time
//! fields stay raw strings here; they are parsed, and rejected if malformed,
//! when the indexes are built.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::MinuteOfDay;

/// A bookable service offered by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Service {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Length of one appointment in minutes. Must be positive to generate slots.
    pub duration: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// One row of a provider's weekly working-hours table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkingHour {
    /// Sunday = 0 … Saturday = 6.
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Lifecycle state of a reservation, as reported by the booking store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
    /// Any status the store reports that this crate does not model.
    /// Never blocks a slot.
    #[serde(other)]
    Other,
}

impl BookingStatus {
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Active)
    }
}

/// A pre-existing reservation for the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Booking {
    pub id: u64,
    #[serde(default)]
    pub client_name: String,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
}

/// The service provider whose calendar is being computed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub working_hours: Vec<WorkingHour>,
}

impl Provider {
    /// The first active service, which is what a booking form pre-selects.
    pub fn default_service(&self) -> Option<&Service> {
        self.services.iter().find(|s| s.is_active)
    }

    pub fn service(&self, id: u64) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }
}

fn default_true() -> bool {
    true
}

// ── Slot ────────────────────────────────────────────────────────────────────

/// A candidate appointment `[start, end)` on the query date.
///
/// Derived on every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// `"<YYYY-MM-DD>-<HH:MM>"` of the slot start.
    pub id: String,
    #[serde(rename = "startTime")]
    pub start: MinuteOfDay,
    #[serde(rename = "endTime")]
    pub end: MinuteOfDay,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<u64>,
    #[serde(rename = "clientName", skip_serializing_if = "Option::is_none")]
    pub client_label: Option<String>,
}

impl Slot {
    /// A free slot with no conflict attached.
    pub fn open(date: NaiveDate, start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Self {
            id: format!("{}-{}", date.format("%Y-%m-%d"), start),
            start,
            end,
            available: true,
            booking_id: None,
            client_label: None,
        }
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    pub fn is_booked(&self) -> bool {
        self.booking_id.is_some()
    }
}
