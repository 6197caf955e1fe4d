//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid weekday: {0} (expected 0-6, Sunday = 0)")]
    InvalidWeekday(i64),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Duplicate working window for weekday {0}")]
    DuplicateWindow(u8),
}

pub type Result<T> = std::result::Result<T, SlotError>;
