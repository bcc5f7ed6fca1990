//! Error types for stay-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StayError {
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("Invalid stay: arrival {arrival} must be before departure {departure}")]
    InvalidStay {
        arrival: NaiveDate,
        departure: NaiveDate,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl StayError {
    /// True for errors caused by the caller's query parameters rather than
    /// by stored data.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StayError::InvalidWindow { .. } | StayError::InvalidDate(_))
    }
}

pub type Result<T> = std::result::Result<T, StayError>;
