//! Half-open query windows `[start_date, end_date)` over whole calendar days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StayError};
use crate::reservation::ResourceId;

/// Canonical textual form of calendar dates at the API boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The date range queried for one resource.
///
/// Fields are public so callers can assemble a window from already-parsed
/// parameters; every scheduler operation re-checks it with [`QueryWindow::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWindow {
    pub resource_id: ResourceId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl QueryWindow {
    /// # Errors
    /// Returns `StayError::InvalidWindow` if `start_date > end_date`.
    pub fn new(resource_id: ResourceId, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        let window = Self {
            resource_id,
            start_date,
            end_date,
        };
        window.validate()?;
        Ok(window)
    }

    /// Parse a window from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    /// Returns `StayError::InvalidDate` for malformed dates and
    /// `StayError::InvalidWindow` for reversed bounds.
    pub fn parse(resource_id: ResourceId, start: &str, end: &str) -> Result<Self> {
        Self::new(resource_id, parse_date(start)?, parse_date(end)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(StayError::InvalidWindow {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// A window whose bounds coincide contains no nights.
    pub fn is_empty(&self) -> bool {
        self.start_date >= self.end_date
    }

    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0)
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| StayError::InvalidDate(format!("{:?}: {}", s, e)))
}
