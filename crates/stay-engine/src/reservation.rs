//! Reservation records as handed over by the persistence layer.
//!
//! A reservation books one resource (an apartment) for the nights from
//! `arrival_date` up to, but not including, `departure_date`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StayError};
use crate::window::QueryWindow;

/// Unique identifier of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub u64);

/// Identifier of a bookable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(ResourceId)
    }
}

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub resource_id: ResourceId,
    /// Who holds the reservation (typically an email address).
    pub occupant: String,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
}

impl Reservation {
    /// Build a reservation, rejecting stays that do not cover at least one night.
    ///
    /// # Errors
    /// Returns `StayError::InvalidStay` when `arrival >= departure`.
    pub fn new(
        id: ReservationId,
        resource_id: ResourceId,
        occupant: impl Into<String>,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> Result<Self> {
        let reservation = Self {
            id,
            resource_id,
            occupant: occupant.into(),
            arrival_date,
            departure_date,
        };
        reservation.validate()?;
        Ok(reservation)
    }

    /// Check the creation-time invariant `arrival_date < departure_date`.
    pub fn validate(&self) -> Result<()> {
        if self.arrival_date < self.departure_date {
            Ok(())
        } else {
            Err(StayError::InvalidStay {
                arrival: self.arrival_date,
                departure: self.departure_date,
            })
        }
    }

    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.departure_date - self.arrival_date).num_days()
    }

    /// Strict overlap with the window: sharing only a boundary date does not count.
    pub fn overlaps(&self, window: &QueryWindow) -> bool {
        self.arrival_date < window.end_date && self.departure_date > window.start_date
    }
}

/// Payload for creating or replacing a reservation; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub resource_id: ResourceId,
    pub occupant: String,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
}

impl NewReservation {
    pub fn into_reservation(self, id: ReservationId) -> Result<Reservation> {
        Reservation::new(
            id,
            self.resource_id,
            self.occupant,
            self.arrival_date,
            self.departure_date,
        )
    }
}
