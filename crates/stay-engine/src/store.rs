//! Persistence seam for reservations.
//!
//! The scheduler only ever sees plain slices; anything that can hand out the
//! reservations of one resource implements [`ReservationStore`]. The in-memory
//! store backs the CLI and the tests and carries the create/read/update/delete
//! operations of the booking service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StayError};
use crate::reservation::{NewReservation, Reservation, ReservationId, ResourceId};
use crate::scheduler::{self, AvailableGap, TrimmedOverlap};
use crate::window::QueryWindow;

/// Source of reservation records for a resource.
pub trait ReservationStore {
    /// All reservations of the resource, in any order.
    fn list_reservations_for_resource(&self, resource_id: ResourceId) -> Result<Vec<Reservation>>;
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matching records across all pages.
    pub total: usize,
    /// Number of records on this page.
    pub size: usize,
}

/// Reservations kept in a map ordered by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    reservations: BTreeMap<ReservationId, Reservation>,
    next_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load reservations from a JSON array.
    ///
    /// # Errors
    /// Returns `StayError::Decode` for malformed JSON or duplicate ids and
    /// `StayError::InvalidStay` for a record whose arrival is not before its departure.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Reservation> =
            serde_json::from_str(json).map_err(|e| StayError::Decode(e.to_string()))?;

        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        debug!(count = store.len(), "loaded reservations");
        Ok(store)
    }

    /// Dump all reservations as a JSON array ordered by id.
    pub fn to_json(&self) -> Result<String> {
        let records: Vec<&Reservation> = self.reservations.values().collect();
        serde_json::to_string(&records).map_err(|e| StayError::Decode(e.to_string()))
    }

    /// Insert a record that already carries its id.
    ///
    /// # Errors
    /// Returns `StayError::InvalidStay` for an invalid record and
    /// `StayError::Decode` if the id is already taken.
    pub fn insert(&mut self, reservation: Reservation) -> Result<()> {
        reservation.validate()?;
        if self.reservations.contains_key(&reservation.id) {
            return Err(StayError::Decode(format!(
                "duplicate reservation id {}",
                reservation.id
            )));
        }
        self.next_id = self.next_id.max(reservation.id.0.saturating_add(1));
        self.reservations.insert(reservation.id, reservation);
        Ok(())
    }

    /// Create a reservation under the next free id.
    pub fn add(&mut self, item: NewReservation) -> Result<Reservation> {
        let id = ReservationId(self.next_id.max(1));
        let reservation = item.into_reservation(id)?;
        self.insert(reservation.clone())?;
        debug!(id = %id, resource = %reservation.resource_id, "reservation added");
        Ok(reservation)
    }

    pub fn get(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.get(&id)
    }

    /// Replace the reservation stored under `id`. Returns `None` when no such
    /// reservation exists.
    pub fn update(&mut self, id: ReservationId, item: NewReservation) -> Result<Option<Reservation>> {
        let Some(slot) = self.reservations.get_mut(&id) else {
            return Ok(None);
        };
        let updated = item.into_reservation(id)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    /// Remove a reservation. Returns whether one was removed.
    pub fn delete(&mut self, id: ReservationId) -> bool {
        self.reservations.remove(&id).is_some()
    }

    /// Reservations held by `occupant`, ordered by id, paginated.
    pub fn list_for_occupant(&self, occupant: &str, limit: usize, offset: usize) -> Page<Reservation> {
        let matching = self
            .reservations
            .values()
            .filter(|r| r.occupant == occupant);
        let total = matching.clone().count();
        let items: Vec<Reservation> = matching.skip(offset).take(limit).cloned().collect();

        Page {
            size: items.len(),
            items,
            total,
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.values()
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}

impl ReservationStore for InMemoryStore {
    fn list_reservations_for_resource(&self, resource_id: ResourceId) -> Result<Vec<Reservation>> {
        Ok(self
            .reservations
            .values()
            .filter(|r| r.resource_id == resource_id)
            .cloned()
            .collect())
    }
}

/// Trimmed reservations of the window's resource, fetched through the store.
pub fn reserved_periods<S: ReservationStore + ?Sized>(
    store: &S,
    window: &QueryWindow,
) -> Result<Vec<TrimmedOverlap>> {
    window.validate()?;
    let reservations = store.list_reservations_for_resource(window.resource_id)?;
    debug!(
        resource = %window.resource_id,
        fetched = reservations.len(),
        "computing reserved periods"
    );
    scheduler::trimmed_overlaps(&reservations, window)
}

/// Free stretches of the window's resource, fetched through the store.
pub fn available_periods<S: ReservationStore + ?Sized>(
    store: &S,
    window: &QueryWindow,
) -> Result<Vec<AvailableGap>> {
    window.validate()?;
    let reservations = store.list_reservations_for_resource(window.resource_id)?;
    debug!(
        resource = %window.resource_id,
        fetched = reservations.len(),
        "computing available periods"
    );
    scheduler::available_gaps(&reservations, window)
}
