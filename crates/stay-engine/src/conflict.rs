//! Detect double bookings: reservations of the same resource whose stays overlap.
//!
//! Detection only reports. A stay ending on the day another begins is a normal
//! changeover, not a conflict.

use serde::{Deserialize, Serialize};

use crate::reservation::{Reservation, ReservationId, ResourceId};

/// Two reservations that book the same resource for at least one common night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleBooking {
    pub resource_id: ResourceId,
    /// The reservation arriving first (lower id on equal arrival).
    pub first: ReservationId,
    pub second: ReservationId,
    pub shared_nights: i64,
}

/// Find all double-booked pairs across the given reservations.
///
/// Reservations of different resources never conflict. Pairs are reported in
/// `(resource_id, first arrival, first id, second arrival, second id)` order.
pub fn find_double_bookings(reservations: &[Reservation]) -> Vec<DoubleBooking> {
    let mut sorted: Vec<&Reservation> = reservations.iter().collect();
    sorted.sort_by_key(|r| (r.resource_id, r.arrival_date, r.id));

    let mut conflicts = Vec::new();

    for (i, a) in sorted.iter().enumerate() {
        for b in &sorted[i + 1..] {
            // Later entries arrive no earlier than `b`, so once one starts at
            // or after `a` leaves (or belongs to another resource) we are done.
            if b.resource_id != a.resource_id || b.arrival_date >= a.departure_date {
                break;
            }
            let shared_start = a.arrival_date.max(b.arrival_date);
            let shared_end = a.departure_date.min(b.departure_date);

            conflicts.push(DoubleBooking {
                resource_id: a.resource_id,
                first: a.id,
                second: b.id,
                shared_nights: (shared_end - shared_start).num_days(),
            });
        }
    }

    conflicts
}
