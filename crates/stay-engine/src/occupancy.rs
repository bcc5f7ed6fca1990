//! Combined occupancy view of a window: who stays when, what is left free,
//! and how many nights each side accounts for.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reservation::{Reservation, ResourceId};
use crate::scheduler::{self, AvailableGap, TrimmedOverlap};
use crate::window::QueryWindow;

/// Occupancy of one resource over a query window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub resource_id: ResourceId,
    pub window: QueryWindow,
    /// Reservations clamped to the window, sorted by start.
    pub reserved: Vec<TrimmedOverlap>,
    /// Free stretches of the window, sorted by start.
    pub available: Vec<AvailableGap>,
    /// Distinct nights covered by at least one reservation.
    pub booked_nights: i64,
    pub free_nights: i64,
}

impl Occupancy {
    /// Share of the window's nights that are booked, in `[0.0, 1.0]`.
    /// An empty window reports `0.0`.
    pub fn rate(&self) -> f64 {
        let total = self.window.nights();
        if total == 0 {
            0.0
        } else {
            self.booked_nights as f64 / total as f64
        }
    }
}

/// Compute both scheduler views for the window and the night counts derived
/// from them.
///
/// Gaps and booked stretches partition the window, so booked nights are the
/// window's nights minus the free ones. Double-booked nights count once.
pub fn occupancy(reservations: &[Reservation], window: &QueryWindow) -> Result<Occupancy> {
    let reserved = scheduler::trimmed_overlaps(reservations, window)?;
    let available = scheduler::available_gaps(reservations, window)?;

    let free_nights: i64 = available.iter().map(AvailableGap::nights).sum();
    let booked_nights = window.nights() - free_nights;

    Ok(Occupancy {
        resource_id: window.resource_id,
        window: *window,
        reserved,
        available,
        booked_nights,
        free_nights,
    })
}
