//! Overlap detection and gap computation over one resource's reservations.
//!
//! Both views start from the same step: keep the reservations that strictly
//! overlap the window and order them by arrival date, then by id. Trimmed
//! overlaps clamp each of them to the window; available gaps sweep a cursor
//! across them and emit whatever is left uncovered.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reservation::Reservation;
use crate::window::QueryWindow;

/// A reservation clamped to the query window.
///
/// Serializes as an `[occupant, start, end]` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "(String, NaiveDate, NaiveDate)",
    from = "(String, NaiveDate, NaiveDate)"
)]
pub struct TrimmedOverlap {
    pub occupant: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TrimmedOverlap {
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl From<TrimmedOverlap> for (String, NaiveDate, NaiveDate) {
    fn from(o: TrimmedOverlap) -> Self {
        (o.occupant, o.start, o.end)
    }
}

impl From<(String, NaiveDate, NaiveDate)> for TrimmedOverlap {
    fn from((occupant, start, end): (String, NaiveDate, NaiveDate)) -> Self {
        Self {
            occupant,
            start,
            end,
        }
    }
}

/// A maximal free stretch of the query window. Serializes as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(NaiveDate, NaiveDate)", from = "(NaiveDate, NaiveDate)")]
pub struct AvailableGap {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AvailableGap {
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl From<AvailableGap> for (NaiveDate, NaiveDate) {
    fn from(g: AvailableGap) -> Self {
        (g.start, g.end)
    }
}

impl From<(NaiveDate, NaiveDate)> for AvailableGap {
    fn from((start, end): (NaiveDate, NaiveDate)) -> Self {
        Self { start, end }
    }
}

/// Reservations strictly overlapping a non-empty window, ordered by
/// `(arrival_date, id)`.
///
/// A zero-length window has no nights, so nothing can overlap it; without this
/// check a stay spanning the single boundary date would pass the predicate.
fn overlapping_sorted<'a>(
    reservations: &'a [Reservation],
    window: &QueryWindow,
) -> Vec<&'a Reservation> {
    if window.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.overlaps(window))
        .collect();
    hits.sort_by_key(|r| (r.arrival_date, r.id));
    hits
}

/// Reservations overlapping the window, each clamped to the window's bounds.
///
/// Sorted by effective start; every emitted interval covers at least one night.
///
/// # Errors
/// Returns `StayError::InvalidWindow` if `window.start_date > window.end_date`.
pub fn trimmed_overlaps(
    reservations: &[Reservation],
    window: &QueryWindow,
) -> Result<Vec<TrimmedOverlap>> {
    window.validate()?;

    Ok(overlapping_sorted(reservations, window)
        .into_iter()
        .map(|r| TrimmedOverlap {
            occupant: r.occupant.clone(),
            start: r.arrival_date.max(window.start_date),
            end: r.departure_date.min(window.end_date),
        })
        .collect())
}

/// Free stretches of the window not covered by any reservation.
///
/// Overlapping or adjacent reservations are tolerated: the cursor only ever
/// moves forward, so no gap can be negative or emitted twice.
///
/// # Errors
/// Returns `StayError::InvalidWindow` if `window.start_date > window.end_date`.
pub fn available_gaps(
    reservations: &[Reservation],
    window: &QueryWindow,
) -> Result<Vec<AvailableGap>> {
    window.validate()?;

    if window.is_empty() {
        return Ok(Vec::new());
    }

    let mut gaps = Vec::new();
    let mut cursor = window.start_date;

    for r in overlapping_sorted(reservations, window) {
        if r.arrival_date > cursor {
            gaps.push(AvailableGap {
                start: cursor,
                end: r.arrival_date,
            });
        }
        cursor = cursor.max(r.departure_date);
    }

    if cursor < window.end_date {
        gaps.push(AvailableGap {
            start: cursor,
            end: window.end_date,
        });
    }

    Ok(gaps)
}

/// The earliest gap offering at least `min_nights` consecutive free nights.
///
/// Delegates to [`available_gaps`].
pub fn first_available_gap(
    reservations: &[Reservation],
    window: &QueryWindow,
    min_nights: u32,
) -> Result<Option<AvailableGap>> {
    Ok(available_gaps(reservations, window)?
        .into_iter()
        .find(|gap| gap.nights() >= i64::from(min_nights)))
}
