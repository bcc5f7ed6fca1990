//! # stay-engine
//!
//! Reservation interval engine for bookable apartments.
//!
//! Given the reservations of one resource and a half-open date window
//! `[start, end)`, the engine answers two questions: who occupies which part of
//! the window, and which parts of the window are still free. Both answers are
//! pure functions of their inputs; fetching reservations is left to a
//! [`ReservationStore`].
//!
//! ## Modules
//!
//! - [`scheduler`] — trimmed overlaps and available gaps
//! - [`occupancy`] — both views plus booked/free night counts
//! - [`conflict`] — detect double-booked reservations
//! - [`reservation`] — reservation records and ids
//! - [`window`] — query windows and date parsing
//! - [`store`] — persistence seam and an in-memory store
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod occupancy;
pub mod reservation;
pub mod scheduler;
pub mod store;
pub mod window;

pub use conflict::{find_double_bookings, DoubleBooking};
pub use error::StayError;
pub use occupancy::{occupancy, Occupancy};
pub use reservation::{NewReservation, Reservation, ReservationId, ResourceId};
pub use scheduler::{
    available_gaps, first_available_gap, trimmed_overlaps, AvailableGap, TrimmedOverlap,
};
pub use store::{available_periods, reserved_periods, InMemoryStore, Page, ReservationStore};
pub use window::{parse_date, QueryWindow};
