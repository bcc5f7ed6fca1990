//! Property-based tests for the scheduler using proptest.
//!
//! These verify invariants that should hold for *any* reservation set and
//! window, including overlapping and out-of-window reservations.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use stay_engine::scheduler::{available_gaps, trimmed_overlaps};
use stay_engine::{occupancy, QueryWindow, Reservation, ReservationId, ResourceId};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    base().checked_add_days(Days::new(offset)).unwrap()
}

/// Reservations scattered over ~4 months, possibly overlapping each other.
fn arb_reservations() -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec((0u64..120, 1u64..20, 0usize..4), 0..25).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, nights, who))| {
                Reservation::new(
                    ReservationId(i as u64 + 1),
                    ResourceId(1),
                    ["ann", "bob", "cat", "dan"][who],
                    day(arrival),
                    day(arrival + nights),
                )
                .unwrap()
            })
            .collect()
    })
}

/// Reservations laid end to end with optional gaps, never overlapping.
fn arb_disjoint_reservations() -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec((0u64..6, 1u64..8), 0..15).prop_map(|specs| {
        let mut cursor = 0;
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (pause, nights))| {
                let arrival = cursor + pause;
                cursor = arrival + nights;
                Reservation::new(
                    ReservationId(i as u64 + 1),
                    ResourceId(1),
                    "guest",
                    day(arrival),
                    day(cursor),
                )
                .unwrap()
            })
            .collect()
    })
}

fn arb_window() -> impl Strategy<Value = QueryWindow> {
    (0u64..130, 0u64..60).prop_map(|(start, len)| {
        QueryWindow::new(ResourceId(1), day(start), day(start + len)).unwrap()
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

/// Every night `[start, end)` as a set.
fn nights(start: NaiveDate, end: NaiveDate) -> BTreeSet<NaiveDate> {
    start.iter_days().take_while(|d| *d < end).collect()
}

// ---------------------------------------------------------------------------
// Property 1: Gaps and occupied nights partition the window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn gaps_and_overlaps_partition_window(
        reservations in arb_reservations(),
        window in arb_window(),
    ) {
        let overlaps = trimmed_overlaps(&reservations, &window).unwrap();
        let gaps = available_gaps(&reservations, &window).unwrap();

        let occupied: BTreeSet<NaiveDate> = overlaps
            .iter()
            .flat_map(|o| nights(o.start, o.end))
            .collect();
        let mut free = BTreeSet::new();
        for g in &gaps {
            for night in nights(g.start, g.end) {
                prop_assert!(free.insert(night), "night {} in two gaps", night);
            }
        }

        prop_assert!(occupied.is_disjoint(&free), "a night is both free and occupied");
        let covered: BTreeSet<NaiveDate> = occupied.union(&free).copied().collect();
        prop_assert_eq!(covered, nights(window.start_date, window.end_date));
    }
}

// ---------------------------------------------------------------------------
// Property 2: Non-overlapping input tiles the window exactly, in order
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn disjoint_input_tiles_window(
        reservations in arb_disjoint_reservations(),
        window in arb_window(),
    ) {
        prop_assume!(!window.is_empty());

        let mut pieces: Vec<(NaiveDate, NaiveDate)> = trimmed_overlaps(&reservations, &window)
            .unwrap()
            .into_iter()
            .map(|o| (o.start, o.end))
            .chain(
                available_gaps(&reservations, &window)
                    .unwrap()
                    .into_iter()
                    .map(|g| (g.start, g.end)),
            )
            .collect();
        pieces.sort();

        let mut cursor = window.start_date;
        for (start, end) in pieces {
            prop_assert_eq!(start, cursor, "hole or overlap before {}", start);
            cursor = end;
        }
        prop_assert_eq!(cursor, window.end_date);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Outputs are sorted and every interval is non-empty
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn outputs_sorted_and_non_empty(
        reservations in arb_reservations(),
        window in arb_window(),
    ) {
        let overlaps = trimmed_overlaps(&reservations, &window).unwrap();
        let gaps = available_gaps(&reservations, &window).unwrap();

        for o in &overlaps {
            prop_assert!(o.start < o.end, "empty overlap {:?}", o);
            prop_assert!(o.start >= window.start_date && o.end <= window.end_date);
        }
        for g in &gaps {
            prop_assert!(g.start < g.end, "empty gap {:?}", g);
        }
        for pair in overlaps.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }
        for pair in gaps.windows(2) {
            // Gaps are strictly separated by at least one occupied night.
            prop_assert!(pair[0].end < pair[1].start);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Idempotence and independence from input order
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn results_independent_of_input_order(
        reservations in arb_reservations(),
        window in arb_window(),
    ) {
        let reversed: Vec<Reservation> = reservations.iter().rev().cloned().collect();

        let overlaps = trimmed_overlaps(&reservations, &window).unwrap();
        prop_assert_eq!(&overlaps, &trimmed_overlaps(&reservations, &window).unwrap());
        prop_assert_eq!(&overlaps, &trimmed_overlaps(&reversed, &window).unwrap());

        let gaps = available_gaps(&reservations, &window).unwrap();
        prop_assert_eq!(&gaps, &available_gaps(&reversed, &window).unwrap());
    }
}

// ---------------------------------------------------------------------------
// Property 5: Booked and free nights add up to the window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn occupancy_counts_add_up(
        reservations in arb_reservations(),
        window in arb_window(),
    ) {
        let result = occupancy(&reservations, &window).unwrap();
        let occupied: BTreeSet<NaiveDate> = result
            .reserved
            .iter()
            .flat_map(|o| nights(o.start, o.end))
            .collect();

        prop_assert_eq!(result.booked_nights, occupied.len() as i64);
        prop_assert_eq!(result.booked_nights + result.free_nights, window.nights());
    }
}
