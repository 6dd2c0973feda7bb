//! Concurrency tests for the store.
//!
//! These tests verify that concurrent reservations of the same seat are
//! serialized by the store and never double-book.
//!
//! Run with: `cargo test --test concurrency_test -- --nocapture`

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)] // Test code can use unwrap/expect

use cinema_core::{FareType, ReportEngine, SeatId, TheaterAction};
use cinema_runtime::StoreError;
use cinema_testing::helpers::{init_test_tracing, test_store};
use std::thread;

/// 32 threads race for one seat: exactly one reservation succeeds.
#[test]
fn test_last_seat_race_has_single_winner() {
    init_test_tracing();
    let store = test_store();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                let fare = if i % 2 == 0 { FareType::Full } else { FareType::Half };
                let events = store
                    .send(TheaterAction::ReserveSeat { row: 'D', column: 6, fare })
                    .expect("store should not be poisoned");
                events
                    .into_iter()
                    .next()
                    .and_then(TheaterAction::into_reservation)
                    .expect("reserve emits one outcome")
            })
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = outcomes.iter().filter(|o| o.is_ok()).count();
    assert_eq!(winners, 1, "exactly one reservation must succeed");

    let seat = SeatId::new('D', 6).unwrap();
    for outcome in outcomes.iter().filter_map(|o| o.as_ref().err()) {
        assert_eq!(outcome, &cinema_core::ReservationError::AlreadyOccupied(seat));
    }

    store
        .state(|state| {
            assert_eq!(state.ledger().total_clients(), 1);
            assert!(state.is_consistent());
        })
        .unwrap();
}

/// Every thread books its own row while others cancel: totals stay consistent.
#[test]
fn test_parallel_rows_keep_ledger_consistent() {
    let store = test_store();

    let handles: Vec<_> = ['B', 'C', 'D', 'E', 'F', 'G', 'H']
        .into_iter()
        .map(|row| {
            let store = store.clone();
            thread::spawn(move || {
                for column in 1..=12 {
                    store
                        .send(TheaterAction::ReserveSeat { row, column, fare: FareType::Full })
                        .unwrap();
                }
                for column in (1..=12).step_by(2) {
                    store
                        .send(TheaterAction::CancelReservation { row, column })
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let summary = store
        .state(|state| {
            assert!(state.is_consistent());
            ReportEngine::new(state).summary()
        })
        .unwrap();
    assert_eq!(summary.total_clients, 7 * 6);
    assert_eq!(summary.free_seats, 96 - 42);
}

/// Journal sequence numbers follow the order actions were applied.
#[test]
fn test_journal_is_ordered() {
    let store = test_store();

    store
        .send(TheaterAction::ReserveSeat { row: 'A', column: 1, fare: FareType::Half })
        .unwrap();
    store
        .send(TheaterAction::CancelReservation { row: 'A', column: 1 })
        .unwrap();
    store.send(TheaterAction::ResetTheater).unwrap();

    let journal = store.journal().unwrap();
    let names: Vec<_> = journal.iter().map(|e| e.action.event_type()).collect();
    assert_eq!(
        names,
        ["SeatReserved.v1", "ReservationCancelled.v1", "TheaterReset.v1"]
    );
    assert!(journal.windows(2).all(|w| w[0].sequence < w[1].sequence));
}

/// A panic while reading state poisons the store for everyone.
#[test]
fn test_poisoned_store_reports_error() {
    let store = test_store();
    let clone = store.clone();

    let result = thread::spawn(move || {
        clone
            .state(|state| {
                assert!(
                    state.ledger().total_clients() > 0,
                    "reader panicked while holding the lock"
                );
            })
            .unwrap();
    })
    .join();
    assert!(result.is_err());

    assert_eq!(
        store.send(TheaterAction::ResetTheater).unwrap_err(),
        StoreError::Poisoned
    );
    assert_eq!(store.state(|_| ()).unwrap_err(), StoreError::Poisoned);
}
