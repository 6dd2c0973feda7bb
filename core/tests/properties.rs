//! Property tests: arbitrary command sequences never break the theater
//! invariants.

#![allow(clippy::expect_used, clippy::unwrap_used)] // Test code can use unwrap/expect

use cinema_core::{
    FareType, Reducer, ReportEngine, SEAT_COUNT, TheaterAction, TheaterReducer, TheaterState,
};
use cinema_testing::helpers::{test_environment, test_service};
use cinema_testing::properties::{
    actions, any_column, any_row, commands, fare, valid_column, valid_row,
};
use proptest::prelude::*;

fn run(commands: Vec<TheaterAction>) -> (TheaterState, Vec<TheaterAction>) {
    let reducer = TheaterReducer::new();
    let env = test_environment();
    let mut state = TheaterState::new();
    let mut events = Vec::new();
    for command in commands {
        events.extend(reducer.reduce(&mut state, command, &env));
    }
    (state, events)
}

proptest! {
    #[test]
    fn ledger_always_matches_grid(actions in actions(60)) {
        let (state, _) = run(actions);
        prop_assert!(state.is_consistent());

        let summary = ReportEngine::new(&state).summary();
        prop_assert_eq!(summary.total_clients, state.grid().occupied_count());
        prop_assert_eq!(summary.full_fare_count + summary.half_fare_count, summary.total_clients);
        prop_assert_eq!(summary.total_clients + summary.free_seats, SEAT_COUNT);
        prop_assert_eq!(
            summary.total_revenue,
            summary.full_fare_revenue.saturating_add(summary.half_fare_revenue)
        );
    }

    #[test]
    fn pcd_seats_are_never_full_fare(actions in actions(60)) {
        let (state, _) = run(actions);
        for seat in state.grid().seats() {
            if seat.is_pcd() {
                prop_assert_ne!(seat.fare(), Some(FareType::Full));
            }
        }
        prop_assert!(state.ledger().pcd_count() <= state.ledger().half_fare_count());
    }

    #[test]
    fn every_command_emits_exactly_one_event(commands in commands(40)) {
        let count = commands.len();
        let (_, events) = run(commands);
        prop_assert_eq!(events.len(), count);
        prop_assert!(events.iter().all(TheaterAction::is_event));
    }

    #[test]
    fn rejected_commands_leave_seats_untouched(
        setup in commands(30),
        row in any_row(),
        column in any_column(),
        fare in fare(),
    ) {
        let (mut state, _) = run(setup);
        let before = state.clone();

        if test_service().reserve(&mut state, row, column, fare).is_err() {
            prop_assert_eq!(state.grid(), before.grid());
            prop_assert_eq!(state.ledger(), before.ledger());
            prop_assert!(state.last_error().is_some());
        }
    }

    #[test]
    fn reserve_then_cancel_restores_state(
        setup in commands(30),
        row in valid_row(),
        column in valid_column(),
        fare in fare(),
    ) {
        let service = test_service();
        let (mut state, _) = run(setup);
        let before = state.clone();

        if let Ok(reservation) = service.reserve(&mut state, row, column, fare) {
            let refund = service.cancel(&mut state, row, column).unwrap();
            prop_assert_eq!(refund.amount, reservation.price);
            prop_assert_eq!(state.grid(), before.grid());
            prop_assert_eq!(state.ledger(), before.ledger());
        }
    }

    #[test]
    fn events_survive_serialization(commands in commands(20)) {
        let (_, events) = run(commands);
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let decoded: TheaterAction = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(decoded, event);
        }
    }

    #[test]
    fn bar_lengths_never_exceed_scale(commands in commands(60), scale in 0u32..=200) {
        let (state, _) = run(commands);
        let chart = ReportEngine::new(&state).bar_chart_with_scale(scale);
        prop_assert!(chart.occupied.length + chart.free.length <= scale);
        prop_assert!(chart.full_fare.length <= chart.occupied.length);
    }
}

#[test]
fn test_report_json_shape() {
    let service = test_service();
    let mut state = TheaterState::new();
    service.reserve(&mut state, 'A', 1, FareType::Half).unwrap();

    let value = serde_json::to_value(ReportEngine::new(&state).summary()).unwrap();
    assert_eq!(value["total_clients"], 1);
    assert_eq!(value["pcd_count"], 1);
    assert_eq!(value["total_revenue"], 2_000);
}
