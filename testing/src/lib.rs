//! # Cinema Testing
//!
//! Testing utilities and helpers for the cinema reservation system.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Test helpers and builders
//! - Property-based testing strategies
//! - Assertion helpers for reducers
//!
//! ## Example
//!
//! ```
//! use cinema_core::TheaterAction;
//! use cinema_testing::helpers::test_store;
//!
//! let store = test_store();
//! store.send(TheaterAction::ResetTheater).unwrap();
//!
//! let occupied = store.state(|s| s.ledger().total_clients()).unwrap();
//! assert_eq!(occupied, 0);
//! ```

use chrono::{DateTime, Utc};
use cinema_core::environment::Clock;


/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use cinema_testing::mocks::FixedClock;
    /// use cinema_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and builders
pub mod helpers {
    use super::mocks::test_clock;
    use cinema_core::{
        FareType, ReservationService, TheaterEnvironment, TheaterReducer, TheaterState,
    };
    use cinema_runtime::Store;
    use std::sync::Arc;

    /// Store type used by the cinema shell and tests
    pub type TestStore = Store<
        TheaterState,
        cinema_core::TheaterAction,
        TheaterEnvironment,
        TheaterReducer,
    >;

    /// Environment with a fixed clock
    #[must_use]
    pub fn test_environment() -> TheaterEnvironment {
        TheaterEnvironment::new(Arc::new(test_clock()))
    }

    /// Reservation service over a fixed clock
    #[must_use]
    pub fn test_service() -> ReservationService {
        ReservationService::new(test_environment())
    }

    /// Empty theater store over a fixed clock
    #[must_use]
    pub fn test_store() -> TestStore {
        Store::new(TheaterState::new(), TheaterReducer::new(), test_environment())
    }

    /// Builds a state with the given seats reserved
    ///
    /// # Panics
    ///
    /// Panics if any reservation is rejected.
    #[must_use]
    #[allow(clippy::panic)]
    pub fn state_with(seats: &[(char, i32, FareType)]) -> TheaterState {
        let service = test_service();
        let mut state = TheaterState::new();
        for &(row, column, fare) in seats {
            if let Err(error) = service.reserve(&mut state, row, column, fare) {
                panic!("fixture reservation {row}{column} failed: {error}");
            }
        }
        state
    }

    /// Route tracing output through the test harness
    ///
    /// Safe to call from several tests; only the first call installs the
    /// subscriber.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing strategies using proptest.
pub mod properties {
    use cinema_core::{
        DateTime, FULL_PRICE, FareType, HALF_PRICE, Money, Refund, Reservation, SeatId,
        TheaterAction,
    };
    use proptest::prelude::*;

    /// Row letters inside the room
    pub fn valid_row() -> impl Strategy<Value = char> {
        proptest::char::range('A', 'H')
    }

    /// Column numbers inside the room
    pub fn valid_column() -> impl Strategy<Value = i32> {
        1..=12i32
    }

    /// Row letters, mostly valid with lower-case letters and out-of-range
    /// capitals mixed in
    pub fn any_row() -> impl Strategy<Value = char> {
        prop_oneof![
            8 => valid_row(),
            1 => proptest::char::range('a', 'h'),
            1 => proptest::char::range('I', 'Z'),
        ]
    }

    /// Column numbers, mostly valid with negative and too-large values mixed in
    pub fn any_column() -> impl Strategy<Value = i32> {
        prop_oneof![
            8 => valid_column(),
            1 => -5..=0i32,
            1 => 13..=20i32,
        ]
    }

    /// Either fare
    pub fn fare() -> impl Strategy<Value = FareType> {
        prop_oneof![Just(FareType::Full), Just(FareType::Half)]
    }

    /// Commands a user could issue, with the occasional reset
    pub fn command() -> impl Strategy<Value = TheaterAction> {
        prop_oneof![
            6 => (any_row(), any_column(), fare())
                .prop_map(|(row, column, fare)| TheaterAction::ReserveSeat { row, column, fare }),
            3 => (any_row(), any_column())
                .prop_map(|(row, column)| TheaterAction::CancelReservation { row, column }),
            1 => Just(TheaterAction::ResetTheater),
        ]
    }

    /// Sequences of up to `max_len` commands
    pub fn commands(max_len: usize) -> impl Strategy<Value = Vec<TheaterAction>> {
        proptest::collection::vec(command(), 0..=max_len)
    }

    /// Seats inside the room
    pub fn seat_id() -> impl Strategy<Value = SeatId> {
        (valid_row(), valid_column())
            .prop_filter_map("seat inside the room", |(row, column)| {
                SeatId::new(row, column).ok()
            })
    }

    /// Ticket prices, mostly the two real ones
    pub fn price() -> impl Strategy<Value = Money> {
        prop_oneof![
            2 => Just(FULL_PRICE),
            2 => Just(HALF_PRICE),
            1 => (0u64..10_000).prop_map(Money::from_cents),
        ]
    }

    /// Reservation and cancellation events with arbitrary payloads, as an
    /// untrusted event source could deliver them
    pub fn forged_event() -> impl Strategy<Value = TheaterAction> {
        prop_oneof![
            (seat_id(), fare(), any::<bool>(), price()).prop_map(|(seat, fare, pcd, price)| {
                TheaterAction::SeatReserved(Reservation {
                    seat,
                    fare,
                    pcd,
                    price,
                    reserved_at: DateTime::default(),
                })
            }),
            (seat_id(), fare(), any::<bool>(), price()).prop_map(|(seat, fare, pcd, amount)| {
                TheaterAction::ReservationCancelled(Refund {
                    seat,
                    fare,
                    pcd,
                    amount,
                    cancelled_at: DateTime::default(),
                })
            }),
        ]
    }

    /// Sequences of up to `max_len` commands interleaved with forged events
    pub fn actions(max_len: usize) -> impl Strategy<Value = Vec<TheaterAction>> {
        let action = prop_oneof![3 => command(), 1 => forged_event()];
        proptest::collection::vec(action, 0..=max_len)
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::ReducerTest;
