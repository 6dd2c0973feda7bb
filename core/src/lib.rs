//! # Cinema Core
//!
//! Domain model and business logic for reserving seats in a single cinema
//! room.
//!
//! The room is an 8 × 12 grid of seats. Rows are lettered `A` through `H`,
//! columns numbered `1` through `12`, and every seat of row `A` is reserved
//! for people with disabilities (PCD) and can only be sold at half fare.
//!
//! ## Core Concepts
//!
//! - **State**: [`TheaterState`], the seat grid plus its running ledger
//! - **Action**: [`TheaterAction`], commands (`ReserveSeat`, ...) and the events they produce
//! - **Reducer**: [`TheaterReducer`], `(State, Action, Environment) → (State, Events)`
//! - **Environment**: [`TheaterEnvironment`], injected dependencies such as the clock
//! - **Service**: [`ReservationService`], typed `Result` access to the same logic
//! - **Reports**: [`ReportEngine`], read-only summaries, listings and chart data
//!
//! ## Example
//!
//! ```
//! use cinema_core::{FareType, ReportEngine, ReservationService, TheaterEnvironment, TheaterState};
//! use cinema_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! let service = ReservationService::new(TheaterEnvironment::new(Arc::new(SystemClock)));
//! let mut state = TheaterState::new();
//!
//! let reservation = service.reserve(&mut state, 'C', 5, FareType::Full)?;
//! assert_eq!(reservation.seat.to_string(), "C05");
//! assert_eq!(ReportEngine::new(&state).summary().total_clients, 1);
//! # Ok::<(), cinema_core::ReservationError>(())
//! ```

pub mod environment;
pub mod error;
pub mod grid;
pub mod ledger;
pub mod reducer;
pub mod report;
pub mod service;
pub mod theater;
pub mod types;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use error::{ReservationError, ReservationResult};
pub use grid::SeatGrid;
pub use ledger::ReservationLedger;
pub use reducer::Reducer;
pub use report::{BAR_SCALE, Bar, BarChart, ReportEngine, SeatDescriptor, Summary};
pub use service::ReservationService;
pub use smallvec::{SmallVec, smallvec};
pub use theater::{
    Refund, Reservation, TheaterAction, TheaterEnvironment, TheaterReducer, TheaterState,
};
pub use types::{
    COLUMNS, Column, FULL_PRICE, FareType, HALF_PRICE, Money, ROWS, Row, SEAT_COUNT, Seat, SeatId,
};
