//! Reservation service: the direct-call entry point to the theater reducer.
//!
//! Callers that own a [`TheaterState`] use this facade to get typed results
//! instead of events. Callers sharing state across threads go through the
//! runtime `Store` with [`TheaterAction`](crate::theater::TheaterAction)s
//! instead; both paths run the same reducer code.

use crate::error::ReservationError;
use crate::theater::{Refund, Reservation, TheaterEnvironment, TheaterReducer, TheaterState};
use crate::types::{FareType, SeatId};
use chrono::{DateTime, Utc};

/// Validates and applies reserve/cancel operations on a [`TheaterState`].
#[derive(Clone)]
pub struct ReservationService {
    reducer: TheaterReducer,
    environment: TheaterEnvironment,
}

impl ReservationService {
    /// Creates a service over the given environment
    #[must_use]
    pub const fn new(environment: TheaterEnvironment) -> Self {
        Self {
            reducer: TheaterReducer::new(),
            environment,
        }
    }

    /// Returns the injected environment
    #[must_use]
    pub const fn environment(&self) -> &TheaterEnvironment {
        &self.environment
    }

    /// Reserves `(row, column)` at `fare` and returns the confirmation.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::InvalidCoordinate`] for a seat outside the room
    /// - [`ReservationError::AlreadyOccupied`] if the seat is taken
    /// - [`ReservationError::PcdRequiresHalfFare`] for a full fare on row `A`
    #[tracing::instrument(level = "debug", skip(self, state))]
    pub fn reserve(
        &self,
        state: &mut TheaterState,
        row: char,
        column: i32,
        fare: FareType,
    ) -> Result<Reservation, ReservationError> {
        self.reducer
            .reserve(state, row, column, fare, &self.environment)
    }

    /// Cancels the reservation of `(row, column)` and returns the refund.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::InvalidCoordinate`] for a seat outside the room
    /// - [`ReservationError::SeatNotOccupied`] if the seat is free
    #[tracing::instrument(level = "debug", skip(self, state))]
    pub fn cancel(
        &self,
        state: &mut TheaterState,
        row: char,
        column: i32,
    ) -> Result<Refund, ReservationError> {
        self.reducer.cancel(state, row, column, &self.environment)
    }

    /// Frees every seat and zeroes the ledger
    pub fn reset(&self, state: &mut TheaterState) -> DateTime<Utc> {
        self.reducer.reset(state, &self.environment)
    }

    /// Runs the coordinate and occupancy checks of a reservation without
    /// mutating anything. The shell calls this before asking for a fare.
    ///
    /// # Errors
    ///
    /// Same as the first two checks of [`ReservationService::reserve`].
    pub fn check_seat_available(
        &self,
        state: &TheaterState,
        row: char,
        column: i32,
    ) -> Result<SeatId, ReservationError> {
        TheaterReducer::check_available(state, row, column)
    }
}
