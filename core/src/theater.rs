//! Theater aggregate: seat reservations for the single room.
//!
//! Handles the reserve/cancel state machine. Every command is validated
//! completely before the grid or the ledger is touched, so a rejected command
//! leaves both exactly as they were.

use crate::environment::Clock;
use crate::error::ReservationError;
use crate::grid::SeatGrid;
use crate::ledger::ReservationLedger;
use crate::reducer::Reducer;
use crate::types::{FareType, Money, Seat, SeatId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

// ============================================================================
// State
// ============================================================================

/// Complete state of the room: the seat grid, its ledger and the last
/// rejection.
///
/// The grid and the ledger are only mutated through event application in
/// [`TheaterReducer`], which keeps them consistent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TheaterState {
    grid: SeatGrid,
    ledger: ReservationLedger,
    last_error: Option<ReservationError>,
}

impl TheaterState {
    /// Creates a state with every seat free and zeroed counters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the seat grid
    #[must_use]
    pub const fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    /// Returns the incrementally maintained ledger
    #[must_use]
    pub const fn ledger(&self) -> &ReservationLedger {
        &self.ledger
    }

    /// Returns the error of the last rejected command, cleared by any success
    #[must_use]
    pub const fn last_error(&self) -> Option<&ReservationError> {
        self.last_error.as_ref()
    }

    /// Whether the incremental ledger matches a full recount of the grid
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        ReservationLedger::from_grid(&self.grid) == self.ledger
    }
}

/// Confirmation of a successful reservation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Reserved seat
    pub seat: SeatId,
    /// Fare the seat was sold at
    pub fare: FareType,
    /// Whether the seat is a PCD seat
    pub pcd: bool,
    /// Price charged
    pub price: Money,
    /// When the reservation was made
    pub reserved_at: DateTime<Utc>,
}

/// Confirmation of a successful cancellation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    /// Released seat
    pub seat: SeatId,
    /// Fare the seat had been sold at
    pub fare: FareType,
    /// Whether the seat is a PCD seat
    pub pcd: bool,
    /// Amount returned to the customer
    pub amount: Money,
    /// When the reservation was cancelled
    pub cancelled_at: DateTime<Utc>,
}

// ============================================================================
// Actions (Commands + Events)
// ============================================================================

/// Actions for the theater aggregate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TheaterAction {
    // Commands
    /// Reserve a seat at the given fare
    ReserveSeat {
        /// Row letter as typed by the user
        row: char,
        /// Column number as typed by the user
        column: i32,
        /// Requested fare
        fare: FareType,
    },

    /// Cancel the reservation of a seat
    CancelReservation {
        /// Row letter as typed by the user
        row: char,
        /// Column number as typed by the user
        column: i32,
    },

    /// Free every seat and zero the ledger
    ResetTheater,

    // Events
    /// A seat was reserved
    SeatReserved(Reservation),

    /// A reservation was cancelled and refunded
    ReservationCancelled(Refund),

    /// The room was reset
    TheaterReset {
        /// When the reset happened
        reset_at: DateTime<Utc>,
    },

    /// A command was rejected; state is unchanged apart from `last_error`
    ReservationRejected {
        /// Why the command was rejected
        error: ReservationError,
    },
}

impl TheaterAction {
    /// Whether this action is a command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::ReserveSeat { .. } | Self::CancelReservation { .. } | Self::ResetTheater
        )
    }

    /// Whether this action is an event
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }

    /// Stable name of the action, used in logs and the store journal
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::ReserveSeat { .. } => "ReserveSeat",
            Self::CancelReservation { .. } => "CancelReservation",
            Self::ResetTheater => "ResetTheater",
            Self::SeatReserved(_) => "SeatReserved.v1",
            Self::ReservationCancelled(_) => "ReservationCancelled.v1",
            Self::TheaterReset { .. } => "TheaterReset.v1",
            Self::ReservationRejected { .. } => "ReservationRejected.v1",
        }
    }

    /// Outcome of a `ReserveSeat` command, read from the event it emitted.
    ///
    /// Returns `None` for events a reservation never produces.
    #[must_use]
    pub fn into_reservation(self) -> Option<Result<Reservation, ReservationError>> {
        match self {
            Self::SeatReserved(reservation) => Some(Ok(reservation)),
            Self::ReservationRejected { error } => Some(Err(error)),
            _ => None,
        }
    }

    /// Outcome of a `CancelReservation` command, read from the event it
    /// emitted.
    ///
    /// Returns `None` for events a cancellation never produces.
    #[must_use]
    pub fn into_refund(self) -> Option<Result<Refund, ReservationError>> {
        match self {
            Self::ReservationCancelled(refund) => Some(Ok(refund)),
            Self::ReservationRejected { error } => Some(Err(error)),
            _ => None,
        }
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Environment dependencies for the theater reducer
#[derive(Clone)]
pub struct TheaterEnvironment {
    /// Clock for timestamping events
    pub clock: Arc<dyn Clock>,
}

impl TheaterEnvironment {
    /// Creates a new `TheaterEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the theater aggregate
#[derive(Clone, Copy, Debug, Default)]
pub struct TheaterReducer;

impl TheaterReducer {
    /// Creates a new `TheaterReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks that `(row, column)` is a free seat, without touching state.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidCoordinate`] or
    /// [`ReservationError::AlreadyOccupied`].
    pub fn check_available(
        state: &TheaterState,
        row: char,
        column: i32,
    ) -> Result<SeatId, ReservationError> {
        let seat = SeatId::new(row, column)?;
        if state.grid.seat(seat).is_occupied() {
            return Err(ReservationError::AlreadyOccupied(seat));
        }
        Ok(seat)
    }

    /// Validates a `ReserveSeat` command
    fn validate_reserve(
        state: &TheaterState,
        row: char,
        column: i32,
        fare: FareType,
    ) -> Result<SeatId, ReservationError> {
        let seat = Self::check_available(state, row, column)?;
        if seat.is_pcd() && fare == FareType::Full {
            return Err(ReservationError::PcdRequiresHalfFare(seat));
        }
        Ok(seat)
    }

    /// Validates a `CancelReservation` command
    fn validate_cancel(
        state: &TheaterState,
        row: char,
        column: i32,
    ) -> Result<(Seat, FareType), ReservationError> {
        let id = SeatId::new(row, column)?;
        let seat = *state.grid.seat(id);
        let Some(fare) = seat.fare() else {
            return Err(ReservationError::SeatNotOccupied(id));
        };
        Ok((seat, fare))
    }

    /// Reserves a seat.
    ///
    /// # Errors
    ///
    /// Returns the first failed check, in order: invalid coordinate, seat
    /// already occupied, full fare on a PCD seat. The rejection is recorded in
    /// `last_error`; grid and ledger are untouched.
    pub fn reserve(
        &self,
        state: &mut TheaterState,
        row: char,
        column: i32,
        fare: FareType,
        env: &TheaterEnvironment,
    ) -> Result<Reservation, ReservationError> {
        let seat = match Self::validate_reserve(state, row, column, fare) {
            Ok(seat) => seat,
            Err(error) => return Err(Self::reject(state, error)),
        };

        let reservation = Reservation {
            seat,
            fare,
            pcd: seat.is_pcd(),
            price: fare.price(),
            reserved_at: env.clock.now(),
        };
        Self::apply_event(state, &TheaterAction::SeatReserved(reservation.clone()));

        tracing::info!(
            seat = %reservation.seat,
            fare = %reservation.fare,
            price = %reservation.price,
            "Seat reserved"
        );
        Ok(reservation)
    }

    /// Cancels the reservation of a seat and returns the refund.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidCoordinate`] or
    /// [`ReservationError::SeatNotOccupied`]; state is untouched apart from
    /// `last_error`.
    pub fn cancel(
        &self,
        state: &mut TheaterState,
        row: char,
        column: i32,
        env: &TheaterEnvironment,
    ) -> Result<Refund, ReservationError> {
        let (seat, fare) = match Self::validate_cancel(state, row, column) {
            Ok(found) => found,
            Err(error) => return Err(Self::reject(state, error)),
        };

        let refund = Refund {
            seat: seat.id(),
            fare,
            pcd: seat.is_pcd(),
            amount: fare.price(),
            cancelled_at: env.clock.now(),
        };
        Self::apply_event(state, &TheaterAction::ReservationCancelled(refund.clone()));

        tracing::info!(seat = %refund.seat, amount = %refund.amount, "Reservation cancelled");
        Ok(refund)
    }

    /// Frees every seat and zeroes the ledger. Returns the reset time.
    pub fn reset(&self, state: &mut TheaterState, env: &TheaterEnvironment) -> DateTime<Utc> {
        let reset_at = env.clock.now();
        Self::apply_event(state, &TheaterAction::TheaterReset { reset_at });
        tracing::info!("Theater reset");
        reset_at
    }

    fn reject(state: &mut TheaterState, error: ReservationError) -> ReservationError {
        tracing::debug!(%error, "Command rejected");
        Self::apply_event(
            state,
            &TheaterAction::ReservationRejected {
                error: error.clone(),
            },
        );
        error
    }

    /// Why a reservation event cannot be applied to `seat`, if it cannot
    fn reservation_conflict(seat: &Seat, reservation: &Reservation) -> Option<&'static str> {
        if seat.is_occupied() {
            Some("seat already occupied")
        } else if seat.is_pcd() && reservation.fare == FareType::Full {
            Some("full fare on a PCD seat")
        } else if reservation.pcd != seat.is_pcd() {
            Some("PCD flag does not match the seat")
        } else if reservation.price != reservation.fare.price() {
            Some("price does not match the fare")
        } else {
            None
        }
    }

    /// Why a cancellation event cannot be applied to `seat`, if it cannot
    fn cancellation_conflict(seat: &Seat, refund: &Refund) -> Option<&'static str> {
        match seat.fare() {
            None => Some("seat is free"),
            Some(fare) if fare != refund.fare => Some("fare does not match the seat"),
            Some(_) if refund.pcd != seat.is_pcd() => Some("PCD flag does not match the seat"),
            Some(fare) if refund.amount != fare.price() => Some("amount does not match the fare"),
            Some(_) => None,
        }
    }

    /// Applies an event to state
    ///
    /// Events that do not fit the current seat (a replayed reservation of an
    /// occupied seat, a full fare on a PCD seat, a price or refund that
    /// disagrees with the fare, a cancellation of a free seat) are ignored so
    /// the grid keeps its rules and the ledger never drifts from it.
    pub fn apply_event(state: &mut TheaterState, action: &TheaterAction) {
        match action {
            TheaterAction::SeatReserved(reservation) => {
                let seat = *state.grid.seat(reservation.seat);
                if let Some(reason) = Self::reservation_conflict(&seat, reservation) {
                    tracing::warn!(seat = %reservation.seat, reason, "Ignoring reservation event");
                    return;
                }
                state.grid.set_occupied(reservation.seat, reservation.fare);
                state
                    .ledger
                    .record_reservation(reservation.fare, seat.is_pcd());
                state.last_error = None;
            }
            TheaterAction::ReservationCancelled(refund) => {
                let seat = *state.grid.seat(refund.seat);
                if let Some(reason) = Self::cancellation_conflict(&seat, refund) {
                    tracing::warn!(seat = %refund.seat, reason, "Ignoring cancellation event");
                    return;
                }
                state.grid.set_free(refund.seat);
                state.ledger.record_cancellation(refund.fare, seat.is_pcd());
                state.last_error = None;
            }
            TheaterAction::TheaterReset { .. } => {
                state.grid.initialize();
                state.ledger.reset();
                state.last_error = None;
            }
            TheaterAction::ReservationRejected { error } => {
                state.last_error = Some(error.clone());
            }
            // Commands are not applied to state
            TheaterAction::ReserveSeat { .. }
            | TheaterAction::CancelReservation { .. }
            | TheaterAction::ResetTheater => {}
        }
    }
}

impl Reducer for TheaterReducer {
    type State = TheaterState;
    type Action = TheaterAction;
    type Environment = TheaterEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Self::Action; 4]> {
        match action {
            // ========== Commands ==========
            TheaterAction::ReserveSeat { row, column, fare } => {
                let event = match self.reserve(state, row, column, fare, env) {
                    Ok(reservation) => TheaterAction::SeatReserved(reservation),
                    Err(error) => TheaterAction::ReservationRejected { error },
                };
                smallvec![event]
            }

            TheaterAction::CancelReservation { row, column } => {
                let event = match self.cancel(state, row, column, env) {
                    Ok(refund) => TheaterAction::ReservationCancelled(refund),
                    Err(error) => TheaterAction::ReservationRejected { error },
                };
                smallvec![event]
            }

            TheaterAction::ResetTheater => {
                smallvec![TheaterAction::TheaterReset {
                    reset_at: self.reset(state, env),
                }]
            }

            // ========== Events ==========
            TheaterAction::SeatReserved(_)
            | TheaterAction::ReservationCancelled(_)
            | TheaterAction::TheaterReset { .. }
            | TheaterAction::ReservationRejected { .. } => {
                // Replayed events are applied without emitting anything
                Self::apply_event(state, &action);
                SmallVec::new()
            }
        }
    }
}
