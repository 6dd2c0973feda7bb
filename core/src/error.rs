//! Error types for seat reservations.

use crate::types::SeatId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by reservation commands and seat lookups.
///
/// Every variant is recoverable: the theater state is untouched when one is
/// returned, and the caller simply retries with corrected input. Errors are
/// serializable because they travel inside `ReservationRejected` events.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationError {
    /// Row is not in `A..=H` or column is not in `1..=12`
    #[error("invalid seat {row}{column}: rows are A-H and columns 1-12")]
    InvalidCoordinate {
        /// Requested row letter
        row: char,
        /// Requested column number
        column: i32,
    },

    /// The seat already holds a reservation
    #[error("seat {0} is already occupied")]
    AlreadyOccupied(SeatId),

    /// Cancellation of a seat that holds no reservation
    #[error("seat {0} is not occupied")]
    SeatNotOccupied(SeatId),

    /// Fare code other than `1` (full) or `2` (half)
    #[error("invalid fare type {0}: expected 1 (full) or 2 (half)")]
    InvalidFareType(u8),

    /// PCD seats only admit half-fare reservations
    #[error("seat {0} is a PCD seat and only admits half fare")]
    PcdRequiresHalfFare(SeatId),

    /// Direct grid lookup outside the room
    #[error("seat {row}{column} is outside the seat grid")]
    OutOfRange {
        /// Requested row letter
        row: char,
        /// Requested column number
        column: i32,
    },
}

/// Result type for reservation operations
pub type ReservationResult<T> = Result<T, ReservationError>;
