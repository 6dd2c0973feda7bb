//! Domain types for the cinema room.
//!
//! Seats are addressed by a row letter (`A`..=`H`) and a column number
//! (`1`..=`12`). Coordinates are validated once, when a [`SeatId`] is built, so
//! every other API can index the grid without re-checking bounds.

use crate::error::ReservationError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Room dimensions and prices
// ============================================================================

/// Number of seat rows in the room (`A`..=`H`)
pub const ROWS: usize = 8;

/// Number of seats per row (`1`..=`12`)
pub const COLUMNS: usize = 12;

/// Total number of seats in the room
pub const SEAT_COUNT: u32 = (ROWS * COLUMNS) as u32;

/// Price of a full-fare ticket
pub const FULL_PRICE: Money = Money::from_cents(4_000);

/// Price of a half-fare ticket
pub const HALF_PRICE: Money = Money::from_cents(2_000);

const FIRST_ROW: char = 'A';

// ============================================================================
// Coordinates
// ============================================================================

/// A seat row, stored as its zero-based index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Row(u8);

impl Row {
    /// Parses a row letter. Only upper-case `A`..=`H` are accepted.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        let offset = u32::from(letter).checked_sub(u32::from(FIRST_ROW))?;
        let index = u8::try_from(offset).ok()?;
        (usize::from(index) < ROWS).then_some(Self(index))
    }

    /// Returns the row letter
    #[must_use]
    pub fn letter(self) -> char {
        char::from(b'A' + self.0)
    }

    /// Returns the zero-based row index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row `A` is reserved for accessible (PCD) seating.
    #[must_use]
    pub const fn is_pcd(self) -> bool {
        self.0 == 0
    }

    /// All rows, front to back
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROWS as u8).map(Self)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A seat column, stored as its one-based number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Column(u8);

impl Column {
    /// Validates a column number in `1..=12`
    #[must_use]
    pub fn new(number: i32) -> Option<Self> {
        let number = u8::try_from(number).ok()?;
        (1..=COLUMNS as u8).contains(&number).then_some(Self(number))
    }

    /// Returns the one-based column number
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Returns the zero-based column index
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// All columns, left to right
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=COLUMNS as u8).map(Self)
    }
}

/// Identity of a seat: a validated (row, column) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatId {
    row: Row,
    column: Column,
}

impl SeatId {
    /// Builds a seat identity from raw user coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidCoordinate`] if the row is not in
    /// `A..=H` or the column is not in `1..=12`.
    pub fn new(row: char, column: i32) -> Result<Self, ReservationError> {
        match (Row::from_letter(row), Column::new(column)) {
            (Some(row), Some(column)) => Ok(Self { row, column }),
            _ => Err(ReservationError::InvalidCoordinate { row, column }),
        }
    }

    /// Builds a seat identity from already validated parts
    #[must_use]
    pub const fn from_parts(row: Row, column: Column) -> Self {
        Self { row, column }
    }

    // Callers guarantee `row_index < ROWS` and `column_index < COLUMNS`.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn at(row_index: usize, column_index: usize) -> Self {
        Self {
            row: Row(row_index as u8),
            column: Column(column_index as u8 + 1),
        }
    }

    /// Returns the seat row
    #[must_use]
    pub const fn row(self) -> Row {
        self.row
    }

    /// Returns the seat column
    #[must_use]
    pub const fn column(self) -> Column {
        self.column
    }

    /// Whether this seat is in the accessible row
    #[must_use]
    pub const fn is_pcd(self) -> bool {
        self.row.is_pcd()
    }

    /// Every seat in the room, row-major
    pub fn all() -> impl Iterator<Item = Self> {
        Row::all().flat_map(|row| Column::all().map(move |column| Self { row, column }))
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.row.letter(), self.column.number())
    }
}

// ============================================================================
// Fares and money
// ============================================================================

/// Pricing category of an occupied seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FareType {
    /// Standard price
    Full,
    /// Discounted price (the only fare PCD seats admit)
    Half,
}

impl FareType {
    /// Parses the menu code of a fare: `1` is full, `2` is half.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidFareType`] for any other code.
    pub const fn from_code(code: u8) -> Result<Self, ReservationError> {
        match code {
            1 => Ok(Self::Full),
            2 => Ok(Self::Half),
            other => Err(ReservationError::InvalidFareType(other)),
        }
    }

    /// Returns the menu code of this fare
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Full => 1,
            Self::Half => 2,
        }
    }

    /// Ticket price for this fare
    #[must_use]
    pub const fn price(self) -> Money {
        match self {
            Self::Full => FULL_PRICE,
            Self::Half => HALF_PRICE,
        }
    }

    /// Whether this is the discounted fare
    #[must_use]
    pub const fn is_half(self) -> bool {
        matches!(self, Self::Half)
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Half => "Half",
        }
    }
}

impl fmt::Display for FareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Money amount in cents (avoids floating point issues)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(u64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a new `Money` amount from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Checks if this amount is zero
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, saturating at the numeric bound
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts two amounts, saturating at zero
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Multiplies a unit price by a ticket count
    #[must_use]
    pub fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(count)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Seat
// ============================================================================

/// A single seat of the room.
///
/// The fare is only present while the seat is occupied, so a free seat can
/// never carry a half-fare flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    id: SeatId,
    fare: Option<FareType>,
    pcd: bool,
}

impl Seat {
    /// Creates a free seat. PCD designation follows the row.
    #[must_use]
    pub const fn new(id: SeatId) -> Self {
        Self {
            id,
            fare: None,
            pcd: id.is_pcd(),
        }
    }

    /// Returns the seat identity
    #[must_use]
    pub const fn id(&self) -> SeatId {
        self.id
    }

    /// Returns the fare of the current reservation, if any
    #[must_use]
    pub const fn fare(&self) -> Option<FareType> {
        self.fare
    }

    /// Whether the seat is reserved
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.fare.is_some()
    }

    /// Whether the seat is reserved at half fare
    #[must_use]
    pub const fn is_half_fare(&self) -> bool {
        matches!(self.fare, Some(FareType::Half))
    }

    /// Whether the seat is designated for accessible seating
    #[must_use]
    pub const fn is_pcd(&self) -> bool {
        self.pcd
    }

    pub(crate) fn occupy(&mut self, fare: FareType) {
        self.fare = Some(fare);
    }

    pub(crate) fn vacate(&mut self) {
        self.fare = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_letters() {
        assert_eq!(Row::from_letter('A').map(Row::index), Some(0));
        assert_eq!(Row::from_letter('H').map(Row::index), Some(7));
        assert_eq!(Row::from_letter('I'), None);
        assert_eq!(Row::from_letter('a'), None);
        assert_eq!(Row::from_letter('@'), None);
        assert_eq!(Row::all().map(Row::letter).collect::<String>(), "ABCDEFGH");
    }

    #[test]
    fn test_column_bounds() {
        assert!(Column::new(0).is_none());
        assert!(Column::new(-1).is_none());
        assert!(Column::new(13).is_none());
        assert_eq!(Column::new(1).map(Column::index), Some(0));
        assert_eq!(Column::new(12).map(Column::number), Some(12));
    }

    #[test]
    fn test_seat_id_display() {
        let seat = SeatId::new('C', 5).unwrap();
        assert_eq!(seat.to_string(), "C05");
        assert_eq!(SeatId::new('H', 12).unwrap().to_string(), "H12");
    }

    #[test]
    fn test_seat_id_rejects_invalid_coordinates() {
        assert_eq!(
            SeatId::new('Z', 1),
            Err(ReservationError::InvalidCoordinate { row: 'Z', column: 1 })
        );
        assert_eq!(
            SeatId::new('D', 13),
            Err(ReservationError::InvalidCoordinate { row: 'D', column: 13 })
        );
    }

    #[test]
    fn test_all_seat_ids_are_row_major() {
        let ids: Vec<SeatId> = SeatId::all().collect();
        assert_eq!(ids.len(), SEAT_COUNT as usize);
        assert_eq!(ids[0].to_string(), "A01");
        assert_eq!(ids[12].to_string(), "B01");
        assert_eq!(ids[95].to_string(), "H12");
    }

    #[test]
    fn test_fare_codes() {
        assert_eq!(FareType::from_code(1), Ok(FareType::Full));
        assert_eq!(FareType::from_code(2), Ok(FareType::Half));
        assert_eq!(
            FareType::from_code(3),
            Err(ReservationError::InvalidFareType(3))
        );
        assert_eq!(FareType::Half.price(), HALF_PRICE);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(FULL_PRICE.to_string(), "40.00");
        assert_eq!(Money::from_cents(105).to_string(), "1.05");
        assert_eq!(HALF_PRICE.times(3), Money::from_cents(6_000));
        assert_eq!(Money::ZERO.saturating_sub(FULL_PRICE), Money::ZERO);
    }

    #[test]
    fn test_seat_pcd_follows_row() {
        let front = Seat::new(SeatId::new('A', 3).unwrap());
        let back = Seat::new(SeatId::new('B', 3).unwrap());
        assert!(front.is_pcd());
        assert!(!back.is_pcd());
        assert!(!front.is_occupied());
        assert!(!front.is_half_fare());
    }
}
