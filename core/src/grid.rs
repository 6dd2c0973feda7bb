//! The fixed 8×12 seat matrix.
//!
//! `SeatGrid` only flips seat flags. Business rules (occupancy checks, PCD
//! fares) live in the reducer, which is the only caller of the mutators.

use crate::error::ReservationError;
use crate::types::{COLUMNS, Column, FareType, ROWS, Row, Seat, SeatId};

/// Matrix of every seat in the room, indexed by row then column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatGrid {
    seats: [[Seat; COLUMNS]; ROWS],
}

impl SeatGrid {
    /// Creates a grid with every seat free
    #[must_use]
    pub fn new() -> Self {
        Self {
            seats: fresh_seats(),
        }
    }

    /// Resets every seat to free. PCD designation is restored from the row.
    pub fn initialize(&mut self) {
        self.seats = fresh_seats();
    }

    /// Whether `(row, column)` addresses a seat of this room
    #[must_use]
    pub fn is_valid_coordinate(row: char, column: i32) -> bool {
        Row::from_letter(row).is_some() && Column::new(column).is_some()
    }

    /// Looks up a seat by raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::OutOfRange`] if the coordinate is outside
    /// the room.
    pub fn get(&self, row: char, column: i32) -> Result<&Seat, ReservationError> {
        let id =
            SeatId::new(row, column).map_err(|_| ReservationError::OutOfRange { row, column })?;
        Ok(self.seat(id))
    }

    /// Looks up a seat by its validated identity
    #[must_use]
    pub fn seat(&self, id: SeatId) -> &Seat {
        &self.seats[id.row().index()][id.column().index()]
    }

    fn seat_mut(&mut self, id: SeatId) -> &mut Seat {
        &mut self.seats[id.row().index()][id.column().index()]
    }

    /// Marks a seat occupied at the given fare
    pub fn set_occupied(&mut self, id: SeatId, fare: FareType) {
        self.seat_mut(id).occupy(fare);
    }

    /// Marks a seat free, clearing its fare
    pub fn set_free(&mut self, id: SeatId) {
        self.seat_mut(id).vacate();
    }

    /// Returns one row of seats, left to right
    #[must_use]
    pub fn row(&self, row: Row) -> &[Seat; COLUMNS] {
        &self.seats[row.index()]
    }

    /// Iterates every seat in row-major order
    pub fn seats(&self) -> impl Iterator<Item = &Seat> + '_ {
        self.seats.iter().flatten()
    }

    /// Counts occupied seats by scanning the grid
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // at most 96 seats
    pub fn occupied_count(&self) -> u32 {
        self.seats().filter(|seat| seat.is_occupied()).count() as u32
    }
}

impl Default for SeatGrid {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh_seats() -> [[Seat; COLUMNS]; ROWS] {
    std::array::from_fn(|row| std::array::from_fn(|column| Seat::new(SeatId::at(row, column))))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::SEAT_COUNT;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = SeatGrid::new();
        assert_eq!(grid.seats().count(), SEAT_COUNT as usize);
        assert_eq!(grid.occupied_count(), 0);
        assert!(grid.seats().all(|seat| !seat.is_occupied() && !seat.is_half_fare()));
    }

    #[test]
    fn test_pcd_is_row_a_only() {
        let grid = SeatGrid::new();
        for seat in grid.seats() {
            assert_eq!(seat.is_pcd(), seat.id().row().letter() == 'A', "{}", seat.id());
        }
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(SeatGrid::is_valid_coordinate('A', 1));
        assert!(SeatGrid::is_valid_coordinate('H', 12));
        assert!(!SeatGrid::is_valid_coordinate('I', 1));
        assert!(!SeatGrid::is_valid_coordinate('A', 0));
        assert!(!SeatGrid::is_valid_coordinate('A', 13));
    }

    #[test]
    fn test_get_rejects_out_of_range() {
        let grid = SeatGrid::new();
        assert_eq!(
            grid.get('Q', 4),
            Err(ReservationError::OutOfRange { row: 'Q', column: 4 })
        );
        assert_eq!(grid.get('B', 4).unwrap().id().to_string(), "B04");
    }

    #[test]
    fn test_set_occupied_and_free() {
        let mut grid = SeatGrid::new();
        let id = SeatId::new('E', 7).unwrap();

        grid.set_occupied(id, FareType::Half);
        assert!(grid.seat(id).is_occupied());
        assert!(grid.seat(id).is_half_fare());
        assert_eq!(grid.occupied_count(), 1);

        grid.set_free(id);
        assert!(!grid.seat(id).is_occupied());
        assert!(!grid.seat(id).is_half_fare());
        assert_eq!(grid, SeatGrid::new());
    }

    #[test]
    fn test_initialize_clears_everything() {
        let mut grid = SeatGrid::new();
        for id in SeatId::all().step_by(5) {
            grid.set_occupied(id, FareType::Full);
        }
        assert!(grid.occupied_count() > 0);

        grid.initialize();
        assert_eq!(grid, SeatGrid::new());
    }
}
