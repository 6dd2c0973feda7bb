//! Read-only reports over the theater state.

use crate::theater::TheaterState;
use crate::types::{FareType, Money, SEAT_COUNT, SeatId};
use serde::{Deserialize, Serialize};

/// Width of a full bar in the occupancy chart
pub const BAR_SCALE: u32 = 50;

/// Totals shown by the simple report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Occupied seats
    pub total_clients: u32,
    /// Full-fare reservations
    pub full_fare_count: u32,
    /// Half-fare reservations
    pub half_fare_count: u32,
    /// Occupied PCD seats
    pub pcd_count: u32,
    /// Revenue from full-fare tickets
    pub full_fare_revenue: Money,
    /// Revenue from half-fare tickets
    pub half_fare_revenue: Money,
    /// Total revenue
    pub total_revenue: Money,
    /// Seats still available
    pub free_seats: u32,
    /// Occupied seats as a percentage of the room
    pub occupancy_percent: f64,
}

/// One line of the detailed report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatDescriptor {
    /// Occupied seat
    pub seat: SeatId,
    /// Fare it was sold at
    pub fare: FareType,
    /// Whether it is a PCD seat
    pub pcd: bool,
}

/// A single bar of the occupancy chart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Seats counted by this bar
    pub count: u32,
    /// Bar length in characters
    pub length: u32,
}

impl Bar {
    fn new(count: u32, scale: u32) -> Self {
        let length = u64::from(count) * u64::from(scale) / u64::from(SEAT_COUNT);
        Self {
            count,
            length: u32::try_from(length).unwrap_or(u32::MAX),
        }
    }
}

/// Bar lengths for the occupancy chart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChart {
    /// Length of a bar covering the whole room
    pub scale: u32,
    /// Occupied seats
    pub occupied: Bar,
    /// Free seats
    pub free: Bar,
    /// Full-fare reservations
    pub full_fare: Bar,
    /// Half-fare reservations
    pub half_fare: Bar,
    /// Occupied PCD seats
    pub pcd: Bar,
}

/// Read-only views over a [`TheaterState`]. Never mutates.
#[derive(Clone, Copy, Debug)]
pub struct ReportEngine<'a> {
    state: &'a TheaterState,
}

impl<'a> ReportEngine<'a> {
    /// Creates a report engine over the given state
    #[must_use]
    pub const fn new(state: &'a TheaterState) -> Self {
        Self { state }
    }

    /// Totals, revenue and occupancy
    #[must_use]
    pub fn summary(&self) -> Summary {
        let ledger = self.state.ledger();
        let total_clients = ledger.total_clients();
        Summary {
            total_clients,
            full_fare_count: ledger.full_fare_count(),
            half_fare_count: ledger.half_fare_count(),
            pcd_count: ledger.pcd_count(),
            full_fare_revenue: FareType::Full.price().times(ledger.full_fare_count()),
            half_fare_revenue: FareType::Half.price().times(ledger.half_fare_count()),
            total_revenue: ledger.total_revenue(),
            free_seats: SEAT_COUNT.saturating_sub(total_clients),
            occupancy_percent: f64::from(total_clients) / f64::from(SEAT_COUNT) * 100.0,
        }
    }

    /// Occupied seats in row-major order.
    ///
    /// The iterator rescans the grid; calling this again starts over.
    pub fn itemized_occupied(&self) -> impl Iterator<Item = SeatDescriptor> + 'a {
        self.state.grid().seats().filter_map(|seat| {
            seat.fare().map(|fare| SeatDescriptor {
                seat: seat.id(),
                fare,
                pcd: seat.is_pcd(),
            })
        })
    }

    /// Chart data on the default 50-character scale
    #[must_use]
    pub fn bar_chart(&self) -> BarChart {
        self.bar_chart_with_scale(BAR_SCALE)
    }

    /// Chart data on a custom scale.
    ///
    /// Each length is `count * scale / 96` with truncating division, so the
    /// occupied and free bars may sum to less than `scale`.
    #[must_use]
    pub fn bar_chart_with_scale(&self, scale: u32) -> BarChart {
        let ledger = self.state.ledger();
        let occupied = ledger.total_clients();
        BarChart {
            scale,
            occupied: Bar::new(occupied, scale),
            free: Bar::new(SEAT_COUNT.saturating_sub(occupied), scale),
            full_fare: Bar::new(ledger.full_fare_count(), scale),
            half_fare: Bar::new(ledger.half_fare_count(), scale),
            pcd: Bar::new(ledger.pcd_count(), scale),
        }
    }
}
