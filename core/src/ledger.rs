//! Running totals kept in lockstep with the seat grid.

use crate::grid::SeatGrid;
use crate::types::{FareType, Money};
use serde::{Deserialize, Serialize};

/// Aggregate counters and revenue derived from seat occupancy.
///
/// Updated incrementally on every reservation and cancellation so reports are
/// O(1). [`ReservationLedger::from_grid`] recomputes the same values by
/// scanning, and the two must always agree:
///
/// - `total_clients == full_fare_count + half_fare_count`
/// - `total_revenue == full_fare_count * FULL_PRICE + half_fare_count * HALF_PRICE`
/// - `pcd_count` equals the number of occupied PCD seats
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationLedger {
    total_clients: u32,
    full_fare_count: u32,
    half_fare_count: u32,
    pcd_count: u32,
    total_revenue: Money,
}

impl ReservationLedger {
    /// Creates an empty ledger
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_clients: 0,
            full_fare_count: 0,
            half_fare_count: 0,
            pcd_count: 0,
            total_revenue: Money::ZERO,
        }
    }

    /// Recomputes the ledger by scanning every seat of the grid
    #[must_use]
    pub fn from_grid(grid: &SeatGrid) -> Self {
        grid.seats().fold(Self::new(), |mut ledger, seat| {
            if let Some(fare) = seat.fare() {
                ledger.record_reservation(fare, seat.is_pcd());
            }
            ledger
        })
    }

    /// Accounts for one new reservation
    pub fn record_reservation(&mut self, fare: FareType, is_pcd: bool) {
        self.total_clients += 1;
        match fare {
            FareType::Full => self.full_fare_count += 1,
            FareType::Half => self.half_fare_count += 1,
        }
        if is_pcd {
            self.pcd_count += 1;
        }
        self.total_revenue = self.total_revenue.saturating_add(fare.price());
    }

    /// Accounts for one cancelled reservation
    ///
    /// Cancelling something that was never recorded is a drift between the
    /// ledger and the grid; debug builds panic on it.
    pub fn record_cancellation(&mut self, fare: FareType, is_pcd: bool) {
        let fare_count = match fare {
            FareType::Full => self.full_fare_count,
            FareType::Half => self.half_fare_count,
        };
        debug_assert!(
            self.total_clients > 0 && fare_count > 0 && (!is_pcd || self.pcd_count > 0),
            "cancellation without a matching {fare} reservation"
        );
        self.total_clients = self.total_clients.saturating_sub(1);
        match fare {
            FareType::Full => self.full_fare_count = self.full_fare_count.saturating_sub(1),
            FareType::Half => self.half_fare_count = self.half_fare_count.saturating_sub(1),
        }
        if is_pcd {
            self.pcd_count = self.pcd_count.saturating_sub(1);
        }
        self.total_revenue = self.total_revenue.saturating_sub(fare.price());
    }

    /// Zeroes every counter
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of occupied seats
    #[must_use]
    pub const fn total_clients(&self) -> u32 {
        self.total_clients
    }

    /// Number of full-fare reservations
    #[must_use]
    pub const fn full_fare_count(&self) -> u32 {
        self.full_fare_count
    }

    /// Number of half-fare reservations
    #[must_use]
    pub const fn half_fare_count(&self) -> u32 {
        self.half_fare_count
    }

    /// Number of occupied PCD seats
    #[must_use]
    pub const fn pcd_count(&self) -> u32 {
        self.pcd_count
    }

    /// Sum of all ticket prices
    #[must_use]
    pub const fn total_revenue(&self) -> Money {
        self.total_revenue
    }
}
