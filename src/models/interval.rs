//! Time interval arithmetic for track bookings.
//!
//! A booking occupies the span from its departure to its arrival on a single
//! track. Two bookings conflict when their spans are not disjoint under
//! inclusive boundary comparison; a shared boundary instant therefore counts
//! as occupied, and even fully disjoint neighbors must additionally respect
//! the maintenance window enforced by the conflict checker.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Minimum gap required between consecutive bookings on the same track.
pub const MAINTENANCE_WINDOW_MINUTES: i64 = 20;

/// The maintenance window as a `chrono::Duration`.
pub fn maintenance_window() -> Duration {
    Duration::minutes(MAINTENANCE_WINDOW_MINUTES)
}

/// A departure/arrival time span on a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(departure: DateTime<Utc>, arrival: DateTime<Utc>) -> Self {
        Self { departure, arrival }
    }

    /// Signed length of the interval. Negative for inverted intervals.
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }

    /// Inclusive-boundary overlap test.
    ///
    /// Mirrors the occupancy query's three-way disjunction: the other interval
    /// brackets our departure, brackets our arrival, or lies fully inside us.
    /// All three collapse to `d1 <= a2 && d2 <= a1`.
    pub fn conflicts_with(&self, other: &TimeInterval) -> bool {
        self.departure <= other.arrival && other.departure <= self.arrival
    }

    /// Gap between the end of `self` and the start of `other`.
    ///
    /// Negative when `other` starts before `self` ends.
    pub fn gap_until(&self, other: &TimeInterval) -> Duration {
        other.departure - self.arrival
    }
}
