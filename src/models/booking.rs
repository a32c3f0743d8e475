//! Booking domain types.
//!
//! A [`Booking`] reserves a time interval for a train on a numbered track.
//! Tracks are identified by plain integers and are not first-class stored
//! entities; the repository indexes bookings by track number.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;
use super::master::{StationId, TrainId};

/// Opaque booking identifier. Absent until the booking is persisted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookingId(pub i64);

impl BookingId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the user who created a booking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Lifecycle status of a booking. Informational to the engine: the conflict
/// checker does not filter on status, only the repository's soft-delete flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Repetition rule attached to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Fixed calendar-naive step between generated instances.
    ///
    /// A monthly step is exactly 30 days, never "same day next month".
    pub fn step(&self) -> Option<Duration> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily => Some(Duration::hours(24)),
            Recurrence::Weekly => Some(Duration::days(7)),
            Recurrence::Monthly => Some(Duration::days(30)),
        }
    }
}

/// A reserved time interval for a train on a specific track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Assigned by the repository on insert.
    pub id: Option<BookingId>,
    pub train_id: TrainId,
    pub track_number: i32,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub recurrence: Recurrence,
    pub from_station: Option<StationId>,
    pub to_station: Option<StationId>,
    /// Back-reference to the originating booking for recurrence-generated
    /// instances. Set by the expander, never mutated afterward.
    pub parent_id: Option<BookingId>,
    pub created_by: Option<UserId>,
}

impl Booking {
    /// The departure/arrival span of this booking.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.departure, self.arrival)
    }
}

/// A candidate free interval suggested after a rejected allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub track_number: i32,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}
