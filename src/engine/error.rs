//! Error taxonomy for the allocation engine.
//!
//! [`AllocationError`] is the recoverable, caller-facing rejection of a
//! booking attempt. [`EngineError`] wraps it together with infrastructure
//! failures from the store; the two are never conflated — a caller can always
//! tell a rejected allocation from a failing store.

use crate::db::repository::RepositoryError;
use crate::models::TrainId;

/// Which neighbor's maintenance gap was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapSide {
    /// Gap to the immediately preceding booking is too small.
    Before,
    /// Gap to the immediately following booking is too small.
    After,
}

/// A rejected allocation attempt. Never retried by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// Another active booking overlaps the requested interval.
    #[error("track {track_number} is already occupied for the requested interval")]
    TrackOccupied { track_number: i32 },

    /// A neighboring booking sits closer than the 20-minute maintenance window.
    #[error("maintenance window violation: at least 20 minutes required {}", match .side {
        GapSide::Before => "after the previous booking",
        GapSide::After => "before the next booking",
    })]
    MaintenanceWindowViolation { side: GapSide },

    /// Arrival does not lie strictly after departure.
    #[error("arrival time must be later than departure time")]
    InvalidDuration,

    /// The referenced train does not exist.
    #[error("train {0} not found")]
    TrainNotFound(TrainId),
}

impl AllocationError {
    /// Whether the slot finder's suggestions accompany this rejection.
    ///
    /// Only interval conflicts get alternatives; duration and lookup failures
    /// are plain 400-class rejections.
    pub fn wants_alternatives(&self) -> bool {
        matches!(
            self,
            AllocationError::TrackOccupied { .. }
                | AllocationError::MaintenanceWindowViolation { .. }
        )
    }
}

/// Engine operation outcome: a rejection or a store failure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Rejected(#[from] AllocationError),

    #[error(transparent)]
    Store(#[from] RepositoryError),
}
