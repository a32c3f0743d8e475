//! Conflict checker: decides whether a candidate booking may occupy its
//! requested interval.
//!
//! Three read-only queries against the booking store, in order:
//!
//! 1. Any overlapping active booking on the track → [`AllocationError::TrackOccupied`].
//! 2. Nearest preceding booking closer than the maintenance window →
//!    [`AllocationError::MaintenanceWindowViolation`] (before).
//! 3. Nearest following booking closer than the maintenance window →
//!    [`AllocationError::MaintenanceWindowViolation`] (after).
//!
//! The result depends only on the store contents and the candidate; the
//! checker holds no state and performs no writes. Serialization of
//! check-then-insert against concurrent writers is the service layer's job
//! (see `crate::services::locks`).

use crate::db::repository::BookingRepository;
use crate::engine::error::{AllocationError, EngineError, GapSide};
use crate::models::{maintenance_window, Booking, BookingId};

/// Stateless conflict checking service. Construct once, share by reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictChecker;

impl ConflictChecker {
    pub fn new() -> Self {
        Self
    }

    /// Validate `candidate` against the bookings currently on its track.
    ///
    /// `exclude` is the candidate's own ID on update, so a booking never
    /// conflicts with itself.
    pub async fn check(
        &self,
        repo: &dyn BookingRepository,
        candidate: &Booking,
        exclude: Option<BookingId>,
    ) -> Result<(), EngineError> {
        let interval = candidate.interval();

        if let Some(occupant) = repo
            .find_overlapping(candidate.track_number, interval, exclude)
            .await?
        {
            tracing::debug!(
                track = candidate.track_number,
                occupant = ?occupant.id,
                "candidate interval overlaps an existing booking"
            );
            return Err(AllocationError::TrackOccupied {
                track_number: candidate.track_number,
            }
            .into());
        }

        let window = maintenance_window();

        if let Some(before) = repo
            .find_nearest_before(candidate.track_number, candidate.departure, exclude)
            .await?
        {
            if candidate.departure - before.arrival < window {
                return Err(AllocationError::MaintenanceWindowViolation {
                    side: GapSide::Before,
                }
                .into());
            }
        }

        if let Some(after) = repo
            .find_nearest_after(candidate.track_number, candidate.arrival, exclude)
            .await?
        {
            if after.departure - candidate.arrival < window {
                return Err(AllocationError::MaintenanceWindowViolation {
                    side: GapSide::After,
                }
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "conflict_tests.rs"]
mod tests;
