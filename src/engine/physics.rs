//! Travel "physics" check.
//!
//! Despite the name, this currently guards only the sign of the travel
//! duration; it is the placeholder where feasibility against train speed,
//! wagon count and inter-station distance would go. It runs only for
//! bookings that reference stations, and it verifies the referenced train
//! exists before looking at the interval.

use chrono::Duration;

use crate::db::repository::MasterDataRepository;
use crate::engine::error::{AllocationError, EngineError};
use crate::models::Booking;

/// Stateless duration sanity check. Construct once, share by reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicsValidator;

impl PhysicsValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate the candidate's travel duration.
    ///
    /// Skipped entirely when the booking references no stations. Otherwise
    /// the train must exist and `arrival` must lie strictly after
    /// `departure`.
    pub async fn validate(
        &self,
        repo: &dyn MasterDataRepository,
        booking: &Booking,
    ) -> Result<(), EngineError> {
        if booking.from_station.is_none() && booking.to_station.is_none() {
            return Ok(());
        }

        if repo.get_train(booking.train_id).await?.is_none() {
            return Err(AllocationError::TrainNotFound(booking.train_id).into());
        }

        if booking.interval().duration() <= Duration::zero() {
            return Err(AllocationError::InvalidDuration.into());
        }

        Ok(())
    }
}
