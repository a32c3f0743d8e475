//! Booking lifecycle orchestration.
//!
//! This is the validate-then-store protocol around the engine: a booking
//! request passes the conflict checker and the physics check under the
//! track's exclusive lock, is persisted, and — if it carries a recurrence
//! rule — is expanded into future instances. Rejections from the conflict
//! checker come back with the slot finder's suggestions attached.
//!
//! Successful mutations are reported to the audit log; an audit failure is
//! logged and never fails the mutation it describes.

use chrono::{DateTime, Duration, Utc};

use crate::db::repository::{FullRepository, RepositoryError};
use crate::engine::{
    expand, AllocationError, ConflictChecker, EngineError, PhysicsValidator, SlotFinder,
};
use crate::models::{
    AuditAction, AuditEntity, AuditRecord, Booking, BookingId, BookingStatus, Recurrence,
    StationId, TimeSlot, TrainId, UserId,
};

use super::locks::TrackLocks;

/// Fixed pool size used for the occupancy statistic. Reporting only; the
/// engine enforces no upper bound on track numbers.
pub const TRACKS_AVAILABLE: u64 = 10;

/// Cap on recurrence instances generated per request. Requests asking for
/// more are clamped, not rejected.
pub const MAX_RECUR_INSTANCES: i32 = 100;

// Stateless validators shared by every request.
const CONFLICT: ConflictChecker = ConflictChecker;
const PHYSICS: PhysicsValidator = PhysicsValidator;
const SLOTS: SlotFinder = SlotFinder;

/// Error type for booking service operations.
#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    /// The allocation was rejected. `alternatives` is non-empty only for
    /// interval conflicts, where the slot finder's suggestions accompany
    /// the rejection.
    #[error("{reason}")]
    Rejected {
        reason: AllocationError,
        alternatives: Vec<TimeSlot>,
    },

    #[error("booking {0} not found")]
    NotFound(BookingId),

    /// Store failure. Never conflated with a rejection; retry policy
    /// belongs to the caller.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for booking service operations.
pub type BookingServiceResult<T> = Result<T, BookingServiceError>;

/// Input for creating or updating a booking.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub train_id: TrainId,
    pub track_number: i32,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub status: Option<BookingStatus>,
    pub recurrence: Option<Recurrence>,
    pub from_station: Option<StationId>,
    pub to_station: Option<StationId>,
    /// Number of recurrence instances to generate on create.
    pub recur_count: i32,
}

/// A stored booking together with the recurrence instances generated for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedBooking {
    pub booking: Booking,
    pub generated: Vec<Booking>,
}

/// Create a booking from a draft, stamped with the caller's identity.
///
/// Holds the track lock from the conflict check through the last insert so
/// concurrent requests for the same track serialize instead of racing.
pub async fn create_booking(
    repo: &dyn FullRepository,
    locks: &TrackLocks,
    draft: BookingDraft,
    actor: Option<UserId>,
) -> BookingServiceResult<CreatedBooking> {
    let candidate = Booking {
        id: None,
        train_id: draft.train_id,
        track_number: draft.track_number,
        departure: draft.departure,
        arrival: draft.arrival,
        status: draft.status.unwrap_or_default(),
        recurrence: draft.recurrence.unwrap_or_default(),
        from_station: draft.from_station,
        to_station: draft.to_station,
        parent_id: None,
        created_by: actor,
    };

    let _guard = locks.acquire(candidate.track_number).await;

    validate(repo, &candidate, None).await?;

    let booking = repo.insert_booking(candidate).await?;
    tracing::info!(
        booking = ?booking.id,
        track = booking.track_number,
        "booking created"
    );

    // Generated instances bypass the conflict checker by design; each insert
    // is independent and earlier instances survive a later failure.
    let mut generated = Vec::new();
    if booking.recurrence != Recurrence::None && draft.recur_count > 0 {
        let count = draft.recur_count.min(MAX_RECUR_INSTANCES);
        for instance in expand(&booking, count) {
            match repo.insert_booking(instance).await {
                Ok(stored) => generated.push(stored),
                Err(err) => {
                    tracing::warn!(
                        parent = ?booking.id,
                        error = %err,
                        "failed to persist recurrence instance"
                    );
                }
            }
        }
    }

    drop(_guard);

    audit_mutation(
        repo,
        actor,
        AuditAction::Create,
        &booking,
        String::new(),
        AuditRecord::snapshot(&booking),
    )
    .await;

    Ok(CreatedBooking { booking, generated })
}

/// Re-validate and store new fields for an existing booking.
///
/// The booking is excluded from conflict comparison against itself. Status
/// and recurrence are only overwritten when the draft provides them.
pub async fn update_booking(
    repo: &dyn FullRepository,
    locks: &TrackLocks,
    id: BookingId,
    draft: BookingDraft,
    actor: Option<UserId>,
) -> BookingServiceResult<Booking> {
    let existing = repo
        .get_booking(id)
        .await?
        .ok_or(BookingServiceError::NotFound(id))?;

    let mut updated = existing.clone();
    updated.train_id = draft.train_id;
    updated.track_number = draft.track_number;
    updated.departure = draft.departure;
    updated.arrival = draft.arrival;
    updated.from_station = draft.from_station;
    updated.to_station = draft.to_station;
    if let Some(status) = draft.status {
        updated.status = status;
    }
    if let Some(recurrence) = draft.recurrence {
        updated.recurrence = recurrence;
    }

    let _guard = locks.acquire(updated.track_number).await;

    validate(repo, &updated, Some(id)).await?;

    let stored = repo.save_booking(updated).await?;
    drop(_guard);

    audit_mutation(
        repo,
        actor,
        AuditAction::Update,
        &stored,
        AuditRecord::snapshot(&existing),
        AuditRecord::snapshot(&stored),
    )
    .await;

    Ok(stored)
}

/// Soft-delete a booking. No revalidation: removal only frees capacity.
pub async fn delete_booking(
    repo: &dyn FullRepository,
    id: BookingId,
    actor: Option<UserId>,
) -> BookingServiceResult<Booking> {
    let existing = repo
        .get_booking(id)
        .await?
        .ok_or(BookingServiceError::NotFound(id))?;

    repo.remove_booking(id).await?;

    audit_mutation(
        repo,
        actor,
        AuditAction::Delete,
        &existing,
        AuditRecord::snapshot(&existing),
        String::new(),
    )
    .await;

    Ok(existing)
}

/// Fetch one booking.
pub async fn get_booking(
    repo: &dyn FullRepository,
    id: BookingId,
) -> BookingServiceResult<Booking> {
    repo.get_booking(id)
        .await?
        .ok_or(BookingServiceError::NotFound(id))
}

/// List all active bookings.
pub async fn list_bookings(repo: &dyn FullRepository) -> BookingServiceResult<Vec<Booking>> {
    Ok(repo.list_bookings().await?)
}

/// Enumerate free slots on a track; the slot finder's direct surface.
pub async fn find_free_slots(
    repo: &dyn FullRepository,
    track_number: i32,
    duration: Duration,
    near_time: DateTime<Utc>,
) -> BookingServiceResult<Vec<TimeSlot>> {
    match SLOTS
        .find_alternatives(repo, track_number, duration, near_time)
        .await
    {
        Ok(slots) => Ok(slots),
        Err(EngineError::Store(err)) => Err(err.into()),
        // The slot finder rejects nothing.
        Err(EngineError::Rejected(err)) => Err(BookingServiceError::Rejected {
            reason: err,
            alternatives: Vec::new(),
        }),
    }
}

/// Run the conflict checker and physics check, attaching alternatives to
/// interval rejections.
async fn validate(
    repo: &dyn FullRepository,
    candidate: &Booking,
    exclude: Option<BookingId>,
) -> BookingServiceResult<()> {
    if let Err(err) = CONFLICT.check(repo, candidate, exclude).await {
        return Err(into_service_error(repo, candidate, err).await);
    }
    if let Err(err) = PHYSICS.validate(repo, candidate).await {
        return Err(into_service_error(repo, candidate, err).await);
    }
    Ok(())
}

async fn into_service_error(
    repo: &dyn FullRepository,
    candidate: &Booking,
    err: EngineError,
) -> BookingServiceError {
    match err {
        EngineError::Rejected(reason) => {
            let alternatives = if reason.wants_alternatives() {
                suggest_alternatives(repo, candidate).await
            } else {
                Vec::new()
            };
            BookingServiceError::Rejected {
                reason,
                alternatives,
            }
        }
        EngineError::Store(err) => BookingServiceError::Repository(err),
    }
}

/// Best-effort slot suggestions for a rejected candidate. A store failure
/// here degrades to an empty list rather than masking the rejection.
async fn suggest_alternatives(repo: &dyn FullRepository, candidate: &Booking) -> Vec<TimeSlot> {
    let duration = candidate.arrival - candidate.departure;
    match SLOTS
        .find_alternatives(repo, candidate.track_number, duration, candidate.departure)
        .await
    {
        Ok(slots) => slots,
        Err(err) => {
            tracing::warn!(
                track = candidate.track_number,
                error = %err,
                "failed to compute alternative slots"
            );
            Vec::new()
        }
    }
}

async fn audit_mutation(
    repo: &dyn FullRepository,
    actor: Option<UserId>,
    action: AuditAction,
    booking: &Booking,
    old_value: String,
    new_value: String,
) {
    let entity_id = booking.id.map(|id| id.value()).unwrap_or_default();
    let record = AuditRecord::new(
        actor,
        action,
        AuditEntity::Booking,
        entity_id,
        old_value,
        new_value,
    );
    if let Err(err) = repo.record_audit(record).await {
        tracing::warn!(error = %err, "failed to record audit entry");
    }
}

#[cfg(test)]
#[path = "booking_tests.rs"]
mod tests;
