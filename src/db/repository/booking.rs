//! Booking store trait: the abstract interface the allocation engine is
//! written against.
//!
//! "Active" throughout means not soft-deleted. Cancelled bookings are active
//! by this definition and still participate in conflict queries; only removal
//! filters a booking out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::{Booking, BookingId, TimeInterval};

/// Repository trait for booking storage and the targeted queries the
/// conflict checker and slot finder run.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    // ==================== Mutations ====================

    /// Insert a new booking, assigning its ID.
    async fn insert_booking(&self, booking: Booking) -> RepositoryResult<Booking>;

    /// Persist changes to an existing booking.
    ///
    /// # Returns
    /// * `Ok(Booking)` - The stored booking
    /// * `Err(RepositoryError::NotFound)` - If the booking does not exist
    async fn save_booking(&self, booking: Booking) -> RepositoryResult<Booking>;

    /// Soft-delete a booking. Removed bookings disappear from all active
    /// queries but remain in the store.
    ///
    /// # Returns
    /// * `Ok(true)` - If a booking was removed
    /// * `Ok(false)` - If no active booking had this ID
    async fn remove_booking(&self, id: BookingId) -> RepositoryResult<bool>;

    // ==================== Lookups ====================

    /// Fetch one active booking by ID.
    async fn get_booking(&self, id: BookingId) -> RepositoryResult<Option<Booking>>;

    /// List all active bookings, in insertion order.
    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>>;

    /// List active bookings on a track ordered by ascending departure.
    async fn list_on_track(&self, track_number: i32) -> RepositoryResult<Vec<Booking>>;

    // ==================== Allocation queries ====================

    /// Find any active booking on the track whose span overlaps `interval`
    /// under inclusive boundary comparison, excluding `exclude`.
    async fn find_overlapping(
        &self,
        track_number: i32,
        interval: TimeInterval,
        exclude: Option<BookingId>,
    ) -> RepositoryResult<Option<Booking>>;

    /// Find the active booking on the track with the greatest arrival such
    /// that `arrival <= departure`, excluding `exclude`.
    async fn find_nearest_before(
        &self,
        track_number: i32,
        departure: DateTime<Utc>,
        exclude: Option<BookingId>,
    ) -> RepositoryResult<Option<Booking>>;

    /// Find the active booking on the track with the smallest departure such
    /// that `departure >= arrival`, excluding `exclude`.
    async fn find_nearest_after(
        &self,
        track_number: i32,
        arrival: DateTime<Utc>,
        exclude: Option<BookingId>,
    ) -> RepositoryResult<Option<Booking>>;

    // ==================== Reporting ====================

    /// Count active bookings with status Scheduled or InProgress.
    async fn count_active_bookings(&self) -> RepositoryResult<u64>;

    /// Count distinct track numbers with at least one active booking.
    async fn count_tracks_in_use(&self) -> RepositoryResult<u64>;
}
