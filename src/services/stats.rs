//! Reporting statistics over the dispatch store.

use serde::{Deserialize, Serialize};

use crate::db::repository::FullRepository;

use super::booking::{BookingServiceResult, TRACKS_AVAILABLE};

/// Aggregate counters for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchStats {
    pub total_trains: u64,
    /// Bookings with status Scheduled or InProgress.
    pub active_bookings: u64,
    /// Distinct track numbers with at least one active booking.
    pub tracks_in_use: u64,
    pub total_stations: u64,
    /// `tracks_in_use` against the fixed reporting pool of 10 tracks.
    pub occupancy_percent: f64,
}

/// Compute dashboard statistics. Purely informational; none of these values
/// feed back into allocation decisions.
pub async fn dispatch_stats(repo: &dyn FullRepository) -> BookingServiceResult<DispatchStats> {
    let total_trains = repo.count_trains().await?;
    let active_bookings = repo.count_active_bookings().await?;
    let tracks_in_use = repo.count_tracks_in_use().await?;
    let total_stations = repo.count_stations().await?;

    Ok(DispatchStats {
        total_trains,
        active_bookings,
        tracks_in_use,
        total_stations,
        occupancy_percent: tracks_in_use as f64 / TRACKS_AVAILABLE as f64 * 100.0,
    })
}

/// Verify the store is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> BookingServiceResult<bool> {
    Ok(repo.health_check().await?)
}
