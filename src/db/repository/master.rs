//! Master data repository trait for trains and stations.
//!
//! Master data is plumbing around the engine: the physics check looks trains
//! up by ID, bookings reference stations, and the repository enforces the
//! simple uniqueness rules (train number, station name/code).

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Station, StationId, Train, TrainId};

/// Repository trait for train and station master data.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait MasterDataRepository: Send + Sync {
    /// Insert a new train, assigning its ID.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ValidationError)` - If the train number is taken
    async fn insert_train(&self, train: Train) -> RepositoryResult<Train>;

    /// Fetch a train by ID.
    async fn get_train(&self, id: TrainId) -> RepositoryResult<Option<Train>>;

    /// List all trains.
    async fn list_trains(&self) -> RepositoryResult<Vec<Train>>;

    /// Count all trains.
    async fn count_trains(&self) -> RepositoryResult<u64>;

    /// Insert a new station, assigning its ID.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ValidationError)` - If the name or code is taken
    async fn insert_station(&self, station: Station) -> RepositoryResult<Station>;

    /// Fetch a station by ID.
    async fn get_station(&self, id: StationId) -> RepositoryResult<Option<Station>>;

    /// List all stations.
    async fn list_stations(&self) -> RepositoryResult<Vec<Station>>;

    /// Count all stations.
    async fn count_stations(&self) -> RepositoryResult<u64>;
}
