//! Train and station master data.
//!
//! These records exist so the engine can stamp references and the physics
//! check can verify the train exists. Uniqueness of train numbers and station
//! codes is enforced by the repository with simple field checks; nothing here
//! participates in allocation decisions.

use serde::{Deserialize, Serialize};

/// Train identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TrainId(pub i64);

impl TrainId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TrainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Station identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StationId(pub i64);

impl StationId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrainType {
    #[default]
    Cargo,
    Service,
    Passenger,
}

/// A train that can be referenced by bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    pub id: Option<TrainId>,
    /// Unique train number, e.g. "IC-204".
    pub number: String,
    #[serde(default)]
    pub train_type: TrainType,
    pub wagon_count: i32,
    /// Maximum speed in km/h. Reserved for a future feasibility check.
    pub max_speed: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StationType {
    #[default]
    Regular,
    Depot,
}

/// A station that bookings may reference as origin or destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: Option<StationId>,
    /// Unique station name.
    pub name: String,
    /// Unique short code, e.g. "MSK".
    pub code: String,
    #[serde(default)]
    pub station_type: StationType,
    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    pub fn is_depot(&self) -> bool {
        self.station_type == StationType::Depot
    }
}
