//! Data Transfer Objects for the HTTP API.
//!
//! Domain models already derive Serialize/Deserialize and are returned
//! directly; the types here shape requests and list envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    AuditRecord, Booking, BookingStatus, Recurrence, Station, StationId, StationType, Train,
    TrainId, TrainType,
};
use crate::services::BookingDraft;

/// Request body for creating or updating a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub train_id: TrainId,
    pub track_number: i32,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    #[serde(default)]
    pub from_station: Option<StationId>,
    #[serde(default)]
    pub to_station: Option<StationId>,
    /// Number of recurrence instances to generate on create.
    #[serde(default)]
    pub recur_count: i32,
}

impl From<BookingRequest> for BookingDraft {
    fn from(req: BookingRequest) -> Self {
        BookingDraft {
            train_id: req.train_id,
            track_number: req.track_number,
            departure: req.departure,
            arrival: req.arrival,
            status: req.status,
            recurrence: req.recurrence,
            from_station: req.from_station,
            to_station: req.to_station,
            recur_count: req.recur_count,
        }
    }
}

/// Response for booking creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub booking: Booking,
    /// Recurrence instances persisted alongside the booking.
    pub generated: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub total: usize,
}

/// Query parameters for the free-slot endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsQuery {
    /// Requested slot length in minutes
    pub duration_minutes: i64,
    /// Search near this time; defaults to now
    #[serde(default)]
    pub near: Option<DateTime<Utc>>,
}

/// Request body for registering a train.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrainRequest {
    pub number: String,
    #[serde(default)]
    pub train_type: TrainType,
    pub wagon_count: i32,
    pub max_speed: f64,
    #[serde(default)]
    pub description: String,
}

impl From<CreateTrainRequest> for Train {
    fn from(req: CreateTrainRequest) -> Self {
        Train {
            id: None,
            number: req.number,
            train_type: req.train_type,
            wagon_count: req.wagon_count,
            max_speed: req.max_speed,
            description: req.description,
        }
    }
}

/// Request body for registering a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStationRequest {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub station_type: StationType,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl From<CreateStationRequest> for Station {
    fn from(req: CreateStationRequest) -> Self {
        Station {
            id: None,
            name: req.name,
            code: req.code,
            station_type: req.station_type,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditListResponse {
    pub entries: Vec<AuditRecord>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
