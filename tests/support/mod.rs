//! Shared fixtures for integration tests.

use chrono::{DateTime, TimeZone, Utc};

use rail_dispatch::db::repository::{FullRepository, MasterDataRepository};
use rail_dispatch::models::{Train, TrainId, TrainType};
use rail_dispatch::services::BookingDraft;

/// A fixed point in March 2027, safely in the future so the slot finder's
/// now-clamping never distorts assertions.
pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 3, day, hour, minute, 0).unwrap()
}

pub async fn seed_train(repo: &dyn FullRepository, number: &str) -> TrainId {
    let train = repo
        .insert_train(Train {
            id: None,
            number: number.to_string(),
            train_type: TrainType::Cargo,
            wagon_count: 12,
            max_speed: 120.0,
            description: String::new(),
        })
        .await
        .unwrap();
    train.id.unwrap()
}

pub fn draft(
    train_id: TrainId,
    track_number: i32,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
) -> BookingDraft {
    BookingDraft {
        train_id,
        track_number,
        departure,
        arrival,
        status: None,
        recurrence: None,
        from_station: None,
        to_station: None,
        recur_count: 0,
    }
}
