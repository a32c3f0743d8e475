//! In-memory repository implementation.
//!
//! Backs unit tests and local development. All state lives behind a single
//! `parking_lot::RwLock`; queries are linear scans, which matches the
//! engine's stated performance envelope (a track holds few bookings).
//!
//! Deletion is soft: removed rows keep their slot but vanish from every
//! active query, mirroring how a production store would filter
//! `deleted_at IS NULL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashSet;

use crate::db::repository::{
    AuditRepository, BookingRepository, ErrorContext, FullRepository, MasterDataRepository,
    RepositoryError, RepositoryResult,
};
use crate::models::{
    AuditRecord, Booking, BookingId, BookingStatus, Station, StationId, TimeInterval, Train,
    TrainId,
};

#[derive(Debug, Clone)]
struct BookingRow {
    booking: Booking,
    removed: bool,
}

#[derive(Debug, Default)]
struct Store {
    bookings: Vec<BookingRow>,
    trains: Vec<Train>,
    stations: Vec<Station>,
    audit: Vec<AuditRecord>,
    next_booking_id: i64,
    next_train_id: i64,
    next_station_id: i64,
    next_audit_id: i64,
}

/// Thread-safe in-memory repository.
#[derive(Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn excluded(booking: &Booking, exclude: Option<BookingId>) -> bool {
    matches!((booking.id, exclude), (Some(id), Some(ex)) if id == ex)
}

impl Store {
    fn active(&self) -> impl Iterator<Item = &Booking> {
        self.bookings
            .iter()
            .filter(|row| !row.removed)
            .map(|row| &row.booking)
    }

    fn active_on_track<'a>(
        &'a self,
        track_number: i32,
        exclude: Option<BookingId>,
    ) -> impl Iterator<Item = &'a Booking> {
        self.active()
            .filter(move |b| b.track_number == track_number && !excluded(b, exclude))
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn insert_booking(&self, mut booking: Booking) -> RepositoryResult<Booking> {
        let mut store = self.store.write();
        store.next_booking_id += 1;
        booking.id = Some(BookingId::new(store.next_booking_id));
        store.bookings.push(BookingRow {
            booking: booking.clone(),
            removed: false,
        });
        Ok(booking)
    }

    async fn save_booking(&self, booking: Booking) -> RepositoryResult<Booking> {
        let id = booking.id.ok_or_else(|| {
            RepositoryError::validation_with_context(
                "Cannot save a booking without an ID",
                ErrorContext::new("save_booking").with_entity("booking"),
            )
        })?;

        let mut store = self.store.write();
        let row = store
            .bookings
            .iter_mut()
            .find(|row| !row.removed && row.booking.id == Some(id))
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Booking does not exist",
                    ErrorContext::new("save_booking")
                        .with_entity("booking")
                        .with_entity_id(id),
                )
            })?;
        row.booking = booking.clone();
        Ok(booking)
    }

    async fn remove_booking(&self, id: BookingId) -> RepositoryResult<bool> {
        let mut store = self.store.write();
        match store
            .bookings
            .iter_mut()
            .find(|row| !row.removed && row.booking.id == Some(id))
        {
            Some(row) => {
                row.removed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_booking(&self, id: BookingId) -> RepositoryResult<Option<Booking>> {
        let store = self.store.read();
        let booking = store.active().find(|b| b.id == Some(id)).cloned();
        Ok(booking)
    }

    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>> {
        let store = self.store.read();
        let bookings = store.active().cloned().collect();
        Ok(bookings)
    }

    async fn list_on_track(&self, track_number: i32) -> RepositoryResult<Vec<Booking>> {
        let store = self.store.read();
        let mut bookings: Vec<Booking> =
            store.active_on_track(track_number, None).cloned().collect();
        bookings.sort_by_key(|b| b.departure);
        Ok(bookings)
    }

    async fn find_overlapping(
        &self,
        track_number: i32,
        interval: TimeInterval,
        exclude: Option<BookingId>,
    ) -> RepositoryResult<Option<Booking>> {
        let store = self.store.read();
        let occupant = store
            .active_on_track(track_number, exclude)
            .find(|b| b.interval().conflicts_with(&interval))
            .cloned();
        Ok(occupant)
    }

    async fn find_nearest_before(
        &self,
        track_number: i32,
        departure: DateTime<Utc>,
        exclude: Option<BookingId>,
    ) -> RepositoryResult<Option<Booking>> {
        let store = self.store.read();
        let nearest = store
            .active_on_track(track_number, exclude)
            .filter(|b| b.arrival <= departure)
            .max_by_key(|b| b.arrival)
            .cloned();
        Ok(nearest)
    }

    async fn find_nearest_after(
        &self,
        track_number: i32,
        arrival: DateTime<Utc>,
        exclude: Option<BookingId>,
    ) -> RepositoryResult<Option<Booking>> {
        let store = self.store.read();
        let nearest = store
            .active_on_track(track_number, exclude)
            .filter(|b| b.departure >= arrival)
            .min_by_key(|b| b.departure)
            .cloned();
        Ok(nearest)
    }

    async fn count_active_bookings(&self) -> RepositoryResult<u64> {
        let store = self.store.read();
        let count = store
            .active()
            .filter(|b| {
                matches!(
                    b.status,
                    BookingStatus::Scheduled | BookingStatus::InProgress
                )
            })
            .count();
        Ok(count as u64)
    }

    async fn count_tracks_in_use(&self) -> RepositoryResult<u64> {
        let store = self.store.read();
        let tracks: HashSet<i32> = store.active().map(|b| b.track_number).collect();
        Ok(tracks.len() as u64)
    }
}

#[async_trait]
impl MasterDataRepository for LocalRepository {
    async fn insert_train(&self, mut train: Train) -> RepositoryResult<Train> {
        let mut store = self.store.write();
        if store.trains.iter().any(|t| t.number == train.number) {
            return Err(RepositoryError::validation_with_context(
                "Train number already exists",
                ErrorContext::new("insert_train")
                    .with_entity("train")
                    .with_details(train.number.clone()),
            ));
        }
        store.next_train_id += 1;
        train.id = Some(TrainId::new(store.next_train_id));
        store.trains.push(train.clone());
        Ok(train)
    }

    async fn get_train(&self, id: TrainId) -> RepositoryResult<Option<Train>> {
        let store = self.store.read();
        Ok(store.trains.iter().find(|t| t.id == Some(id)).cloned())
    }

    async fn list_trains(&self) -> RepositoryResult<Vec<Train>> {
        Ok(self.store.read().trains.clone())
    }

    async fn count_trains(&self) -> RepositoryResult<u64> {
        Ok(self.store.read().trains.len() as u64)
    }

    async fn insert_station(&self, mut station: Station) -> RepositoryResult<Station> {
        let mut store = self.store.write();
        if store
            .stations
            .iter()
            .any(|s| s.name == station.name || s.code == station.code)
        {
            return Err(RepositoryError::validation_with_context(
                "Station name or code already exists",
                ErrorContext::new("insert_station")
                    .with_entity("station")
                    .with_details(format!("{}/{}", station.name, station.code)),
            ));
        }
        store.next_station_id += 1;
        station.id = Some(StationId::new(store.next_station_id));
        store.stations.push(station.clone());
        Ok(station)
    }

    async fn get_station(&self, id: StationId) -> RepositoryResult<Option<Station>> {
        let store = self.store.read();
        Ok(store.stations.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn list_stations(&self) -> RepositoryResult<Vec<Station>> {
        Ok(self.store.read().stations.clone())
    }

    async fn count_stations(&self) -> RepositoryResult<u64> {
        Ok(self.store.read().stations.len() as u64)
    }
}

#[async_trait]
impl AuditRepository for LocalRepository {
    async fn record_audit(&self, mut record: AuditRecord) -> RepositoryResult<AuditRecord> {
        let mut store = self.store.write();
        store.next_audit_id += 1;
        record.id = Some(store.next_audit_id);
        store.audit.push(record.clone());
        Ok(record)
    }

    async fn recent_audit(&self, limit: usize) -> RepositoryResult<Vec<AuditRecord>> {
        let store = self.store.read();
        let mut records: Vec<AuditRecord> = store.audit.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(limit);
        Ok(records)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {}
