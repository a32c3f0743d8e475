//! Train and station master-data services.
//!
//! Thin orchestration over the repository: uniqueness is enforced by the
//! store, audit entries are recorded on success. None of this participates
//! in allocation decisions.

use crate::db::repository::FullRepository;
use crate::models::{
    AuditAction, AuditEntity, AuditRecord, Station, Train, UserId,
};

use super::booking::BookingServiceResult;

/// Register a new train.
pub async fn create_train(
    repo: &dyn FullRepository,
    train: Train,
    actor: Option<UserId>,
) -> BookingServiceResult<Train> {
    let stored = repo.insert_train(train).await?;

    let record = AuditRecord::new(
        actor,
        AuditAction::Create,
        AuditEntity::Train,
        stored.id.map(|id| id.value()).unwrap_or_default(),
        String::new(),
        AuditRecord::snapshot(&stored),
    );
    if let Err(err) = repo.record_audit(record).await {
        tracing::warn!(error = %err, "failed to record audit entry");
    }

    Ok(stored)
}

/// List all trains.
pub async fn list_trains(repo: &dyn FullRepository) -> BookingServiceResult<Vec<Train>> {
    Ok(repo.list_trains().await?)
}

/// Register a new station.
pub async fn create_station(
    repo: &dyn FullRepository,
    station: Station,
    actor: Option<UserId>,
) -> BookingServiceResult<Station> {
    let stored = repo.insert_station(station).await?;

    let record = AuditRecord::new(
        actor,
        AuditAction::Create,
        AuditEntity::Station,
        stored.id.map(|id| id.value()).unwrap_or_default(),
        String::new(),
        AuditRecord::snapshot(&stored),
    );
    if let Err(err) = repo.record_audit(record).await {
        tracing::warn!(error = %err, "failed to record audit entry");
    }

    Ok(stored)
}

/// List all stations.
pub async fn list_stations(repo: &dyn FullRepository) -> BookingServiceResult<Vec<Station>> {
    Ok(repo.list_stations().await?)
}

/// Fetch the most recent audit entries, newest first.
pub async fn recent_audit(
    repo: &dyn FullRepository,
    limit: usize,
) -> BookingServiceResult<Vec<crate::models::AuditRecord>> {
    Ok(repo.recent_audit(limit).await?)
}
